//! Filter history carried across frame boundaries
//!
//! Both LPC filters read `order` samples from before the start of the current
//! frame: the inverse filter from the previous input frame, the synthesis
//! filter from the previous output frame. `HistoryBuffer` keeps those samples
//! directly in front of the frame so the filters see one contiguous run.

use std::fmt;

use crate::core::{LPC_MAX_N, LPC_MAX_ORDER};

/// `order` samples of history followed by up to `LPC_MAX_N` frame samples
#[derive(Clone, PartialEq)]
pub struct HistoryBuffer {
    buf: [f32; LPC_MAX_ORDER + LPC_MAX_N],
    order: usize,
    len: usize,
}

impl HistoryBuffer {
    /// Empty frame with `order` samples of zero history
    pub fn new(order: usize) -> Self {
        assert!(
            order <= LPC_MAX_ORDER,
            "history order {order} exceeds maximum {LPC_MAX_ORDER}"
        );
        HistoryBuffer {
            buf: [0.0; LPC_MAX_ORDER + LPC_MAX_N],
            order,
            len: 0,
        }
    }

    /// Number of history samples kept
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of samples in the current frame
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Tail of the previous frame, oldest sample first
    pub fn history(&self) -> &[f32] {
        &self.buf[..self.order]
    }

    /// Overwrite the history, e.g. to resume a stream
    pub fn set_history(&mut self, tail: &[f32]) {
        assert_eq!(tail.len(), self.order, "history length must equal order");
        self.buf[..self.order].copy_from_slice(tail);
    }

    /// Current frame samples
    pub fn frame(&self) -> &[f32] {
        &self.buf[self.order..self.order + self.len]
    }

    pub fn frame_mut(&mut self) -> &mut [f32] {
        &mut self.buf[self.order..self.order + self.len]
    }

    /// History immediately followed by the current frame
    pub fn as_slice(&self) -> &[f32] {
        &self.buf[..self.order + self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.buf[..self.order + self.len]
    }

    /// Copy a new frame in behind the history
    pub fn load(&mut self, samples: &[f32]) {
        self.set_len(samples.len());
        self.frame_mut().copy_from_slice(samples);
    }

    /// Resize the current frame without touching its contents
    pub fn set_len(&mut self, len: usize) {
        assert!(
            len <= LPC_MAX_N,
            "frame of {len} samples exceeds buffer capacity {LPC_MAX_N}"
        );
        self.len = len;
    }

    /// Make the last `order` samples of history + frame the new history and
    /// clear the frame
    pub fn advance(&mut self) {
        let end = self.order + self.len;
        self.buf.copy_within(end - self.order..end, 0);
        self.len = 0;
    }

    pub fn reset(&mut self) {
        self.buf.fill(0.0);
        self.len = 0;
    }
}

impl fmt::Debug for HistoryBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryBuffer")
            .field("history", &self.history())
            .field("frame", &self.frame())
            .finish()
    }
}

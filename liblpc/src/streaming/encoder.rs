use std::collections::VecDeque;

use log::{debug, trace};

use super::types::{EncodedFrame, LpcModelDump, StreamState};
use crate::core::{LpcConfig, LpcResult, LPC_MAX_N};
use crate::lpc::{find_aks, inverse_filter, HistoryBuffer, PreEmphasis};

/// Encoder-side stream session
///
/// Owns the pre-emphasis memory and the input history the inverse filter reads,
/// so frames must be fed in stream order.
pub struct StreamingEncoder {
    config: LpcConfig,
    pre_emphasis: PreEmphasis,
    input: HistoryBuffer,
    sample_buffer: Vec<f32>,
    pending_frames: VecDeque<EncodedFrame>,
    frame_index: u32,
}

impl StreamingEncoder {
    /// Create a new streaming encoder
    pub fn new(config: LpcConfig) -> LpcResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            pre_emphasis: PreEmphasis::new(),
            input: HistoryBuffer::new(config.order),
            sample_buffer: Vec::with_capacity(config.frame_size * 2),
            pending_frames: VecDeque::new(),
            frame_index: 0,
        })
    }

    pub fn config(&self) -> &LpcConfig {
        &self.config
    }

    /// Analyse one frame and produce its residual
    ///
    /// # Panics
    /// If the frame has fewer than 2 or at least `LPC_MAX_N` samples.
    pub fn encode_frame(&mut self, samples: &[f32]) -> EncodedFrame {
        let n = samples.len();
        assert!(
            n < LPC_MAX_N,
            "frame of {n} samples exceeds analysis limit of {LPC_MAX_N}"
        );

        let mut emphasised = [0.0f32; LPC_MAX_N];
        let frame = &mut emphasised[..n];
        if self.config.emphasis {
            self.pre_emphasis.process(samples, frame);
        } else {
            frame.copy_from_slice(samples);
        }

        let analysis = find_aks(frame, self.config.order);

        self.input.load(frame);
        let mut residual = vec![0.0f32; n];
        inverse_filter(&self.input, &analysis.coeffs, &mut residual);
        self.input.advance();

        trace!(
            "frame {}: energy {:.3e}, coeffs {:?}",
            self.frame_index,
            analysis.energy,
            analysis.coeffs
        );

        let encoded = EncodedFrame {
            index: self.frame_index,
            samples: n as u32,
            coeffs: analysis.coeffs,
            energy: analysis.energy,
            residual,
        };
        self.frame_index += 1;
        encoded
    }

    /// Get number of pending samples in buffer
    pub fn pending_samples(&self) -> usize {
        self.sample_buffer.len()
    }

    /// Get number of encoded frames ready
    pub fn pending_frames(&self) -> usize {
        self.pending_frames.len()
    }

    /// Push samples to the encoder, encoding every complete frame
    pub fn push_samples(&mut self, samples: &[f32]) {
        self.sample_buffer.extend_from_slice(samples);

        let frame_size = self.config.frame_size;
        let complete = self.sample_buffer.len() / frame_size;
        for i in 0..complete {
            let start = i * frame_size;
            let frame: Vec<f32> = self.sample_buffer[start..start + frame_size].to_vec();
            let encoded = self.encode_frame(&frame);
            self.pending_frames.push_back(encoded);
        }
        self.sample_buffer.drain(..complete * frame_size);
    }

    /// Get next encoded frame if available
    pub fn next_frame(&mut self) -> Option<EncodedFrame> {
        self.pending_frames.pop_front()
    }

    /// Encode remaining samples as a zero padded final frame
    pub fn flush(&mut self) -> Option<EncodedFrame> {
        if self.sample_buffer.is_empty() {
            return None;
        }

        let valid = self.sample_buffer.len();
        let mut frame = std::mem::take(&mut self.sample_buffer);
        frame.resize(self.config.frame_size, 0.0);

        debug!(
            "flushing partial frame: {} of {} samples",
            valid, self.config.frame_size
        );

        let mut encoded = self.encode_frame(&frame);
        encoded.samples = valid as u32;
        Some(encoded)
    }

    /// Flush and collect every pending frame into a model dump
    pub fn finalize(&mut self, sample_rate: u32) -> LpcModelDump {
        if let Some(frame) = self.flush() {
            self.pending_frames.push_back(frame);
        }

        let frames: Vec<EncodedFrame> = self.pending_frames.drain(..).collect();
        debug!("finalized {} frames at {} Hz", frames.len(), sample_rate);

        LpcModelDump {
            config: self.config,
            sample_rate,
            frames,
        }
    }

    pub fn state(&self) -> StreamState {
        StreamState {
            frames: self.frame_index,
            emphasis_memory: self.pre_emphasis.memory(),
        }
    }

    /// Input samples the inverse filter will read before the next frame
    pub fn history(&self) -> &[f32] {
        self.input.history()
    }

    /// Forget all stream state
    pub fn reset(&mut self) {
        self.pre_emphasis.reset();
        self.input.reset();
        self.sample_buffer.clear();
        self.pending_frames.clear();
        self.frame_index = 0;
    }
}

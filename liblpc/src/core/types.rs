//! common types for the lpc engine

use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::audio_constants::LPC_MAX_ORDER;

/// result type for fallible session/config operations
pub type LpcResult<T> = Result<T, String>;

/// Direct-form LPC coefficient vector `a[0..=order]`
///
/// `a[0]` is the unity leading tap of the all-pole model, `a[1..=order]` are the
/// prediction coefficients. Storage is fixed at `LPC_MAX_ORDER + 1` taps so the
/// type never touches the heap.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<f32>", try_from = "Vec<f32>")]
pub struct LpcCoefficients {
    taps: [f32; LPC_MAX_ORDER + 1],
    order: usize,
}

impl LpcCoefficients {
    /// unity predictor `[1, 0, ..., 0]` of the given order
    pub fn new(order: usize) -> Self {
        assert!(
            order <= LPC_MAX_ORDER,
            "lpc order {order} exceeds maximum {LPC_MAX_ORDER}"
        );
        let mut taps = [0.0; LPC_MAX_ORDER + 1];
        taps[0] = 1.0;
        LpcCoefficients { taps, order }
    }

    /// Copy `a[0..=order]` from a slice
    pub fn from_slice(a: &[f32]) -> LpcResult<Self> {
        if a.is_empty() {
            return Err("coefficient vector must contain at least a[0]".to_string());
        }
        let order = a.len() - 1;
        if order > LPC_MAX_ORDER {
            return Err(format!(
                "lpc order {} exceeds maximum {}",
                order, LPC_MAX_ORDER
            ));
        }
        let mut taps = [0.0; LPC_MAX_ORDER + 1];
        taps[..a.len()].copy_from_slice(a);
        Ok(LpcCoefficients { taps, order })
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.taps[..=self.order]
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.taps[..=self.order]
    }

    /// Bandwidth-expanded copy, `a[i] * gamma^i`, with `a[0]` carried over
    pub fn weighted(&self, gamma: f32) -> Self {
        let mut out = *self;
        crate::lpc::weight(self.as_slice(), gamma, out.as_mut_slice());
        out
    }
}

impl Deref for LpcCoefficients {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        self.as_slice()
    }
}

impl DerefMut for LpcCoefficients {
    fn deref_mut(&mut self) -> &mut [f32] {
        self.as_mut_slice()
    }
}

impl fmt::Debug for LpcCoefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl From<LpcCoefficients> for Vec<f32> {
    fn from(coeffs: LpcCoefficients) -> Self {
        coeffs.as_slice().to_vec()
    }
}

impl TryFrom<Vec<f32>> for LpcCoefficients {
    type Error = String;

    fn try_from(v: Vec<f32>) -> LpcResult<Self> {
        LpcCoefficients::from_slice(&v)
    }
}

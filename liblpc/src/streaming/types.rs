//! Streaming types

use serde::{Deserialize, Serialize};

use crate::core::{LpcCoefficients, LpcConfig};

/// One analysed frame: the spectral model plus the excitation that drives it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedFrame {
    /// Frame index
    pub index: u32,
    /// Number of valid samples (the final frame may be zero padded)
    pub samples: u32,
    /// LPCs, `coeffs[0] = 1.0`
    pub coeffs: LpcCoefficients,
    /// Prediction error energy
    pub energy: f32,
    /// Inverse filter output, one value per frame sample
    pub residual: Vec<f32>,
}

/// Session bookkeeping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamState {
    /// Frames processed so far
    pub frames: u32,
    /// Current pre- or de-emphasis memory
    pub emphasis_memory: f32,
}

/// Serializable record of a whole analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpcModelDump {
    /// Options the frames were produced with
    pub config: LpcConfig,
    /// Sample rate of the analysed audio in Hz
    pub sample_rate: u32,
    /// Frames in stream order
    pub frames: Vec<EncodedFrame>,
}

impl LpcModelDump {
    /// Total valid samples across all frames
    pub fn total_samples(&self) -> u64 {
        self.frames.iter().map(|f| f.samples as u64).sum()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.total_samples() as f64 / self.sample_rate as f64
    }

    /// Serialize to MessagePack bytes
    pub fn to_msgpack(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        rmp_serde::to_vec_named(self)
    }

    /// Deserialize from MessagePack bytes
    pub fn from_msgpack(data: &[u8]) -> Result<Self, rmp_serde::decode::Error> {
        rmp_serde::from_slice(data)
    }
}

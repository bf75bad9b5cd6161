//! analysis/synthesis session options

use serde::{Deserialize, Serialize};

use super::audio_constants::{LPC_MAX_N, LPC_MAX_ORDER};
use super::types::LpcResult;

/// Options shared by the streaming encoder and decoder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LpcConfig {
    /// LPC order (number of prediction coefficients)
    pub order: usize,
    /// Samples per analysis frame
    pub frame_size: usize,
    /// Bandwidth expansion factor applied before synthesis (1.0 = off)
    pub gamma: f32,
    /// Run pre-emphasis before analysis and de-emphasis after synthesis
    pub emphasis: bool,
}

impl Default for LpcConfig {
    fn default() -> Self {
        Self {
            order: 10,
            frame_size: 160, // 20ms at 8kHz
            gamma: 1.0,
            emphasis: true,
        }
    }
}

impl LpcConfig {
    /// Set LPC order (capped at LPC_MAX_ORDER)
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order.min(LPC_MAX_ORDER);
        self
    }

    /// Set frame size (2..LPC_MAX_N)
    pub fn with_frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = frame_size.clamp(2, LPC_MAX_N - 1);
        self
    }

    /// Set bandwidth expansion factor, in (0.0, 1.0]
    ///
    /// Not clamped: `validate` rejects out of range values as given.
    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Enable or disable the pre/de-emphasis pair
    pub fn with_emphasis(mut self, emphasis: bool) -> Self {
        self.emphasis = emphasis;
        self
    }

    /// Check the options describe a runnable session
    pub fn validate(&self) -> LpcResult<()> {
        if self.order > LPC_MAX_ORDER {
            return Err(format!(
                "order {} exceeds maximum {}",
                self.order, LPC_MAX_ORDER
            ));
        }
        if self.frame_size < 2 || self.frame_size >= LPC_MAX_N {
            return Err(format!(
                "frame size {} outside 2..{}",
                self.frame_size, LPC_MAX_N
            ));
        }
        if !(self.gamma > 0.0 && self.gamma <= 1.0) {
            return Err(format!("gamma {} outside (0, 1]", self.gamma));
        }
        Ok(())
    }

    /// Parse options from JSON, missing fields take their defaults
    pub fn from_json(json: &str) -> LpcResult<Self> {
        let config: LpcConfig =
            serde_json::from_str(json).map_err(|e| format!("Invalid config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> LpcResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }
}

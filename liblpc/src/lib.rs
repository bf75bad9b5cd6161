#![allow(clippy::needless_range_loop)]

use wasm_bindgen::prelude::*;

pub mod arena;
pub mod core;
pub mod lpc;
pub mod streaming;

pub use arena::{Arena, ArenaBlock, ArenaError, ArenaEvent, ArenaUsage, ALIGNMENT};
pub use crate::core::{
    LpcCoefficients, LpcConfig, LpcResult, DE_EMPHASIS_BETA, ENERGY_FLOOR, LPC_MAX_N,
    LPC_MAX_ORDER, PRE_EMPHASIS_ALPHA,
};
pub use lpc::{
    autocorrelate, de_emp, find_aks, hanning_window, inverse_filter, inverse_filter_history,
    levinson_durbin, lpc_power_spectrum, pre_emp, synthesis_filter, synthesis_filter_history,
    weight, DeEmphasis, FrameAnalysis, HistoryBuffer, PreEmphasis,
};
pub use streaming::{EncodedFrame, LpcModelDump, StreamState, StreamingDecoder, StreamingEncoder};

/// library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// result helpers

/// turn an error into js
fn to_js_err(e: String) -> JsValue {
    JsValue::from_str(&e)
}

fn check_frame(len: usize, order: usize) -> LpcResult<()> {
    if len < 2 || len >= LPC_MAX_N {
        return Err(format!("frame length {} outside 2..{}", len, LPC_MAX_N));
    }
    if order > LPC_MAX_ORDER {
        return Err(format!("order {} exceeds maximum {}", order, LPC_MAX_ORDER));
    }
    Ok(())
}

// api functions

/// analyse a single frame
///
/// # Arguments
/// * `samples` - Frame of speech samples (2 to 511 samples)
/// * `order` - LPC order (0 to 20)
///
/// # Returns
/// Object `{ coeffs: number[], energy: number }`
#[wasm_bindgen]
pub fn analyze_frame(samples: &[f32], order: usize) -> Result<JsValue, JsValue> {
    check_frame(samples.len(), order).map_err(to_js_err)?;

    let analysis = find_aks(samples, order);
    serde_wasm_bindgen::to_value(&analysis).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// run analysis and synthesis over a whole signal
///
/// # Arguments
/// * `samples` - Mono speech samples
/// * `order` - LPC order (0 to 20)
/// * `frame_size` - Samples per frame (2 to 511)
/// * `gamma` - Bandwidth expansion before synthesis (1.0 = none)
///
/// # Returns
/// Resynthesized samples, same length as the input
#[wasm_bindgen]
pub fn resynthesize(
    samples: &[f32],
    order: usize,
    frame_size: usize,
    gamma: f32,
) -> Result<Vec<f32>, JsValue> {
    let config = LpcConfig {
        order,
        frame_size,
        gamma,
        ..Default::default()
    };

    let mut encoder = StreamingEncoder::new(config).map_err(to_js_err)?;
    encoder.push_samples(samples);
    let dump = encoder.finalize(0);

    StreamingDecoder::decode_dump(&dump).map_err(to_js_err)
}

/// bandwidth expand a coefficient vector, `a[0]` is copied unchanged
#[wasm_bindgen]
pub fn weight_coefficients(coeffs: &[f32], gamma: f32) -> Vec<f32> {
    let mut out = coeffs.to_vec();
    weight(coeffs, gamma, &mut out);
    out
}

/// model power spectrum in dB, `fft_size / 2 + 1` bins
#[wasm_bindgen]
pub fn envelope_db(coeffs: &[f32], energy: f32, fft_size: usize) -> Result<Vec<f32>, JsValue> {
    if fft_size < 2 || fft_size < coeffs.len() {
        return Err(JsValue::from_str("fft size too small for coefficients"));
    }
    Ok(lpc::power_to_db(&lpc_power_spectrum(coeffs, energy, fft_size)))
}

/// get lib version
#[wasm_bindgen]
pub fn version() -> String {
    VERSION.to_string()
}

// streaming encoder wasm api

#[wasm_bindgen]
pub struct WasmLpcEncoder {
    inner: StreamingEncoder,
}

#[wasm_bindgen]
impl WasmLpcEncoder {
    #[wasm_bindgen(constructor)]
    pub fn new(order: usize, frame_size: usize) -> Result<WasmLpcEncoder, JsValue> {
        let config = LpcConfig {
            order,
            frame_size,
            ..Default::default()
        };
        let inner = StreamingEncoder::new(config).map_err(to_js_err)?;
        Ok(WasmLpcEncoder { inner })
    }

    /// feed samples, returns number of frames ready
    #[wasm_bindgen]
    pub fn push(&mut self, samples: &[f32]) -> usize {
        self.inner.push_samples(samples);
        self.inner.pending_frames()
    }

    /// next encoded frame as an object, or null
    #[wasm_bindgen]
    pub fn next_frame(&mut self) -> Result<JsValue, JsValue> {
        match self.inner.next_frame() {
            Some(frame) => serde_wasm_bindgen::to_value(&frame)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen]
    pub fn available_frames(&self) -> usize {
        self.inner.pending_frames()
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// finish the stream and return a MessagePack model dump
    #[wasm_bindgen]
    pub fn finalize(&mut self, sample_rate: u32) -> Result<Vec<u8>, JsValue> {
        self.inner
            .finalize(sample_rate)
            .to_msgpack()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// decode a MessagePack model dump back to samples
#[wasm_bindgen]
pub fn synthesize_dump(data: &[u8]) -> Result<Vec<f32>, JsValue> {
    let dump = LpcModelDump::from_msgpack(data)
        .map_err(|e| JsValue::from_str(&format!("Invalid model dump: {}", e)))?;
    StreamingDecoder::decode_dump(&dump).map_err(to_js_err)
}

// Initialize wasm-bindgen panic hook for better error messages
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

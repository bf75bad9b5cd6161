//! streaming analysis/synthesis for lpc speech
//!
//! frame-by-frame sessions that own the filter memories and history buffers
//! the core filters expect the caller to carry between frames
mod decoder;
mod encoder;
mod types;

pub use decoder::StreamingDecoder;
pub use encoder::StreamingEncoder;
pub use types::{EncodedFrame, LpcModelDump, StreamState};

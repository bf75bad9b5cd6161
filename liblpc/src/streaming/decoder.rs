use log::trace;

use super::types::{EncodedFrame, LpcModelDump, StreamState};
use crate::core::{LpcConfig, LpcResult, LPC_MAX_N};
use crate::lpc::{synthesis_filter, DeEmphasis, HistoryBuffer};

/// Decoder-side stream session
///
/// Owns the synthesis filter's output history and the de-emphasis memory.
pub struct StreamingDecoder {
    config: LpcConfig,
    de_emphasis: DeEmphasis,
    output: HistoryBuffer,
    frames_decoded: u32,
}

impl StreamingDecoder {
    /// Create a new streaming decoder
    pub fn new(config: LpcConfig) -> LpcResult<Self> {
        config.validate()?;

        Ok(Self {
            config,
            de_emphasis: DeEmphasis::new(),
            output: HistoryBuffer::new(config.order),
            frames_decoded: 0,
        })
    }

    pub fn config(&self) -> &LpcConfig {
        &self.config
    }

    /// Synthesize one frame of speech
    ///
    /// Returns the frame's valid samples. The full frame, padding included,
    /// still passes through the filters so the history stays continuous.
    pub fn decode_frame(&mut self, frame: &EncodedFrame) -> LpcResult<Vec<f32>> {
        if frame.coeffs.order() > self.config.order {
            return Err(format!(
                "frame {} has order {}, decoder configured for {}",
                frame.index,
                frame.coeffs.order(),
                self.config.order
            ));
        }
        if frame.residual.len() >= LPC_MAX_N {
            return Err(format!(
                "frame {} residual of {} samples exceeds limit of {}",
                frame.index,
                frame.residual.len(),
                LPC_MAX_N
            ));
        }
        if frame.samples as usize > frame.residual.len() {
            return Err(format!(
                "frame {} claims {} samples but carries {}",
                frame.index,
                frame.samples,
                frame.residual.len()
            ));
        }

        let coeffs = if self.config.gamma < 1.0 {
            frame.coeffs.weighted(self.config.gamma)
        } else {
            frame.coeffs
        };

        synthesis_filter(&frame.residual, &coeffs, &mut self.output);
        let mut speech = self.output.frame().to_vec();
        self.output.advance();

        if self.config.emphasis {
            self.de_emphasis.process_in_place(&mut speech);
        }
        speech.truncate(frame.samples as usize);

        trace!("decoded frame {} ({} samples)", frame.index, speech.len());
        self.frames_decoded += 1;
        Ok(speech)
    }

    /// Decode frames in order into one contiguous signal
    pub fn decode_all(&mut self, frames: &[EncodedFrame]) -> LpcResult<Vec<f32>> {
        let mut samples = Vec::new();
        for frame in frames {
            samples.extend_from_slice(&self.decode_frame(frame)?);
        }
        Ok(samples)
    }

    /// Decode a model dump with a fresh decoder built from its own config
    pub fn decode_dump(dump: &LpcModelDump) -> LpcResult<Vec<f32>> {
        let mut decoder = StreamingDecoder::new(dump.config)?;
        decoder.decode_all(&dump.frames)
    }

    pub fn state(&self) -> StreamState {
        StreamState {
            frames: self.frames_decoded,
            emphasis_memory: self.de_emphasis.memory(),
        }
    }

    /// Output samples the synthesis filter will read before the next frame
    pub fn history(&self) -> &[f32] {
        self.output.history()
    }

    /// Forget all stream state
    pub fn reset(&mut self) {
        self.de_emphasis.reset();
        self.output.reset();
        self.frames_decoded = 0;
    }
}

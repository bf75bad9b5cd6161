//! Pre-emphasis and de-emphasis
//!
//! Pre-emphasis is a high pass with a zero close to 0 Hz. It flattens the
//! spectral tilt of speech so low energy formants get a better LPC match.
//! De-emphasis is a low pass with a pole close to 0 Hz applied to synthesized
//! speech.
//!
//! The two filters do not feed back the same signal: pre-emphasis remembers the
//! last raw input sample, de-emphasis remembers the last filtered output sample.
//! With `PRE_EMPHASIS_ALPHA = 1.0` and `DE_EMPHASIS_BETA = 0.94` they are not
//! exact inverses.

use crate::core::{DE_EMPHASIS_BETA, PRE_EMPHASIS_ALPHA};

/// Pre-emphasise a frame: `out[i] = in[i] - ALPHA * mem; mem = in[i]`
pub fn pre_emp(out: &mut [f32], input: &[f32], mem: &mut f32) {
    assert_eq!(out.len(), input.len(), "pre_emp buffers differ in length");

    for (o, &x) in out.iter_mut().zip(input) {
        *o = x - PRE_EMPHASIS_ALPHA * *mem;
        *mem = x;
    }
}

/// De-emphasise a frame: `out[i] = in[i] + BETA * mem; mem = out[i]`
pub fn de_emp(out: &mut [f32], input: &[f32], mem: &mut f32) {
    assert_eq!(out.len(), input.len(), "de_emp buffers differ in length");

    for (o, &x) in out.iter_mut().zip(input) {
        *o = x + DE_EMPHASIS_BETA * *mem;
        *mem = *o;
    }
}

/// Pre-emphasis filter with its one-sample memory
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PreEmphasis {
    mem: f32,
}

impl PreEmphasis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter `input` into `out`, advancing the memory
    pub fn process(&mut self, input: &[f32], out: &mut [f32]) {
        pre_emp(out, input, &mut self.mem);
    }

    /// Last raw input sample seen
    pub fn memory(&self) -> f32 {
        self.mem
    }

    pub fn reset(&mut self) {
        self.mem = 0.0;
    }
}

/// De-emphasis filter with its one-sample memory
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeEmphasis {
    mem: f32,
}

impl DeEmphasis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter `input` into `out`, advancing the memory
    pub fn process(&mut self, input: &[f32], out: &mut [f32]) {
        de_emp(out, input, &mut self.mem);
    }

    pub fn process_in_place(&mut self, samples: &mut [f32]) {
        for s in samples.iter_mut() {
            *s += DE_EMPHASIS_BETA * self.mem;
            self.mem = *s;
        }
    }

    /// Last filtered output sample produced
    pub fn memory(&self) -> f32 {
        self.mem
    }

    pub fn reset(&mut self) {
        self.mem = 0.0;
    }
}

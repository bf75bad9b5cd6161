/// Maximum number of samples in an analysis frame (exclusive bound for `find_aks`)
pub const LPC_MAX_N: usize = 512;

/// Maximum supported LPC order
pub const LPC_MAX_ORDER: usize = 20;

/// Pre-emphasis coefficient, applied to the previous raw input sample
pub const PRE_EMPHASIS_ALPHA: f32 = 1.0;

/// De-emphasis coefficient, applied to the previous filtered output sample
pub const DE_EMPHASIS_BETA: f32 = 0.94;

/// Lower bound for residual energy
pub const ENERGY_FLOOR: f32 = 1e-12;

/// Maximum positive value for 16-bit signed integer (2^15 - 1)
pub const I16_MAX_F32: f32 = 32767.0;

/// Minimum value for 16-bit signed integer (-2^15)
pub const I16_MIN_F32: f32 = -32768.0;

/// Inverse of I16_MIN_F32 absolute value, used for int→float conversion (1/32768)
pub const I16_TO_F32_SCALE: f32 = 1.0 / 32768.0;

/// Convert f32 sample to i16
#[inline]
pub fn f32_to_i16(sample: f32) -> i16 {
    (sample * I16_MAX_F32).clamp(I16_MIN_F32, I16_MAX_F32) as i16
}

/// Convert i16 sample to f32
#[inline]
pub fn i16_to_f32(sample: i16) -> f32 {
    sample as f32 * I16_TO_F32_SCALE
}

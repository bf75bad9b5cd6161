//! Spectral envelope of the all-pole model

use rustfft::{num_complex::Complex, FftPlanner};

use crate::core::ENERGY_FLOOR;

/// Power spectrum `energy / |A(e^jw)|^2` of an LPC model
///
/// Returns `fft_size / 2 + 1` bins from DC to Nyquist. `A` is evaluated by a
/// zero-padded FFT of the coefficient vector.
pub fn lpc_power_spectrum(a: &[f32], energy: f32, fft_size: usize) -> Vec<f32> {
    assert!(fft_size >= 2, "fft size must be at least 2");
    assert!(
        fft_size >= a.len(),
        "fft size {} shorter than {} coefficients",
        fft_size,
        a.len()
    );

    let mut buffer: Vec<Complex<f32>> = vec![Complex::new(0.0, 0.0); fft_size];
    for (bin, &coeff) in buffer.iter_mut().zip(a) {
        bin.re = coeff;
    }

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    buffer[..fft_size / 2 + 1]
        .iter()
        .map(|c| energy / c.norm_sqr().max(ENERGY_FLOOR))
        .collect()
}

/// Convert power values to dB, flooring at `ENERGY_FLOOR`
pub fn power_to_db(power: &[f32]) -> Vec<f32> {
    power
        .iter()
        .map(|&p| 10.0 * p.max(ENERGY_FLOOR).log10())
        .collect()
}

/// Hanning window a frame: `out[i] = in[i] * (0.5 - 0.5 * cos(2πi / (N - 1)))`
///
/// Needs at least two samples, the taper is undefined for `N = 1`.
pub fn hanning_window(input: &[f32], out: &mut [f32]) {
    let n = input.len();
    assert!(n >= 2, "hanning window needs at least 2 samples, got {n}");
    assert_eq!(out.len(), n, "hanning window buffers differ in length");

    let denom = (n - 1) as f64;
    for i in 0..n {
        // phase in double precision, taper in single
        let phase = (2.0 * std::f64::consts::PI * i as f64 / denom) as f32;
        out[i] = input[i] * (0.5 - 0.5 * phase.cos());
    }
}

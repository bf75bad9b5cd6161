/// Biased autocorrelation of a windowed frame
///
/// Fills `r[j] = sum_{i=0}^{N-j-1} sn[i] * sn[i+j]` for `j` in `0..r.len()`, so the
/// analysis order is `r.len() - 1`. Lags at or beyond the frame length are zero.
pub fn autocorrelate(sn: &[f32], r: &mut [f32]) {
    let n = sn.len();

    for lag in 0..r.len() {
        let mut sum = 0.0f32;
        for i in 0..(n.saturating_sub(lag)) {
            sum += sn[i] * sn[i + lag];
        }
        r[lag] = sum;
    }
}

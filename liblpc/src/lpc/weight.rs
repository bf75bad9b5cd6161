/// Bandwidth-expand a vector of LPCs: `akw[i] = ak[i] * gamma^i` for `i` in `1..=order`
///
/// Moves the poles of `1/A(z)` towards the origin, widening formant bandwidths.
/// `akw[0]` is not written; callers set it when they need a complete vector.
pub fn weight(ak: &[f32], gamma: f32, akw: &mut [f32]) {
    assert!(
        akw.len() >= ak.len(),
        "weighted buffer holds {} taps, need {}",
        akw.len(),
        ak.len()
    );

    for i in 1..ak.len() {
        akw[i] = ak[i] * gamma.powf(i as f32);
    }
}

use serde::{Deserialize, Serialize};

use super::{autocorrelate, hanning_window, levinson_durbin};
use crate::core::{LpcCoefficients, ENERGY_FLOOR, LPC_MAX_N, LPC_MAX_ORDER};

/// LPC model of one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// `a[0..=order]`, `a[0] = 1.0`
    pub coeffs: LpcCoefficients,
    /// Prediction error energy, never below `ENERGY_FLOOR`
    pub energy: f32,
}

/// Find the LPCs and residual energy of a frame
///
/// Windows the frame, takes `order + 1` autocorrelation lags, runs
/// Levinson-Durbin and evaluates `E = sum a[i] * R[i]`. Energies at or below
/// zero are floored to `ENERGY_FLOOR`.
///
/// # Panics
/// If `sn.len() >= LPC_MAX_N`, `sn.len() < 2` or `order > LPC_MAX_ORDER`.
pub fn find_aks(sn: &[f32], order: usize) -> FrameAnalysis {
    let nsam = sn.len();
    assert!(
        nsam < LPC_MAX_N,
        "frame of {nsam} samples exceeds analysis limit of {LPC_MAX_N}"
    );
    assert!(
        order <= LPC_MAX_ORDER,
        "lpc order {order} exceeds maximum {LPC_MAX_ORDER}"
    );

    let mut wn = [0.0f32; LPC_MAX_N];
    let mut r = [0.0f32; LPC_MAX_ORDER + 1];
    let wn = &mut wn[..nsam];
    let r = &mut r[..=order];

    hanning_window(sn, wn);
    autocorrelate(wn, r);

    let mut coeffs = LpcCoefficients::new(order);
    levinson_durbin(r, coeffs.as_mut_slice());

    let mut energy = 0.0f32;
    for i in 0..=order {
        energy += coeffs[i] * r[i];
    }
    if energy <= 0.0 {
        energy = ENERGY_FLOOR;
    }

    FrameAnalysis { coeffs, energy }
}

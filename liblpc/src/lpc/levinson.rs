//! Levinson-Durbin recursion
//!
//! Order-recursive solution of the autocorrelation normal equations, in the form
//! given by J. Makhoul, "Linear prediction, a tutorial review", Proc. IEEE vol. 63
//! no. 4, April 1975 (equations 38a-38d).

use log::trace;

use crate::core::LPC_MAX_ORDER;

/// Convert `order + 1` autocorrelation lags into `order + 1` LPCs
///
/// `r.len() - 1` is the analysis order. On return `lpcs[0] = 1.0` and
/// `lpcs[1..=order]` hold the predictor of the final recursion stage.
///
/// A reflection coefficient with `|k| > 1` (or one that is not a number, which
/// happens when the error power reaches zero) is replaced by 0 for that stage.
pub fn levinson_durbin(r: &[f32], lpcs: &mut [f32]) {
    assert!(!r.is_empty(), "levinson_durbin needs at least R[0]");
    let order = r.len() - 1;
    assert!(
        order <= LPC_MAX_ORDER,
        "lpc order {order} exceeds maximum {LPC_MAX_ORDER}"
    );
    assert!(
        lpcs.len() > order,
        "coefficient buffer holds {} taps, order {} needs {}",
        lpcs.len(),
        order,
        order + 1
    );

    // a[i][j]: coefficient j of the order-i predictor
    let mut a = [[0.0f32; LPC_MAX_ORDER + 1]; LPC_MAX_ORDER + 1];
    let mut e = r[0]; // 38a

    for i in 1..=order {
        let mut sum = 0.0f32;
        for j in 1..i {
            sum += a[i - 1][j] * r[i - j];
        }

        let mut k = -(r[i] + sum) / e; // 38b
        if k.is_nan() || k.abs() > 1.0 {
            trace!("reflection coefficient {} at stage {} saturated to 0", k, i);
            k = 0.0;
        }

        a[i][i] = k;
        for j in 1..i {
            a[i][j] = a[i - 1][j] + k * a[i - 1][i - j]; // 38c
        }

        e *= 1.0 - k * k; // 38d
    }

    lpcs[1..=order].copy_from_slice(&a[order][1..=order]);
    lpcs[0] = 1.0;
}

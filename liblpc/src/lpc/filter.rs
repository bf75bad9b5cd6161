//! Inverse filter A(z) and synthesis filter 1/A(z)
//!
//! The slice forms take a buffer whose first `order` samples are history and
//! whose remainder is the frame. For the inverse filter the history lives in
//! the input, for the synthesis filter it lives in the output. Neither function
//! moves history forward; the caller does that after each frame
//! (`HistoryBuffer::advance`).

use super::HistoryBuffer;
use crate::core::LPC_MAX_N;

fn filter_order(a: &[f32]) -> usize {
    assert!(!a.is_empty(), "coefficient vector must contain at least a[0]");
    a.len() - 1
}

/// FIR analysis filter over `samples = [history(order) | frame(N)]`
///
/// `res[i] = sum_{j=0}^{order} frame[i - j] * a[j]` for `i` in `0..N`, with
/// negative frame indices reading history.
pub fn inverse_filter_history(samples: &[f32], a: &[f32], res: &mut [f32]) {
    let order = filter_order(a);
    assert!(
        samples.len() >= order,
        "inverse filter needs {order} history samples"
    );
    let nsam = samples.len() - order;
    assert!(res.len() >= nsam, "residual buffer too small");

    for i in 0..nsam {
        let n = order + i;
        let mut acc = 0.0f32;
        for j in 0..=order {
            acc += samples[n - j] * a[j];
        }
        res[i] = acc;
    }
}

/// IIR synthesis filter writing into `out = [history(order) | frame(N)]`
///
/// `frame[i] = res[i] * a[0] - sum_{j=1}^{order} frame[i - j] * a[j]`, where the
/// first `order` output samples must already hold the previous frame's tail.
pub fn synthesis_filter_history(res: &[f32], a: &[f32], out: &mut [f32]) {
    let order = filter_order(a);
    assert!(
        out.len() >= order + res.len(),
        "synthesis output needs {} history + {} frame samples",
        order,
        res.len()
    );

    for i in 0..res.len() {
        let n = order + i;
        let mut acc = res[i] * a[0];
        for j in 1..=order {
            acc -= out[n - j] * a[j];
        }
        out[n] = acc;
    }
}

/// Inverse filter the current frame of `input`, reading its history
///
/// The coefficient order may be lower than the buffer's history length; only
/// the most recent history samples are used then.
pub fn inverse_filter(input: &HistoryBuffer, a: &[f32], res: &mut [f32]) {
    let order = filter_order(a);
    assert!(
        order <= input.order(),
        "filter order {} exceeds history of {}",
        order,
        input.order()
    );

    let skip = input.order() - order;
    inverse_filter_history(&input.as_slice()[skip..], a, res);
}

/// Synthesize `res.len()` samples into the frame of `out`
pub fn synthesis_filter(res: &[f32], a: &[f32], out: &mut HistoryBuffer) {
    let order = filter_order(a);
    assert!(
        order <= out.order(),
        "filter order {} exceeds history of {}",
        order,
        out.order()
    );
    assert!(res.len() <= LPC_MAX_N, "residual frame too long");

    out.set_len(res.len());
    let skip = out.order() - order;
    synthesis_filter_history(res, a, &mut out.as_mut_slice()[skip..]);
}

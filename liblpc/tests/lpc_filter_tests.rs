//! Emphasis and LPC filter tests for liblpc

use liblpc::lpc::*;

fn signal(len: usize, seed: u32) -> Vec<f32> {
    let mut state = seed;
    (0..len)
        .map(|i| {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            let noise = (state >> 8) as f32 / (1u32 << 24) as f32 - 0.5;
            1000.0 * (i as f32 * 0.07).sin() + 300.0 * (i as f32 * 0.41).sin() + 50.0 * noise
        })
        .collect()
}

// ============================================================================
// Emphasis Tests
// ============================================================================

#[test]
fn test_pre_emphasis_feeds_back_input() {
    let input = [1.0f32, 2.0, 3.0];
    let mut out = [0.0f32; 3];
    let mut mem = 0.5f32;
    pre_emp(&mut out, &input, &mut mem);

    assert_eq!(out, [0.5, 1.0, 1.0]);
    assert_eq!(mem, 3.0);
}

#[test]
fn test_de_emphasis_feeds_back_output() {
    let input = [1.0f32, 1.0, 1.0];
    let mut out = [0.0f32; 3];
    let mut mem = 0.0f32;
    de_emp(&mut out, &input, &mut mem);

    assert!((out[0] - 1.0).abs() < 1e-6);
    assert!((out[1] - 1.94).abs() < 1e-6);
    assert!((out[2] - 2.8236).abs() < 1e-5);
    assert_eq!(mem, out[2]);
}

#[test]
fn test_emphasis_pair_is_not_identity() {
    let input = [1.0f32; 8];
    let mut pre = [0.0f32; 8];
    let mut post = [0.0f32; 8];
    let mut pre_mem = 0.0f32;
    let mut de_mem = 0.0f32;

    pre_emp(&mut pre, &input, &mut pre_mem);
    de_emp(&mut post, &pre, &mut de_mem);

    // pre-emphasis of a constant is an impulse, de-emphasis turns it into 0.94^n
    assert_eq!(post[0], 1.0);
    assert!((post[1] - 0.94).abs() < 1e-6);
    assert!(post[7] < 1.0);
}

#[test]
fn test_emphasis_split_frames_match_whole() {
    let input = signal(200, 7);

    let mut whole = vec![0.0f32; 200];
    let mut mem = 0.0f32;
    pre_emp(&mut whole, &input, &mut mem);

    let mut split = vec![0.0f32; 200];
    let mut filter = PreEmphasis::new();
    filter.process(&input[..73], &mut split[..73]);
    filter.process(&input[73..], &mut split[73..]);

    assert_eq!(whole, split);
    assert_eq!(filter.memory(), mem);

    let mut de_whole = vec![0.0f32; 200];
    let mut de_mem = 0.0f32;
    de_emp(&mut de_whole, &whole, &mut de_mem);

    let mut de_split = whole.clone();
    let mut de_filter = DeEmphasis::new();
    de_filter.process_in_place(&mut de_split[..120]);
    de_filter.process_in_place(&mut de_split[120..]);

    assert_eq!(de_whole, de_split);
}

#[test]
fn test_emphasis_reset() {
    let mut filter = PreEmphasis::new();
    let mut out = [0.0f32; 2];
    filter.process(&[4.0, 5.0], &mut out);
    assert_eq!(filter.memory(), 5.0);

    filter.reset();
    filter.process(&[4.0, 5.0], &mut out);
    assert_eq!(out, [4.0, 1.0]);
}

// ============================================================================
// History Buffer Tests
// ============================================================================

#[test]
fn test_history_buffer_starts_silent() {
    let buffer = HistoryBuffer::new(10);
    assert_eq!(buffer.order(), 10);
    assert!(buffer.is_empty());
    assert_eq!(buffer.history(), &[0.0; 10]);
}

#[test]
fn test_history_buffer_advance() {
    let mut buffer = HistoryBuffer::new(3);
    buffer.load(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    assert_eq!(buffer.len(), 5);
    assert_eq!(buffer.as_slice(), &[0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

    buffer.advance();
    assert!(buffer.is_empty());
    assert_eq!(buffer.history(), &[3.0, 4.0, 5.0]);
}

#[test]
fn test_history_buffer_advance_short_frame() {
    let mut buffer = HistoryBuffer::new(4);
    buffer.set_history(&[1.0, 2.0, 3.0, 4.0]);
    buffer.load(&[5.0, 6.0]);
    buffer.advance();

    assert_eq!(buffer.history(), &[3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_history_buffer_zero_order() {
    let mut buffer = HistoryBuffer::new(0);
    buffer.load(&[1.0, 2.0]);
    buffer.advance();
    assert!(buffer.history().is_empty());
}

#[test]
#[should_panic]
fn test_history_buffer_rejects_excessive_order() {
    HistoryBuffer::new(21);
}

// ============================================================================
// Inverse / Synthesis Filter Tests
// ============================================================================

#[test]
fn test_inverse_filter_first_order() {
    let a = [1.0f32, -0.5];
    let samples = [2.0f32, 4.0, 6.0];
    let mut res = [0.0f32; 2];
    inverse_filter_history(&samples, &a, &mut res);

    assert_eq!(res, [3.0, 4.0]);
}

#[test]
fn test_synthesis_filter_first_order() {
    let a = [1.0f32, -0.5];
    let res = [3.0f32, 4.0];
    let mut out = [2.0f32, 0.0, 0.0];
    synthesis_filter_history(&res, &a, &mut out);

    assert_eq!(out, [2.0, 4.0, 6.0]);
}

#[test]
fn test_order_zero_filters_scale_by_a0() {
    let a = [2.0f32];
    let mut res = [0.0f32; 3];
    inverse_filter_history(&[1.0, 2.0, 3.0], &a, &mut res);
    assert_eq!(res, [2.0, 4.0, 6.0]);

    let mut out = [0.0f32; 3];
    synthesis_filter_history(&[1.0, 2.0, 3.0], &a, &mut out);
    assert_eq!(out, [2.0, 4.0, 6.0]);
}

#[test]
fn test_inverse_filter_uses_recent_history_for_lower_order() {
    let mut input = HistoryBuffer::new(4);
    input.set_history(&[9.0, 9.0, 9.0, 2.0]);
    input.load(&[4.0, 6.0]);

    let mut res = [0.0f32; 2];
    inverse_filter(&input, &[1.0, -0.5], &mut res);
    assert_eq!(res, [3.0, 4.0]);
}

#[test]
fn test_filter_roundtrip_across_frames() {
    let order = 10;
    let frame_size = 160;
    let speech = signal(frame_size * 5, 99);

    let mut input = HistoryBuffer::new(order);
    let mut output = HistoryBuffer::new(order);
    let mut rebuilt = Vec::with_capacity(speech.len());

    for frame in speech.chunks(frame_size) {
        let analysis = find_aks(frame, order);

        input.load(frame);
        let mut res = vec![0.0f32; frame.len()];
        inverse_filter(&input, &analysis.coeffs, &mut res);
        input.advance();

        synthesis_filter(&res, &analysis.coeffs, &mut output);
        rebuilt.extend_from_slice(output.frame());
        output.advance();
    }

    for (orig, out) in speech.iter().zip(rebuilt.iter()) {
        assert!(
            (orig - out).abs() < 0.05,
            "reconstruction drifted: {} vs {}",
            orig,
            out
        );
    }
}

#[test]
fn test_residual_has_less_energy_than_signal() {
    let speech = signal(320, 3);
    let analysis = find_aks(&speech, 10);

    let mut input = HistoryBuffer::new(10);
    input.load(&speech);
    let mut res = vec![0.0f32; speech.len()];
    inverse_filter(&input, &analysis.coeffs, &mut res);

    let signal_energy: f32 = speech[20..].iter().map(|x| x * x).sum();
    let residual_energy: f32 = res[20..].iter().map(|x| x * x).sum();
    assert!(residual_energy < signal_energy * 0.1);
}

#[test]
#[should_panic]
fn test_synthesis_filter_rejects_order_above_history() {
    let mut out = HistoryBuffer::new(2);
    synthesis_filter(&[1.0; 4], &[1.0, 0.1, 0.1, 0.1], &mut out);
}

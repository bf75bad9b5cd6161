//! Streaming tests for liblpc
//!
//! Tests for:
//! - StreamingEncoder with incremental input
//! - StreamingDecoder frame by frame and from a model dump
//! - Emphasis and bandwidth expansion paths
//! - Model dump serialization

use liblpc::lpc::{de_emp, pre_emp};
use liblpc::{LpcConfig, LpcModelDump, StreamingDecoder, StreamingEncoder};

fn speech_like(len: usize) -> Vec<f32> {
    let mut seed = 777u32;
    (0..len)
        .map(|i| {
            seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
            let noise = (seed >> 8) as f32 / (1u32 << 24) as f32 - 0.5;
            let t = i as f32 / 8000.0;
            0.4 * (2.0 * std::f32::consts::PI * 220.0 * t).sin()
                + 0.3 * (2.0 * std::f32::consts::PI * 900.0 * t).sin()
                + 0.1 * (2.0 * std::f32::consts::PI * 2500.0 * t).sin()
                + 0.02 * noise
        })
        .collect()
}

#[test]
fn test_streaming_encoder_basic() {
    let config = LpcConfig::default();
    let samples = speech_like(8000);

    let mut encoder = StreamingEncoder::new(config).unwrap();
    encoder.push_samples(&samples);

    assert_eq!(encoder.pending_frames(), 50);
    assert_eq!(encoder.pending_samples(), 0);

    let mut expected_index = 0;
    while let Some(frame) = encoder.next_frame() {
        assert_eq!(frame.index, expected_index);
        assert_eq!(frame.samples, 160);
        assert_eq!(frame.coeffs.order(), 10);
        assert_eq!(frame.coeffs[0], 1.0);
        assert!(frame.energy > 0.0);
        expected_index += 1;
    }
    assert!(encoder.flush().is_none());
}

#[test]
fn test_chunked_push_matches_single_push() {
    let config = LpcConfig::default();
    let samples = speech_like(2000);

    let mut whole = StreamingEncoder::new(config).unwrap();
    whole.push_samples(&samples);
    let whole_dump = whole.finalize(8000);

    let mut chunked = StreamingEncoder::new(config).unwrap();
    for chunk in samples.chunks(61) {
        chunked.push_samples(chunk);
    }
    let chunked_dump = chunked.finalize(8000);

    assert_eq!(whole_dump, chunked_dump);
}

#[test]
fn test_decoder_frame_by_frame_matches_decode_all() {
    let config = LpcConfig::default();
    let mut encoder = StreamingEncoder::new(config).unwrap();
    encoder.push_samples(&speech_like(1200));
    let dump = encoder.finalize(8000);

    let all = StreamingDecoder::decode_dump(&dump).unwrap();

    let mut decoder = StreamingDecoder::new(config).unwrap();
    let mut pieces = Vec::new();
    for frame in &dump.frames {
        pieces.extend(decoder.decode_frame(frame).unwrap());
    }

    assert_eq!(all, pieces);
    assert_eq!(decoder.state().frames, dump.frames.len() as u32);
}

#[test]
fn test_emphasis_path_output() {
    // synthesis restores the pre-emphasised input, so the decoder output is
    // de_emp(pre_emp(x)) rather than x
    let config = LpcConfig::default();
    let samples = speech_like(160 * 4);

    let mut encoder = StreamingEncoder::new(config).unwrap();
    encoder.push_samples(&samples);
    let decoded = StreamingDecoder::decode_dump(&encoder.finalize(8000)).unwrap();

    let mut pre = vec![0.0f32; samples.len()];
    let mut expected = vec![0.0f32; samples.len()];
    let mut pre_mem = 0.0f32;
    let mut de_mem = 0.0f32;
    pre_emp(&mut pre, &samples, &mut pre_mem);
    de_emp(&mut expected, &pre, &mut de_mem);

    assert_eq!(decoded.len(), samples.len());
    for (d, e) in decoded.iter().zip(expected.iter()) {
        assert!((d - e).abs() < 1e-2, "{} vs {}", d, e);
    }
}

#[test]
fn test_emphasis_memory_tracks_stream() {
    let config = LpcConfig::default();
    let samples = speech_like(320);

    let mut encoder = StreamingEncoder::new(config).unwrap();
    encoder.push_samples(&samples);
    assert_eq!(encoder.state().emphasis_memory, samples[319]);
    assert_eq!(encoder.state().frames, 2);
}

#[test]
fn test_bandwidth_expanded_decode() {
    let config = LpcConfig::default().with_gamma(0.9);
    let samples = speech_like(160 * 10);

    let mut encoder = StreamingEncoder::new(config).unwrap();
    encoder.push_samples(&samples);
    let dump = encoder.finalize(8000);

    let decoded = StreamingDecoder::decode_dump(&dump).unwrap();
    assert_eq!(decoded.len(), samples.len());
    assert!(decoded.iter().all(|s| s.is_finite()));

    // expansion changes the synthesis, it is no longer an exact inverse
    let plain = StreamingDecoder::decode_dump(&LpcModelDump {
        config: config.with_gamma(1.0),
        ..dump.clone()
    })
    .unwrap();
    assert!(decoded.iter().zip(plain.iter()).any(|(a, b)| (a - b).abs() > 1e-4));
}

#[test]
fn test_partial_final_frame() {
    let config = LpcConfig::default().with_frame_size(100);
    let samples = speech_like(250);

    let mut encoder = StreamingEncoder::new(config).unwrap();
    encoder.push_samples(&samples);
    let dump = encoder.finalize(8000);

    assert_eq!(dump.frames.len(), 3);
    assert_eq!(dump.frames[2].samples, 50);
    assert_eq!(dump.frames[2].residual.len(), 100);
    assert_eq!(dump.total_samples(), 250);

    let decoded = StreamingDecoder::decode_dump(&dump).unwrap();
    assert_eq!(decoded.len(), 250);
}

#[test]
fn test_model_dump_msgpack_roundtrip() {
    let config = LpcConfig::default().with_order(16);
    let mut encoder = StreamingEncoder::new(config).unwrap();
    encoder.push_samples(&speech_like(800));
    let dump = encoder.finalize(16000);

    let bytes = dump.to_msgpack().unwrap();
    let restored = LpcModelDump::from_msgpack(&bytes).unwrap();

    assert_eq!(restored, dump);
    assert_eq!(restored.frames[0].coeffs.order(), 16);
    assert!((restored.duration_secs() - 0.05).abs() < 1e-9);
}

#[test]
fn test_model_dump_rejects_garbage() {
    assert!(LpcModelDump::from_msgpack(&[0xc1, 0x00, 0x13]).is_err());
}

#[test]
fn test_decoder_reset() {
    let config = LpcConfig::default();
    let mut encoder = StreamingEncoder::new(config).unwrap();
    encoder.push_samples(&speech_like(320));
    let dump = encoder.finalize(8000);

    let mut decoder = StreamingDecoder::new(config).unwrap();
    let first = decoder.decode_all(&dump.frames).unwrap();
    assert!(decoder.history().iter().any(|&s| s != 0.0));

    decoder.reset();
    assert_eq!(decoder.history(), &[0.0; 10]);
    assert_eq!(decoder.state().frames, 0);

    let second = decoder.decode_all(&dump.frames).unwrap();
    assert_eq!(first, second);
}

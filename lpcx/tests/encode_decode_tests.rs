#[cfg(test)]
mod tests {
    use lpcx::audio::{read_raw_s16le, read_speech_from_bytes, write_wav_to_bytes};
    use lpcx::{analyze_samples, resynthesize, snr_db, summarize, synthesize, LpcConfig};

    fn speech_like(sample_rate: u32, duration: f32) -> Vec<f32> {
        let num_samples = (sample_rate as f32 * duration) as usize;
        let mut seed = 4242u32;
        (0..num_samples)
            .map(|i| {
                seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
                let noise = (seed >> 8) as f32 / (1u32 << 24) as f32 - 0.5;
                let t = i as f32 / sample_rate as f32;
                0.4 * (t * 180.0 * 2.0 * std::f32::consts::PI).sin()
                    + 0.2 * (t * 1100.0 * 2.0 * std::f32::consts::PI).sin()
                    + 0.01 * noise
            })
            .collect()
    }

    #[test]
    fn test_analyze_resynth_round_trip() {
        let sample_rate = 8000;
        let samples = speech_like(sample_rate, 1.0);
        let config = LpcConfig::default().with_emphasis(false);

        let rebuilt = resynthesize(&samples, sample_rate, config).unwrap();

        assert_eq!(rebuilt.len(), samples.len());
        assert!(snr_db(&samples, &rebuilt) > 60.0);
    }

    #[test]
    fn test_wav_read_back() {
        let sample_rate = 16000;
        let samples = speech_like(sample_rate, 0.25);

        let wav = write_wav_to_bytes(&samples, sample_rate, 1).unwrap();
        let speech = read_speech_from_bytes(&wav).unwrap();

        assert_eq!(speech.sample_rate, sample_rate);
        assert_eq!(speech.source_channels, 1);
        assert_eq!(speech.samples.len(), samples.len());
        for (original, decoded) in samples.iter().zip(speech.samples.iter()) {
            assert!((original - decoded).abs() < 1e-6);
        }
    }

    #[test]
    fn test_stereo_wav_keeps_first_channel() {
        let left = speech_like(8000, 0.1);
        let interleaved: Vec<f32> = left.iter().flat_map(|&s| [s, -s]).collect();

        let wav = write_wav_to_bytes(&interleaved, 8000, 2).unwrap();
        let speech = read_speech_from_bytes(&wav).unwrap();

        assert_eq!(speech.source_channels, 2);
        assert_eq!(speech.samples, left);
    }

    #[test]
    fn test_raw_s16le() {
        let bytes = [0x00, 0x40, 0x00, 0xc0, 0xff, 0x7f];
        let speech = read_raw_s16le(&bytes, 8000).unwrap();

        assert_eq!(speech.samples, vec![0.5, -0.5, 32767.0 / 32768.0]);
        assert_eq!(speech.source_format, "RAW");
        assert!(read_raw_s16le(&bytes[..3], 8000).is_err());
    }

    #[test]
    fn test_summary_and_dump() {
        let samples = speech_like(8000, 0.5);
        let config = LpcConfig::default().with_frame_size(240);

        let dump = analyze_samples(&samples, 8000, config).unwrap();
        let summary = summarize(&dump);

        // 4000 = 16 * 240 + 160
        assert_eq!(summary.frame_count, 17);
        assert_eq!(summary.frames[16].samples, 160);
        assert_eq!(summary.frames[0].coeffs.len(), 11);
        assert!((summary.duration_secs - 0.5).abs() < 1e-9);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"frame_count\":17"));

        let bytes = dump.to_msgpack().unwrap();
        let restored = lpcx::LpcModelDump::from_msgpack(&bytes).unwrap();
        assert_eq!(synthesize(&restored).unwrap(), synthesize(&dump).unwrap());
    }

    #[test]
    fn test_snr() {
        let a = [1.0f32, -1.0, 1.0, -1.0];
        assert_eq!(snr_db(&a, &a), f32::INFINITY);

        let b = [1.1f32, -1.1, 1.1, -1.1];
        assert!((snr_db(&a, &b) - 20.0).abs() < 1e-3);
    }
}

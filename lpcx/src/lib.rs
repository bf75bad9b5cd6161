//! lpcx - LPC analysis and resynthesis of speech files
//!
//! Glue between audio files on disk and the liblpc streaming encoder/decoder.
//!

pub mod audio;

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;
use std::path::Path;

pub use liblpc::{LpcConfig, LpcModelDump};

/// Per-frame line of an analysis report
#[derive(Debug, Clone, Serialize)]
pub struct FrameSummary {
    pub index: u32,
    pub samples: u32,
    /// Prediction error energy in dB
    pub energy_db: f32,
    /// Residual RMS over the valid samples
    pub residual_rms: f32,
    pub coeffs: Vec<f32>,
}

/// Report of a whole analysis pass
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub sample_rate: u32,
    pub duration_secs: f64,
    pub order: usize,
    pub frame_size: usize,
    pub frame_count: usize,
    pub mean_energy_db: f32,
    pub frames: Vec<FrameSummary>,
}

/// Load an `LpcConfig` from a JSON file, or the defaults when no file is given
pub fn load_config(path: Option<&Path>) -> Result<LpcConfig> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path).context("Failed to read config file")?;
            LpcConfig::from_json(&json).map_err(|e| anyhow::anyhow!("{}", e))
        }
        None => Ok(LpcConfig::default()),
    }
}

/// Run the streaming encoder over a whole signal
pub fn analyze_samples(samples: &[f32], sample_rate: u32, config: LpcConfig) -> Result<LpcModelDump> {
    let mut encoder =
        liblpc::StreamingEncoder::new(config).map_err(|e| anyhow::anyhow!("Bad config: {}", e))?;
    encoder.push_samples(samples);
    let dump = encoder.finalize(sample_rate);

    info!(
        "analysed {} samples into {} frames (order {}, {} samples/frame)",
        samples.len(),
        dump.frames.len(),
        config.order,
        config.frame_size
    );
    Ok(dump)
}

/// Synthesize speech from a model dump
pub fn synthesize(dump: &LpcModelDump) -> Result<Vec<f32>> {
    liblpc::StreamingDecoder::decode_dump(dump)
        .map_err(|e| anyhow::anyhow!("Synthesis failed: {}", e))
}

/// Analysis followed by synthesis
pub fn resynthesize(samples: &[f32], sample_rate: u32, config: LpcConfig) -> Result<Vec<f32>> {
    let dump = analyze_samples(samples, sample_rate, config)?;
    synthesize(&dump)
}

/// Signal to noise ratio of `test` against `reference` in dB
///
/// Compares the overlapping prefix. Identical signals give `f32::INFINITY`.
pub fn snr_db(reference: &[f32], test: &[f32]) -> f32 {
    let mut signal = 0.0f64;
    let mut noise = 0.0f64;
    for (&r, &t) in reference.iter().zip(test) {
        signal += (r as f64) * (r as f64);
        noise += ((r - t) as f64) * ((r - t) as f64);
    }

    if noise == 0.0 {
        return f32::INFINITY;
    }
    if signal == 0.0 {
        return f32::NEG_INFINITY;
    }
    (10.0 * (signal / noise).log10()) as f32
}

/// Summarize a model dump for printing
pub fn summarize(dump: &LpcModelDump) -> AnalysisSummary {
    let frames: Vec<FrameSummary> = dump
        .frames
        .iter()
        .map(|frame| {
            let valid = frame
                .residual
                .get(..frame.samples as usize)
                .unwrap_or(&frame.residual[..]);
            let residual_rms = if valid.is_empty() {
                0.0
            } else {
                (valid.iter().map(|r| r * r).sum::<f32>() / valid.len() as f32).sqrt()
            };
            FrameSummary {
                index: frame.index,
                samples: frame.samples,
                energy_db: liblpc::lpc::power_to_db(&[frame.energy])[0],
                residual_rms,
                coeffs: frame.coeffs.to_vec(),
            }
        })
        .collect();

    let mean_energy_db = if frames.is_empty() {
        0.0
    } else {
        frames.iter().map(|f| f.energy_db).sum::<f32>() / frames.len() as f32
    };

    AnalysisSummary {
        sample_rate: dump.sample_rate,
        duration_secs: dump.duration_secs(),
        order: dump.config.order,
        frame_size: dump.config.frame_size,
        frame_count: frames.len(),
        mean_energy_db,
        frames,
    }
}

/// Write a model dump as MessagePack
pub fn write_dump(path: &Path, dump: &LpcModelDump) -> Result<()> {
    let bytes = dump.to_msgpack().context("Failed to serialize model dump")?;
    std::fs::write(path, bytes).context("Failed to write model dump")
}

/// Read a MessagePack model dump
pub fn read_dump(path: &Path) -> Result<LpcModelDump> {
    let bytes = std::fs::read(path).context("Failed to read model dump")?;
    LpcModelDump::from_msgpack(&bytes).context("Invalid model dump")
}

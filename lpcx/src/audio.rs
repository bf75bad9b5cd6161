use anyhow::{bail, Context, Result};
use liblpc::core::{f32_to_i16, i16_to_f32};
use log::debug;
use std::io::{Cursor, Write};
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Sample rate assumed for headerless `.raw` input
pub const RAW_SAMPLE_RATE: u32 = 8000;

/// Mono speech read from disk
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    /// Samples in [-1.0, 1.0]
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    /// Channels in the source file; only the first one is kept
    pub source_channels: usize,
    // Source format (e.g., "WAV", "FLAC", "RAW")
    pub source_format: String,
}

impl SpeechAudio {
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

fn is_raw(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("raw"))
        .unwrap_or(false)
}

/// Read a speech file, keeping the first channel
///
/// `.raw` files are headerless signed 16-bit little endian at
/// `RAW_SAMPLE_RATE`, everything else goes through symphonia.
pub fn read_speech_file(path: &Path) -> Result<SpeechAudio> {
    if is_raw(path) {
        let bytes = std::fs::read(path).context("Failed to read raw audio file")?;
        return read_raw_s16le(&bytes, RAW_SAMPLE_RATE);
    }

    let file = std::fs::File::open(path).context("Failed to open audio file")?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());
    read_from_source(mss, path.extension().and_then(|e| e.to_str()))
}

/// Read audio from bytes in any container symphonia understands
pub fn read_speech_from_bytes(bytes: &[u8]) -> Result<SpeechAudio> {
    let cursor = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());
    read_from_source(mss, None)
}

/// Decode headerless signed 16-bit little endian samples
pub fn read_raw_s16le(bytes: &[u8], sample_rate: u32) -> Result<SpeechAudio> {
    if bytes.len() % 2 != 0 {
        bail!("Raw audio has an odd number of bytes ({})", bytes.len());
    }

    let samples = bytes
        .chunks_exact(2)
        .map(|b| i16_to_f32(i16::from_le_bytes([b[0], b[1]])))
        .collect();

    Ok(SpeechAudio {
        samples,
        sample_rate,
        source_channels: 1,
        source_format: "RAW".to_string(),
    })
}

fn read_from_source(mss: MediaSourceStream, extension: Option<&str>) -> Result<SpeechAudio> {
    // Create hint from file extension
    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("Unsupported audio format")?;

    let mut format = probed.format;

    // Find the first audio track
    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .context("No audio track found")?;

    let source_format = extension.map(|ext| ext.to_uppercase()).unwrap_or_else(|| {
        match track.codec_params.codec {
            symphonia::core::codecs::CODEC_TYPE_FLAC => "FLAC",
            symphonia::core::codecs::CODEC_TYPE_PCM_S16LE
            | symphonia::core::codecs::CODEC_TYPE_PCM_S16BE
            | symphonia::core::codecs::CODEC_TYPE_PCM_S24LE
            | symphonia::core::codecs::CODEC_TYPE_PCM_S32LE
            | symphonia::core::codecs::CODEC_TYPE_PCM_F32LE => "WAV",
            symphonia::core::codecs::CODEC_TYPE_MP3 => "MP3",
            symphonia::core::codecs::CODEC_TYPE_VORBIS => "OGG",
            _ => "UNKNOWN",
        }
        .to_string()
    });

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .context("Unknown sample rate")?;
    let channels = track
        .codec_params
        .channels
        .context("Unknown channel count")?
        .count();

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .context("Failed to create decoder")?;

    let mut samples = Vec::new();

    // Decode all packets
    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break
            }
            Err(e) => return Err(e).context("Error reading packet"),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(symphonia::core::errors::Error::DecodeError(e)) => {
                debug!("skipping undecodable packet: {}", e);
                continue;
            }
            Err(e) => return Err(e).context("Error decoding packet"),
        };

        append_first_channel(&decoded, &mut samples);
    }

    Ok(SpeechAudio {
        samples,
        sample_rate,
        source_channels: channels,
        source_format,
    })
}

fn append_first_channel(buffer: &AudioBufferRef, samples: &mut Vec<f32>) {
    match buffer {
        AudioBufferRef::F32(buf) => {
            samples.extend_from_slice(buf.chan(0));
        }
        AudioBufferRef::F64(buf) => {
            samples.extend(buf.chan(0).iter().map(|&s| s as f32));
        }
        AudioBufferRef::S16(buf) => {
            samples.extend(buf.chan(0).iter().map(|&s| i16_to_f32(s)));
        }
        AudioBufferRef::S32(buf) => {
            let scale = 1.0 / 2147483648.0;
            samples.extend(buf.chan(0).iter().map(|&s| s as f32 * scale));
        }
        AudioBufferRef::S24(buf) => {
            let scale = 1.0 / 8388608.0;
            samples.extend(buf.chan(0).iter().map(|s| s.inner() as f32 * scale));
        }
        AudioBufferRef::S8(buf) => {
            samples.extend(buf.chan(0).iter().map(|&s| s as f32 / 128.0));
        }
        // Unsigned formats are offset binary
        AudioBufferRef::U8(buf) => {
            samples.extend(buf.chan(0).iter().map(|&s| (s as f32 - 128.0) / 128.0));
        }
        AudioBufferRef::U16(buf) => {
            samples.extend(buf.chan(0).iter().map(|&s| (s as f32 - 32768.0) / 32768.0));
        }
        AudioBufferRef::U24(buf) => {
            samples.extend(
                buf.chan(0)
                    .iter()
                    .map(|s| (s.inner() as f32 - 8388608.0) / 8388608.0),
            );
        }
        AudioBufferRef::U32(buf) => {
            samples.extend(
                buf.chan(0)
                    .iter()
                    .map(|&s| ((s as f64 - 2147483648.0) / 2147483648.0) as f32),
            );
        }
    }
}


/// Write mono samples as headerless signed 16-bit little endian
pub fn write_raw_s16le(path: &Path, samples: &[f32]) -> Result<()> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        bytes.extend_from_slice(&f32_to_i16(sample).to_le_bytes());
    }
    std::fs::write(path, bytes).context("Failed to write raw audio file")
}

/// Write mono samples, as raw s16le for `.raw` paths and 32-bit float WAV otherwise
pub fn write_speech_file(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    if is_raw(path) {
        return write_raw_s16le(path, samples);
    }
    let bytes = write_wav_to_bytes(samples, sample_rate, 1)?;
    std::fs::write(path, bytes).context("Failed to write WAV file")
}

/// Write samples to WAV format in memory
pub fn write_wav_to_bytes(samples: &[f32], sample_rate: u32, channels: usize) -> Result<Vec<u8>> {
    // WAV file format (RIFF)
    let mut buffer = Vec::new();

    let num_samples = samples.len();
    let bytes_per_sample = 4; // 32-bit float
    let data_size = num_samples * bytes_per_sample;
    let file_size = 36 + data_size; // 44 byte header - 8 + data_size

    // RIFF header
    buffer.write_all(b"RIFF")?;
    buffer.write_all(&(file_size as u32).to_le_bytes())?;
    buffer.write_all(b"WAVE")?;

    // fmt chunk
    buffer.write_all(b"fmt ")?;
    buffer.write_all(&16u32.to_le_bytes())?; // chunk size
    buffer.write_all(&3u16.to_le_bytes())?; // format = IEEE float
    buffer.write_all(&(channels as u16).to_le_bytes())?;
    buffer.write_all(&sample_rate.to_le_bytes())?;
    let byte_rate = sample_rate * channels as u32 * bytes_per_sample as u32;
    buffer.write_all(&byte_rate.to_le_bytes())?;
    let block_align = channels as u16 * bytes_per_sample as u16;
    buffer.write_all(&block_align.to_le_bytes())?;
    buffer.write_all(&32u16.to_le_bytes())?; // bits per sample

    // data chunk
    buffer.write_all(b"data")?;
    buffer.write_all(&(data_size as u32).to_le_bytes())?;

    for &sample in samples {
        buffer.write_all(&sample.to_le_bytes())?;
    }

    Ok(buffer)
}

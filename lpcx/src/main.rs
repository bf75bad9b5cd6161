use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lpcx::audio;
use lpcx::{AnalysisSummary, LpcConfig};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lpcx")]
#[command(version)]
#[command(about = "LPC speech analysis and resynthesis", long_about = None)]
struct Cli {
    /// LPC options as JSON (order, frame_size, gamma, emphasis)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a speech file and print its LPC model
    Analyze {
        /// Input audio file (wav, flac, mp3, ogg or 8 kHz s16le .raw)
        input: PathBuf,
        /// LPC order (0-20)
        #[arg(short, long)]
        order: Option<usize>,
        /// Samples per frame (2-511)
        #[arg(short, long)]
        frame_size: Option<usize>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Also write a MessagePack model dump
        #[arg(long)]
        dump: Option<PathBuf>,
    },
    /// Analyse and resynthesize a speech file
    Resynth {
        /// Input audio file
        input: PathBuf,
        /// Output file (.wav or .raw)
        output: PathBuf,
        /// LPC order (0-20)
        #[arg(short, long)]
        order: Option<usize>,
        /// Samples per frame (2-511)
        #[arg(short, long)]
        frame_size: Option<usize>,
        /// Bandwidth expansion before synthesis (0-1)
        #[arg(short, long)]
        gamma: Option<f32>,
        /// Skip pre-emphasis and de-emphasis
        #[arg(long)]
        no_emphasis: bool,
    },
    /// Synthesize speech from a model dump
    Synth {
        /// Input model dump written by `analyze --dump`
        input: PathBuf,
        /// Output file (.wav or .raw)
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let base = lpcx::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            input,
            order,
            frame_size,
            json,
            dump,
        } => {
            let config = apply_overrides(base, order, frame_size, None, false);
            analyze(&input, config, json, dump.as_deref())?;
        }
        Commands::Resynth {
            input,
            output,
            order,
            frame_size,
            gamma,
            no_emphasis,
        } => {
            let config = apply_overrides(base, order, frame_size, gamma, no_emphasis);
            resynth(&input, &output, config)?;
        }
        Commands::Synth { input, output } => {
            synth(&input, &output)?;
        }
    }

    Ok(())
}

fn apply_overrides(
    mut config: LpcConfig,
    order: Option<usize>,
    frame_size: Option<usize>,
    gamma: Option<f32>,
    no_emphasis: bool,
) -> LpcConfig {
    if let Some(order) = order {
        config = config.with_order(order);
    }
    if let Some(frame_size) = frame_size {
        config = config.with_frame_size(frame_size);
    }
    if let Some(gamma) = gamma {
        config = config.with_gamma(gamma);
    }
    if no_emphasis {
        config = config.with_emphasis(false);
    }
    config
}

fn read_input(input: &Path) -> Result<audio::SpeechAudio> {
    println!("Reading {}...", input.display());

    let speech = audio::read_speech_file(input).context("Failed to read audio file")?;

    println!("  Format:      {}", speech.source_format);
    println!("  Sample rate: {} Hz", speech.sample_rate);
    if speech.source_channels > 1 {
        println!(
            "  Channels:    {} (using first)",
            speech.source_channels
        );
    }
    println!("  Duration:    {:.2}s", speech.duration_secs());

    Ok(speech)
}

fn analyze(input: &Path, config: LpcConfig, json: bool, dump_path: Option<&Path>) -> Result<()> {
    let speech = if json {
        audio::read_speech_file(input).context("Failed to read audio file")?
    } else {
        read_input(input)?
    };

    let dump = lpcx::analyze_samples(&speech.samples, speech.sample_rate, config)?;
    let summary = lpcx::summarize(&dump);

    if json {
        let json_str =
            serde_json::to_string_pretty(&summary).context("Failed to serialize analysis")?;
        println!("{}", json_str);
    } else {
        print_summary(&summary);
    }

    if let Some(path) = dump_path {
        lpcx::write_dump(path, &dump)?;
        if !json {
            println!("Model dump written to {}", path.display());
        }
    }

    Ok(())
}

fn print_summary(summary: &AnalysisSummary) {
    println!();
    println!("LPC Analysis");
    println!("───────────────────────────────");
    println!("  Order:       {}", summary.order);
    println!("  Frame size:  {} samples", summary.frame_size);
    println!("  Frames:      {}", summary.frame_count);
    println!("  Mean energy: {:.1} dB", summary.mean_energy_db);
    println!();
    println!("  frame  energy(dB)  res rms   a[1..]");

    for frame in &summary.frames {
        let coeffs: Vec<String> = frame
            .coeffs
            .iter()
            .skip(1)
            .map(|c| format!("{:+.3}", c))
            .collect();
        println!(
            "  {:>5}  {:>10.1}  {:>7.4}   {}",
            frame.index,
            frame.energy_db,
            frame.residual_rms,
            coeffs.join(" ")
        );
    }
}

fn resynth(input: &Path, output: &Path, config: LpcConfig) -> Result<()> {
    let speech = read_input(input)?;

    println!(
        "Resynthesizing (order {}, {} samples/frame, gamma {:.2}, emphasis {})...",
        config.order,
        config.frame_size,
        config.gamma,
        if config.emphasis { "on" } else { "off" }
    );

    let rebuilt = lpcx::resynthesize(&speech.samples, speech.sample_rate, config)?;
    let snr = lpcx::snr_db(&speech.samples, &rebuilt);

    audio::write_speech_file(output, &rebuilt, speech.sample_rate)?;

    println!("Done!");
    println!("  Output: {}", output.display());
    println!("  SNR:    {:.2} dB", snr);

    Ok(())
}

fn synth(input: &Path, output: &Path) -> Result<()> {
    println!("Reading {}...", input.display());

    let dump = lpcx::read_dump(input)?;

    println!("  Sample rate: {} Hz", dump.sample_rate);
    println!("  Frames:      {}", dump.frames.len());
    println!("  Duration:    {:.2}s", dump.duration_secs());

    println!("Synthesizing...");

    let samples = lpcx::synthesize(&dump)?;
    audio::write_speech_file(output, &samples, dump.sample_rate)?;

    println!("Done!");
    println!("  Output: {}", output.display());

    Ok(())
}

//! chorus — batch generator for synthetic overlapping-vocalization datasets
//!
//! Reads annotated source recordings, synthesizes the requested number of
//! fixed-length output files, and writes each one as WAV plus TextGrid.
//! Per-file failures are logged and the batch keeps going.

mod settings;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use chorus_file::{
    InputPair, read_audio, read_textgrid, scan_input_pairs, write_textgrid, write_wav,
};
use chorus_synth::{SynthesisEngine, SynthesisError};

use crate::settings::Settings;

/// Generate synthetic overlapping-vocalization recordings with matching
/// TextGrid annotations.
#[derive(Debug, Parser)]
#[command(name = "chorus", version, about)]
struct Args {
    /// Settings file
    #[arg(short, long, default_value = "chorus.toml")]
    config: PathBuf,

    /// Override the random seed from the settings file
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of files to generate
    #[arg(long)]
    num_files: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Settings::load(&args.config)?;

    env_logger::Builder::new()
        .filter_level(settings.log_level())
        .init();

    log::info!("starting vocalization synthesis");

    let pairs = scan_input_pairs(
        &settings.paths.input_wav_dir,
        &settings.paths.input_textgrid_dir,
    )?;
    if pairs.is_empty() {
        anyhow::bail!("no paired input files found");
    }

    fs::create_dir_all(&settings.paths.output_wav_dir).with_context(|| {
        format!(
            "cannot create output directory {}",
            settings.paths.output_wav_dir.display()
        )
    })?;
    fs::create_dir_all(&settings.paths.output_textgrid_dir).with_context(|| {
        format!(
            "cannot create output directory {}",
            settings.paths.output_textgrid_dir.display()
        )
    })?;

    let effects = settings.effects_config();
    if effects.is_empty() {
        log::info!("audio effects disabled");
    } else {
        for effect in effects.chain() {
            log::info!("audio effect enabled: {effect:?}");
        }
    }

    let seed = args.seed.unwrap_or(settings.synthesis.random_seed);
    let num_files = args
        .num_files
        .unwrap_or(settings.synthesis.num_synthetic_files);
    let mut engine = SynthesisEngine::new(
        settings.synthesis_config(),
        &effects,
        settings.audio.sample_rate,
        seed,
    );

    let mut created = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    for index in 1..=num_files {
        // The file choice consumes the shared generator, so a seed pins the
        // whole batch, not just each file's contents.
        let Some(pair) = engine.pick_random(&pairs) else {
            break;
        };
        match synthesize_one(&mut engine, pair, &settings, index) {
            Ok(true) => {
                created += 1;
                log::info!("created synthetic file {index}/{num_files}");
            }
            Ok(false) => {
                skipped += 1;
                log::warn!(
                    "skipping synthetic file {index}/{num_files}: no usable segments in '{}'",
                    pair.stem
                );
            }
            Err(e) => {
                failed += 1;
                log::error!("failed to create synthetic file {index}/{num_files}: {e:#}");
            }
        }
    }

    log::info!("vocalization synthesis complete: {created} created, {skipped} skipped, {failed} failed");
    Ok(())
}

/// Synthesize and write one output file.
///
/// Returns `Ok(false)` when the source yielded no usable segments; the
/// batch skips that file and continues.
fn synthesize_one(
    engine: &mut SynthesisEngine,
    pair: &InputPair,
    settings: &Settings,
    index: usize,
) -> anyhow::Result<bool> {
    log::debug!("selected source pair '{}'", pair.stem);
    let audio = read_audio(&pair.audio)?;
    let annotation = read_textgrid(&pair.annotation)?;

    let output = match engine.synthesize(&audio, &annotation) {
        Ok(output) => output,
        Err(SynthesisError::NoSegments) => return Ok(false),
        Err(e) => return Err(e.into()),
    };

    let prefix = &settings.output.file_prefix;
    let wav_path = settings
        .paths
        .output_wav_dir
        .join(format!("{prefix}{index}.wav"));
    let grid_path = settings
        .paths
        .output_textgrid_dir
        .join(format!("{prefix}{index}.TextGrid"));
    write_wav(&wav_path, &output.audio)?;
    write_textgrid(&grid_path, &output.annotation)?;
    Ok(true)
}

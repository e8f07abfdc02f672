use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use aligngrid_core::alignment::domain::decoder_config::DecoderConfig;
use aligngrid_core::alignment::infrastructure::mlf_decoder::MlfDecoder;
use aligngrid_core::annotation::domain::grid::Grid;
use aligngrid_core::evaluation::domain::boundary_agreement::{AgreementReport, BoundaryAgreement};
use aligngrid_core::pipeline::convert_alignments_use_case::ConvertAlignmentsUseCase;
use aligngrid_core::pipeline::evaluate_boundaries_use_case::EvaluateBoundariesUseCase;
use aligngrid_core::pipeline::infrastructure::threaded_pipeline_executor::ThreadedPipelineExecutor;
use aligngrid_core::pipeline::pipeline_executor::{PipelineExecutor, SequentialPipelineExecutor};
use aligngrid_core::pipeline::pipeline_logger::LogPipelineLogger;
use aligngrid_core::shared::constants::{
    DEFAULT_EVALUATION_TIER, DEFAULT_TICKS_PER_SECOND, DEFAULT_TOLERANCE_MS, SHORT_PAUSE_LABEL,
};
use aligngrid_core::textgrid::domain::grid_reader::GridReader;
use aligngrid_core::textgrid::infrastructure::praat_text_reader::PraatTextReader;
use aligngrid_core::textgrid::infrastructure::praat_text_writer::PraatTextWriter;

/// Convert forced alignments to Praat TextGrids and score boundary agreement.
#[derive(Parser)]
#[command(name = "aligngrid", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write one TextGrid per utterance of an HTK master label file.
    Convert {
        /// Input MLF file.
        mlf: PathBuf,

        /// Directory for the TextGrid files (created if missing).
        out_dir: PathBuf,

        /// Alignment time units per second.
        #[arg(long, default_value_t = DEFAULT_TICKS_PER_SECOND)]
        ticks_per_second: f64,

        /// Phone label that separates words.
        #[arg(long, default_value = SHORT_PAUSE_LABEL)]
        short_pause: String,

        /// Start a new word at every word-initial record, even when it
        /// repeats the previous word's label.
        #[arg(long)]
        no_merge_repeated_words: bool,

        /// Number of writer threads (1 = write inline).
        #[arg(long, default_value = "1")]
        jobs: usize,
    },

    /// Count boundaries two TextGrids agree on within a tolerance.
    Evaluate {
        first: PathBuf,
        second: PathBuf,

        /// Interval tier to compare.
        #[arg(long, default_value = DEFAULT_EVALUATION_TIER)]
        tier: String,

        /// Largest boundary offset still counted as agreement, in ms.
        #[arg(long, default_value_t = DEFAULT_TOLERANCE_MS)]
        tolerance_ms: f64,

        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print a TextGrid's tiers, bounds and sizes.
    Inspect { textgrid: PathBuf },
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {
        Command::Convert {
            mlf,
            out_dir,
            ticks_per_second,
            short_pause,
            no_merge_repeated_words,
            jobs,
        } => {
            let config = DecoderConfig {
                ticks_per_second,
                short_pause_label: short_pause,
                merge_repeated_words: !no_merge_repeated_words,
                ..DecoderConfig::default()
            };
            run_convert(&mlf, &out_dir, config, jobs)
        }
        Command::Evaluate {
            first,
            second,
            tier,
            tolerance_ms,
            json,
        } => run_evaluate(&first, &second, tier, tolerance_ms, json),
        Command::Inspect { textgrid } => run_inspect(&textgrid),
    }
}

fn run_convert(
    mlf: &Path,
    out_dir: &Path,
    config: DecoderConfig,
    jobs: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    if jobs == 0 {
        return Err("--jobs must be at least 1".into());
    }
    let decoder = MlfDecoder::open(mlf, config)?;
    let executor: Box<dyn PipelineExecutor> = if jobs > 1 {
        Box::new(ThreadedPipelineExecutor::new(jobs))
    } else {
        Box::new(SequentialPipelineExecutor)
    };

    let mut use_case = ConvertAlignmentsUseCase::new(
        Box::new(PraatTextWriter::new()),
        executor,
        Box::new(LogPipelineLogger::default()),
    );
    let summary = use_case.execute(decoder, out_dir)?;
    log::info!(
        "Output written to {} ({} files)",
        out_dir.display(),
        summary.written
    );
    Ok(())
}

fn run_evaluate(
    first: &Path,
    second: &Path,
    tier: String,
    tolerance_ms: f64,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let use_case = EvaluateBoundariesUseCase::new(
        Box::new(PraatTextReader::new()),
        BoundaryAgreement::new(tier, tolerance_ms)?,
    );
    let report = use_case.execute(first, second)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", render_report(&report));
    }
    Ok(())
}

fn run_inspect(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let grid = PraatTextReader::new().read_path(path)?;
    println!("{}", render_inspection(path, &grid));
    Ok(())
}

fn render_report(report: &AgreementReport) -> String {
    let agreement = match report.agreement() {
        Some(value) => format!("{value:.4}"),
        None => "n/a (no boundaries)".to_string(),
    };
    format!(
        "{} \"close enough\" boundaries, {} incorrect boundaries\nAgreement: {agreement}",
        report.concordant, report.discordant
    )
}

fn render_inspection(path: &Path, grid: &Grid) -> String {
    let (min, max) = grid.bounds();
    let mut lines = vec![
        path.display().to_string(),
        format!("  xmin = {min:.6}, xmax = {max:.6}, {} tier(s)", grid.len()),
    ];
    for (i, tier) in grid.iter().enumerate() {
        let (tier_min, tier_max) = tier.bounds();
        lines.push(format!(
            "  [{}] {} \"{}\" {tier_min:.6}-{tier_max:.6}, {} item(s)",
            i + 1,
            tier.kind().tag(),
            tier.name().unwrap_or_default(),
            tier.len()
        ));
    }
    lines.join("\n")
}

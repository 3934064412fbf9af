//! Subcommand handlers for the pitch-path binary.

use crate::cli::{Cli, Commands, ConfigCommands, GlobalOpts};
use crate::exit_codes::ExitCode;
use crate::processor::{PitcherProcessor, PitcherReport, PitcherSummary};
use crate::segment::SegmentedTable;
use crate::table::{features_to_batch, pivot_long, segmented_to_batch, trajectory_from_batches};
use chrono::Utc;
use pp_common::{Error, OutputFormat, PitcherId, Result, ScheduleId, SCHEMA_VERSION};
use pp_config::validate::validate_pipeline;
use pp_config::{
    resolve_config, resolve::load_pipeline, ConfigPaths, ConfigSnapshot, FailurePolicy,
    ResolvedConfig,
};
use pp_store::{
    read_long_trajectory, read_table, OutputLayout, TableName, TableWriter, WriterConfig,
};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One pitcher's outputs.
#[derive(Debug, Clone, Serialize)]
pub struct PitcherOutput {
    #[serde(flatten)]
    pub summary: PitcherSummary,
    pub processed_path: Option<PathBuf>,
    pub features_path: PathBuf,
}

/// Report printed on stdout after `process` or `features`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub schema_version: String,
    pub command: String,
    pub generated_at: String,
    pub input: PathBuf,
    pub pipeline_source: String,
    pub failure_policy: FailurePolicy,
    pub pitchers: Vec<PitcherOutput>,
}

impl RunSummary {
    fn new(command: &str, input: &Path, resolved: &ResolvedConfig) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            command: command.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            input: input.to_path_buf(),
            pipeline_source: resolved.pipeline_source.to_string(),
            failure_policy: resolved.pipeline.failure_policy,
            pitchers: Vec::new(),
        }
    }

    pub fn skipped_pitches(&self) -> usize {
        self.pitchers.iter().map(|p| p.summary.skipped.len()).sum()
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.skipped_pitches() > 0 {
            ExitCode::PartialSkip
        } else {
            ExitCode::Clean
        }
    }

    fn print(&self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(self)?),
            OutputFormat::Summary => {
                println!(
                    "# {} {} ({} pitchers, {} skipped pitches)",
                    self.command,
                    self.input.display(),
                    self.pitchers.len(),
                    self.skipped_pitches()
                );
                for p in &self.pitchers {
                    let s = &p.summary;
                    println!(
                        "  pitcher {} sched {}: throws {}, {} feature rows, {} skipped -> {}",
                        s.pitcher_id,
                        s.schedule_id,
                        s.throwing_side,
                        s.feature_rows,
                        s.skipped.len(),
                        p.features_path.display()
                    );
                    for skip in &s.skipped {
                        println!("    skipped pitch {} ({}): {}", skip.pitch_id, skip.stage, skip.reason);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: &Cli) -> ExitCode {
    let global = &cli.global;
    let result = match &cli.command {
        Commands::Process {
            input,
            output_root,
            overwrite,
            skip_invalid,
        } => run_process(global, input, output_root, *overwrite, *skip_invalid)
            .and_then(|summary| {
                summary.print(global.format)?;
                Ok(summary.exit_code())
            }),
        Commands::Features {
            processed,
            output_root,
            overwrite,
            skip_invalid,
        } => run_features(global, processed, output_root, *overwrite, *skip_invalid).and_then(
            |summary| {
                summary.print(global.format)?;
                Ok(summary.exit_code())
            },
        ),
        Commands::Config(args) => match &args.command {
            ConfigCommands::Show => run_config_show(global),
            ConfigCommands::Validate { path } => run_config_validate(global, path.as_deref()),
        },
    };
    result.unwrap_or_else(|err| report_error(global.format, &err))
}

fn report_error(format: OutputFormat, err: &Error) -> ExitCode {
    let code = ExitCode::from(err);
    match format {
        OutputFormat::Json => {
            let doc = json!({
                "error": {
                    "code": err.code(),
                    "message": err.to_string(),
                    "pitch_id": err.pitch_id(),
                }
            });
            println!("{doc:#}");
        }
        OutputFormat::Summary => eprintln!("error: {err}"),
    }
    code
}

/// Resolve configuration and apply command-line overrides.
fn load_config(global: &GlobalOpts, skip_invalid: bool) -> Result<ResolvedConfig> {
    let mut resolved = resolve_config(&ConfigPaths {
        pipeline: global.config.clone(),
        joints: global.joints.clone(),
    })?;
    if let Some(window) = global.window {
        resolved.pipeline.window = window;
    }
    if skip_invalid {
        resolved.pipeline.failure_policy = FailurePolicy::SkipAndLog;
    }
    validate_pipeline(&resolved.pipeline).map_err(|errors| {
        Error::Config(
            errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    })?;
    debug!(
        pipeline = %resolved.pipeline_source,
        catalog = %resolved.catalog_source,
        window = resolved.pipeline.window,
        policy = %resolved.pipeline.failure_policy,
        "configuration resolved"
    );
    Ok(resolved)
}

fn writer(overwrite: bool) -> TableWriter {
    TableWriter::new(WriterConfig::default().with_overwrite(overwrite))
}

/// Refuse to start when any target exists, so a rerun never leaves a mix of
/// old and new outputs behind.
fn ensure_writable(paths: &[PathBuf], overwrite: bool) -> Result<()> {
    if overwrite {
        return Ok(());
    }
    match paths.iter().find(|p| p.exists()) {
        Some(path) => Err(Error::OutputExists { path: path.clone() }),
        None => Ok(()),
    }
}

fn write_features(
    report: &PitcherReport,
    layout: &OutputLayout,
    writer: &TableWriter,
    snapshot: &str,
) -> Result<PathBuf> {
    let path = layout.path_for(
        TableName::PitcherFeatures,
        report.schedule_id.0,
        report.pitcher_id.0,
    );
    let batch = TableWriter::annotate(
        features_to_batch(&report.features)?,
        TableName::PitcherFeatures,
        Some(snapshot),
    )?;
    writer.write(&path, &batch)?;
    Ok(path)
}

fn run_process(
    global: &GlobalOpts,
    input: &Path,
    output_root: &Path,
    overwrite: bool,
    skip_invalid: bool,
) -> Result<RunSummary> {
    let resolved = load_config(global, skip_invalid)?;
    let snapshot = ConfigSnapshot::from_resolved(&resolved).to_json()?;

    let samples = read_long_trajectory(input)?;
    let (table, stats) = pivot_long(&samples, &resolved.catalog)?;
    info!(
        input = %input.display(),
        samples = stats.samples,
        rows = stats.rows,
        dropped = stats.unknown_joint_samples,
        "capture loaded"
    );

    let layout = OutputLayout::new(output_root);
    let parts = table.split_by_pitcher();
    let targets: Vec<PathBuf> = parts
        .iter()
        .flat_map(|((sched, pitcher), _)| {
            [TableName::Processed, TableName::PitcherFeatures]
                .map(|t| layout.path_for(t, sched.0, pitcher.0))
        })
        .collect();
    ensure_writable(&targets, overwrite)?;

    let processor = PitcherProcessor::new(resolved.pipeline.clone());
    let writer = writer(overwrite);
    let mut summary = RunSummary::new("process", input, &resolved);
    for (_, part) in parts {
        let report = processor.process(&part)?;
        let processed_path = layout.path_for(
            TableName::Processed,
            report.schedule_id.0,
            report.pitcher_id.0,
        );
        let batch = TableWriter::annotate(
            segmented_to_batch(&report.segmented)?,
            TableName::Processed,
            Some(&snapshot),
        )?;
        writer.write(&processed_path, &batch)?;
        let features_path = write_features(&report, &layout, &writer, &snapshot)?;
        summary.pitchers.push(PitcherOutput {
            summary: report.summary(),
            processed_path: Some(processed_path),
            features_path,
        });
    }
    Ok(summary)
}

fn run_features(
    global: &GlobalOpts,
    processed: &Path,
    output_root: &Path,
    overwrite: bool,
    skip_invalid: bool,
) -> Result<RunSummary> {
    let resolved = load_config(global, skip_invalid)?;
    let snapshot = ConfigSnapshot::from_resolved(&resolved).to_json()?;

    let stored = read_table(processed)?;
    if let Some(producer) = stored.config_snapshot() {
        debug!(producer, "processed table carries a config snapshot");
    }
    let table = trajectory_from_batches(&stored.batches)?;

    let layout = OutputLayout::new(output_root);
    let parts: Vec<((ScheduleId, PitcherId), _)> = table.split_by_pitcher();
    let targets: Vec<PathBuf> = parts
        .iter()
        .map(|((sched, pitcher), _)| layout.path_for(TableName::PitcherFeatures, sched.0, pitcher.0))
        .collect();
    ensure_writable(&targets, overwrite)?;

    let processor = PitcherProcessor::new(resolved.pipeline.clone());
    let writer = writer(overwrite);
    let mut summary = RunSummary::new("features", processed, &resolved);
    for (_, part) in parts {
        let report = processor.process_segmented(&SegmentedTable::from_processed(part))?;
        let features_path = write_features(&report, &layout, &writer, &snapshot)?;
        summary.pitchers.push(PitcherOutput {
            summary: report.summary(),
            processed_path: None,
            features_path,
        });
    }
    Ok(summary)
}

fn run_config_show(global: &GlobalOpts) -> Result<ExitCode> {
    let resolved = load_config(global, false)?;
    match global.format {
        OutputFormat::Json => {
            let doc = json!({
                "snapshot": serde_json::to_value(ConfigSnapshot::from_resolved(&resolved))?,
                "joints": serde_json::to_value(resolved.catalog.entries())?,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Summary => {
            println!("# pipeline ({})", resolved.pipeline_source);
            println!("{}", resolved.pipeline.to_json_pretty()?);
            println!(
                "# joint catalog ({}, {} joints)",
                resolved.catalog_source,
                resolved.catalog.len()
            );
            for entry in resolved.catalog.entries() {
                println!("  {:>3}  {}", entry.joint_type_id, entry.name);
            }
        }
    }
    Ok(ExitCode::Clean)
}

fn run_config_validate(global: &GlobalOpts, path: Option<&Path>) -> Result<ExitCode> {
    let (pipeline, source) = match path.or(global.config.as_deref()) {
        Some(p) => (load_pipeline(p)?, p.display().to_string()),
        None => {
            let resolved = load_config(global, false)?;
            (resolved.pipeline, resolved.pipeline_source.to_string())
        }
    };
    let problems: Vec<(String, String)> = match validate_pipeline(&pipeline) {
        Ok(()) => Vec::new(),
        Err(errors) => errors.into_iter().map(|e| (e.field, e.message)).collect(),
    };
    match global.format {
        OutputFormat::Json => {
            let doc = json!({
                "source": source,
                "valid": problems.is_empty(),
                "errors": problems
                    .iter()
                    .map(|(field, message)| json!({"field": field, "message": message}))
                    .collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Summary => {
            if problems.is_empty() {
                println!("{source}: ok");
            }
            for (field, message) in &problems {
                println!("{source}: {field}: {message}");
            }
        }
    }
    Ok(if problems.is_empty() {
        ExitCode::Clean
    } else {
        ExitCode::ConfigError
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_writable_refuses_existing() {
        let dir = tempdir().expect("tempdir");
        let existing = dir.path().join("a.parquet");
        std::fs::write(&existing, b"x").unwrap();
        let missing = dir.path().join("b.parquet");

        let err = ensure_writable(&[missing.clone(), existing.clone()], false).unwrap_err();
        assert!(matches!(err, Error::OutputExists { path } if path == existing));
        assert!(ensure_writable(&[existing], true).is_ok());
        assert!(ensure_writable(&[missing], false).is_ok());
    }
}

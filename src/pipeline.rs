use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

use crate::{
    cli::ShiftCmd,
    config::Config,
    model::Document,
    shift::{Direction, transform_with_progress},
};

/// Effective settings for one batch: command line over config.
#[derive(Debug, Clone)]
pub struct ShiftSettings {
    pub offset_ms: i64,
    pub direction: Direction,
    pub prefix: String,
    pub output_dir: Option<PathBuf>,
    pub overwrite: bool,
    pub to_stdout: bool,
}

impl ShiftSettings {
    pub fn resolve(cmd: &ShiftCmd, cfg: &Config) -> Self {
        Self {
            offset_ms: cmd.offset_ms.unwrap_or(cfg.shift.offset_ms),
            direction: cmd.direction.unwrap_or(cfg.shift.direction),
            prefix: cmd
                .prefix
                .clone()
                .unwrap_or_else(|| cfg.output.prefix.clone()),
            output_dir: cmd.output_dir.clone(),
            overwrite: cmd.overwrite || cfg.output.overwrite,
            to_stdout: cmd.stdout,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Ok,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub input: String,
    pub status: FileStatus,
    pub cues: usize,
    pub skipped_blocks: usize,
    pub output: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub offset_ms: i64,
    pub direction: Direction,
    pub files: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status == FileStatus::Failed)
            .count()
    }
}

pub fn run_shift(cmd: ShiftCmd, cfg: &Config) -> Result<()> {
    cmd.validate()?;
    let settings = ShiftSettings::resolve(&cmd, cfg);
    tracing::info!(
        files = cmd.inputs.len(),
        offset_ms = settings.offset_ms,
        direction = ?settings.direction,
        "shift requested"
    );

    if let Some(dir) = &settings.output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed creating output directory: {}", dir.display()))?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = shift_batch(&cmd.inputs, &settings, cfg, &mut out);

    if cmd.json {
        let s = serde_json::to_string_pretty(&report)?;
        writeln!(out, "{s}")?;
    }

    let failed = report.failed();
    if failed > 0 {
        return Err(anyhow!(
            "{failed} of {} files failed to shift",
            report.files.len()
        ));
    }

    Ok(())
}

/// Shift every input in order. A failing file is recorded and the batch
/// moves on to the next one.
pub fn shift_batch(
    inputs: &[String],
    settings: &ShiftSettings,
    cfg: &Config,
    out: &mut dyn Write,
) -> BatchReport {
    let pb = ProgressBar::new(inputs.len() as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
        pb.set_style(style);
    }

    let mut files = Vec::with_capacity(inputs.len());

    for input in inputs {
        let span = tracing::info_span!("shift", input = input.as_str());
        let _g = span.enter();

        let outcome = match shift_one(input, settings, cfg, out, &pb) {
            Ok((doc, path)) => {
                match &path {
                    Some(p) => tracing::info!(path = %p.display(), "wrote output file"),
                    None => tracing::info!(mode = "stdout", "wrote output"),
                }
                FileOutcome {
                    input: input.clone(),
                    status: FileStatus::Ok,
                    cues: doc.len(),
                    skipped_blocks: doc.stats.skipped,
                    output: path.map(|p| p.to_string_lossy().to_string()),
                    error: None,
                }
            }
            Err(e) => {
                let msg = format!("{e:#}");
                tracing::error!(error = msg.as_str(), "failed to shift file");
                FileOutcome {
                    input: input.clone(),
                    status: FileStatus::Failed,
                    cues: 0,
                    skipped_blocks: 0,
                    output: None,
                    error: Some(msg),
                }
            }
        };

        files.push(outcome);
        pb.inc(1);
    }

    pb.finish_and_clear();

    BatchReport {
        offset_ms: settings.offset_ms,
        direction: settings.direction,
        files,
    }
}

fn shift_one(
    input: &str,
    settings: &ShiftSettings,
    cfg: &Config,
    out: &mut dyn Write,
    pb: &ProgressBar,
) -> Result<(Document, Option<PathBuf>)> {
    if input != "-" && !has_srt_extension(input) {
        return Err(anyhow!("{input} is not a .srt file"));
    }

    let raw = read_input_to_string(input)?;
    tracing::info!(bytes = raw.len(), "read input");

    let shifted = transform_with_progress(&raw, settings.offset_ms, settings.direction, |stage| {
        pb.set_message(format!("{input}: {}", stage.label()));
        tracing::debug!(stage = stage.label(), percent = stage.percent(), "stage complete");
    })
    .with_context(|| format!("failed shifting {input}"))?;

    log_document_summary(&shifted.document, cfg);

    if settings.to_stdout {
        out.write_all(shifted.output.as_bytes())?;
        out.flush()?;
        return Ok((shifted.document, None));
    }

    let out_path = derive_output_path(input, settings)?;
    write_output(&out_path, &shifted.output, settings.overwrite)?;

    Ok((shifted.document, Some(out_path)))
}

fn has_srt_extension(input: &str) -> bool {
    Path::new(input)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("srt"))
}

fn read_input_to_string(input: &str) -> Result<String> {
    let bytes = if input == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed reading stdin")?;
        buf
    } else {
        fs::read(input).with_context(|| format!("failed reading input file: {input}"))?
    };

    String::from_utf8(bytes).with_context(|| format!("input is not valid UTF-8: {input}"))
}

fn log_document_summary(doc: &Document, cfg: &Config) {
    tracing::info!(
        cues = doc.len(),
        blocks = doc.stats.blocks,
        skipped = doc.stats.skipped,
        "document summary"
    );

    if doc.stats.skipped > 0 {
        tracing::warn!(skipped = doc.stats.skipped, "dropped malformed SRT blocks");
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        let n = cfg.logging.debug_cue_samples.min(doc.len());
        for (i, c) in doc.cues.iter().take(n).enumerate() {
            tracing::debug!(
                idx = i,
                id = c.sequence_id,
                start = c.start.as_str(),
                end = c.end.as_str(),
                chars = c.text.chars().count(),
                "cue sample"
            );
        }
    }
}

fn derive_output_path(input: &str, settings: &ShiftSettings) -> Result<PathBuf> {
    if input == "-" {
        let dir = settings.output_dir.as_deref().ok_or_else(|| {
            anyhow!("--output-dir required when input is stdin and --stdout is not set")
        })?;
        return Ok(dir.join(format!("{}stdin.srt", settings.prefix)));
    }

    let p = Path::new(input);
    let name = p
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("bad input filename: {input}"))?;

    let parent = match &settings.output_dir {
        Some(dir) => dir.as_path(),
        None => p.parent().unwrap_or_else(|| Path::new(".")),
    };
    Ok(parent.join(format!("{}{name}", settings.prefix)))
}

fn write_output(path: &Path, data: &str, overwrite: bool) -> Result<()> {
    if path.exists() && !overwrite {
        return Err(anyhow!(
            "refusing to overwrite existing file (pass --overwrite): {}",
            path.display()
        ));
    }
    fs::write(path, data).with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

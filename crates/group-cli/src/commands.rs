//! Command implementations for the group packager CLI.
//!
//! Handles:
//! - pack: one JSON payload in, one grouped payload out
//! - batch: JSON Lines in, JSON Lines out
//! - show-config: effective settings as TOML

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Stdout, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use group_packager::pack;
use group_types::{InputPayload, OutputPayload, Settings};
use tempfile::NamedTempFile;

/// Load settings and apply CLI overrides (highest precedence).
pub fn load_settings(config_path: Option<&str>, log_level_override: Option<&str>) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;

    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }

    Ok(settings)
}

/// Install the global tracing subscriber.
///
/// Logs go to stderr so stdout carries only JSON. `RUST_LOG` wins over the
/// configured level.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Open the input file, or stdin when no path is given.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input file {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Destination for packaged output.
///
/// File output is staged in a temp file next to the target and only
/// replaces it on [`OutputSink::commit`]. Dropping an uncommitted sink
/// leaves the target untouched, which also makes `--input x --output x` safe.
pub enum OutputSink {
    Stdout(BufWriter<Stdout>),
    File {
        staged: BufWriter<NamedTempFile>,
        target: PathBuf,
    },
}

impl OutputSink {
    /// Flush and move staged output into place.
    pub fn commit(self) -> Result<()> {
        match self {
            OutputSink::Stdout(mut out) => out.flush().context("Failed to flush output"),
            OutputSink::File { staged, target } => {
                let staged = staged
                    .into_inner()
                    .map_err(|e| e.into_error())
                    .context("Failed to flush output")?;
                staged
                    .persist(&target)
                    .with_context(|| format!("Failed to write output file {}", target.display()))?;
                debug!(path = %target.display(), "Output committed");
                Ok(())
            }
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputSink::Stdout(out) => out.write(buf),
            OutputSink::File { staged, .. } => staged.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputSink::Stdout(out) => out.flush(),
            OutputSink::File { staged, .. } => staged.flush(),
        }
    }
}

/// Stage output for `path`, or use stdout when no path is given.
pub fn open_output(path: Option<&Path>) -> Result<OutputSink> {
    match path {
        Some(path) => {
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let staged = tempfile::Builder::new()
                .prefix(".group-packager")
                .tempfile_in(dir)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(OutputSink::File {
                staged: BufWriter::new(staged),
                target: path.to_path_buf(),
            })
        }
        None => Ok(OutputSink::Stdout(BufWriter::new(io::stdout()))),
    }
}

/// Package a single JSON payload read from `reader`.
pub fn run_pack<R: Read, W: Write>(mut reader: R, mut writer: W, pretty: bool) -> Result<OutputPayload> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .context("Failed to read input")?;

    let input: InputPayload = serde_json::from_str(&raw).context("Invalid input payload")?;
    let output = pack(&input).with_context(|| format!("Failed to package {}", input.file_id))?;

    info!(
        file_id = %output.file_id,
        groups = output.len(),
        "Packaged payload"
    );

    if pretty {
        serde_json::to_writer_pretty(&mut writer, &output)
    } else {
        serde_json::to_writer(&mut writer, &output)
    }
    .context("Failed to write output")?;
    writeln!(writer).context("Failed to write output")?;
    writer.flush().context("Failed to flush output")?;

    Ok(output)
}

/// Package a JSON Lines stream. Blank lines are skipped.
///
/// Returns the number of payloads written. The first bad line aborts the run.
pub fn run_batch<R: BufRead, W: Write>(reader: R, mut writer: W) -> Result<usize> {
    let mut written = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
        if line.trim().is_empty() {
            continue;
        }

        let input: InputPayload = serde_json::from_str(&line)
            .with_context(|| format!("Invalid input payload on line {line_no}"))?;
        let output = pack(&input)
            .with_context(|| format!("Failed to package line {line_no} ({})", input.file_id))?;

        debug!(line = line_no, file_id = %output.file_id, groups = output.len(), "Packaged line");

        serde_json::to_writer(&mut writer, &output)
            .with_context(|| format!("Failed to write output for line {line_no}"))?;
        writeln!(writer).context("Failed to write output")?;
        written += 1;
    }

    writer.flush().context("Failed to flush output")?;
    info!(payloads = written, "Batch complete");

    Ok(written)
}

/// Render settings as TOML.
pub fn show_config(settings: &Settings) -> Result<String> {
    toml::to_string_pretty(settings).context("Failed to render configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_run_pack_paired() {
        let input = r#"{"file_id":"chat.csv","string_list":["a","b","c","d"],"segment_number":[1,1,2,2],"segment_id":["p1","p2","p3","p4"]}"#;
        let mut out = Vec::new();

        let output = run_pack(Cursor::new(input), &mut out, false).unwrap();

        assert_eq!(output.segment_id, vec!["p1;p2;", "p3;p4;"]);
        let written: OutputPayload = serde_json::from_slice(&out).unwrap();
        assert_eq!(written, output);
        assert!(out.ends_with(b"\n"));
    }

    #[test]
    fn test_run_pack_pretty() {
        let input = r#"{"file_id":"f","string_list":["a"],"segment_number":[1]}"#;
        let mut out = Vec::new();

        run_pack(Cursor::new(input), &mut out, true).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n  \"file_id\": \"f\""));
    }

    #[test]
    fn test_run_pack_invalid_json() {
        let mut out = Vec::new();
        let err = run_pack(Cursor::new("not json"), &mut out, false).unwrap_err();

        assert!(err.to_string().contains("Invalid input payload"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_pack_precondition_violation() {
        let input = r#"{"file_id":"bad","string_list":["a","b"],"segment_number":[1,1],"segment_id":["p1"]}"#;
        let mut out = Vec::new();

        let err = run_pack(Cursor::new(input), &mut out, false).unwrap_err();

        assert!(format!("{err:#}").contains("Precondition violation"));
        assert!(out.is_empty());
    }

    #[test]
    fn test_run_batch_skips_blank_lines() {
        let input = concat!(
            r#"{"file_id":"one","string_list":["a","b"],"segment_number":[1,2]}"#,
            "\n\n",
            r#"{"file_id":"two","string_list":["a","b"],"segment_number":[3,3]}"#,
            "\n"
        );
        let mut out = Vec::new();

        let written = run_batch(Cursor::new(input), &mut out).unwrap();

        assert_eq!(written, 2);
        let lines: Vec<OutputPayload> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines[0].file_id, "one");
        assert_eq!(lines[0].segment_number, vec![1]);
        assert_eq!(lines[1].file_id, "two");
        assert_eq!(lines[1].segment_id, vec!["0;1;"]);
    }

    #[test]
    fn test_run_batch_reports_bad_line() {
        let input = concat!(
            r#"{"file_id":"one","string_list":["a"],"segment_number":[1]}"#,
            "\n",
            "{broken\n"
        );
        let mut out = Vec::new();

        let err = run_batch(Cursor::new(input), &mut out).unwrap_err();

        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_open_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = open_input(Some(dir.path().join("missing.json").as_path()));
        assert!(result.is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let in_path = dir.path().join("in.json");
        let out_path = dir.path().join("out.json");
        std::fs::write(
            &in_path,
            r#"{"file_id":"disk","string_list":["x","y"],"segment_number":[4,4]}"#,
        )
        .unwrap();

        let reader = open_input(Some(in_path.as_path())).unwrap();
        let mut sink = open_output(Some(out_path.as_path())).unwrap();
        run_pack(reader, &mut sink, false).unwrap();
        sink.commit().unwrap();

        let written: OutputPayload =
            serde_json::from_slice(&std::fs::read(&out_path).unwrap()).unwrap();
        assert_eq!(written.file_id, "disk");
        assert_eq!(written.segment_number, vec![4]);
    }

    #[test]
    fn test_pack_in_place_replaces_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(
            &path,
            r#"{"file_id":"same","string_list":["a","b"],"segment_number":[1,1]}"#,
        )
        .unwrap();

        let reader = open_input(Some(path.as_path())).unwrap();
        let mut sink = open_output(Some(path.as_path())).unwrap();
        run_pack(reader, &mut sink, false).unwrap();
        sink.commit().unwrap();

        let written: OutputPayload =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(written.file_id, "same");
        assert_eq!(written.segment_id, vec!["0;1;"]);
    }

    #[test]
    fn test_failed_pack_in_place_keeps_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        let original = r#"{"file_id":"bad","string_list":["a"],"segment_number":[1,1]}"#;
        std::fs::write(&path, original).unwrap();

        let reader = open_input(Some(path.as_path())).unwrap();
        let mut sink = open_output(Some(path.as_path())).unwrap();
        assert!(run_pack(reader, &mut sink, false).is_err());
        drop(sink);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_failed_pack_creates_no_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("out.json");

        let mut sink = open_output(Some(out_path.as_path())).unwrap();
        assert!(run_pack(Cursor::new("not json"), &mut sink, false).is_err());
        drop(sink);

        assert!(!out_path.exists());
    }

    #[test]
    fn test_output_in_current_dir_stages_locally() {
        let sink = open_output(Some(Path::new("group-packager-out.json"))).unwrap();
        assert!(matches!(sink, OutputSink::File { .. }));
        drop(sink);
        assert!(!Path::new("group-packager-out.json").exists());
    }

    #[test]
    fn test_load_settings_cli_override() {
        let settings = load_settings(None, Some("trace")).unwrap();
        assert_eq!(settings.log_level, "trace");
    }

    #[test]
    fn test_show_config() {
        let rendered = show_config(&Settings::default()).unwrap();
        assert!(rendered.contains("log_level = \"warn\""));
        assert!(rendered.contains("pretty = false"));
    }
}

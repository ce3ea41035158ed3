use std::io::{self, IsTerminal, Write};

use colored::Colorize;
use serde::Serialize;
use unipatch_diff::{compute_patch, ChangeKind, LineStats, Patch};

use crate::cli::*;
use crate::config::CliConfig;
use crate::input::{label_for, read_side};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let format = cli.format.unwrap_or(config.output.format);

    match cli.command {
        Command::Diff(args) => cmd_diff(&args, &config),
        Command::Stat(args) => cmd_stat(&args, &config, format),
    }
}

fn build_patch(args: &DiffArgs, config: &CliConfig) -> anyhow::Result<Patch> {
    let diff_config = config.diff_config(args)?;
    let old = read_side(&args.old)?;
    let new = read_side(&args.new)?;
    let old_label = label_for(args.old_label.as_deref(), &args.old);
    let new_label = label_for(args.new_label.as_deref(), &args.new);

    let patch = compute_patch(
        old.as_deref(),
        new.as_deref(),
        old_label.as_deref(),
        new_label.as_deref(),
        &diff_config,
    )?;
    Ok(patch)
}

/// Decide whether to colour stdout and pin `colored` to that decision.
fn resolve_color(choice: ColorChoice) -> bool {
    let colorize = match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stdout().is_terminal(),
    };
    colored::control::set_override(colorize);
    colorize
}

fn cmd_diff(args: &DiffArgs, config: &CliConfig) -> anyhow::Result<()> {
    let patch = build_patch(args, config)?;
    let colorize = resolve_color(args.color.unwrap_or(config.output.color));

    let mut out = io::stdout().lock();
    write_patch(&mut out, &patch, colorize)?;
    out.flush()?;
    Ok(())
}

/// Write the patch bytes, painted when `colorize` is set and verbatim otherwise.
fn write_patch(out: &mut impl Write, patch: &Patch, colorize: bool) -> io::Result<()> {
    if colorize {
        out.write_all(&paint(patch.data()))
    } else {
        out.write_all(patch.data())
    }
}

/// Colour a rendered patch line by line.
///
/// Lines that are not valid UTF-8 pass through uncoloured so their bytes
/// reach the terminal unchanged.
fn paint(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut in_header = true;

    for line in data.split_inclusive(|&b| b == b'\n') {
        let (body, newline) = match line.strip_suffix(b"\n") {
            Some(body) => (body, "\n"),
            None => (line, ""),
        };
        let Ok(text) = std::str::from_utf8(body) else {
            out.extend_from_slice(line);
            continue;
        };

        if text.starts_with("@@") {
            in_header = false;
        } else if text.starts_with("diff --git ") {
            in_header = true;
        }

        let styled = if in_header {
            text.bold().to_string()
        } else if text.starts_with("@@") {
            text.cyan().to_string()
        } else if text.starts_with('+') {
            text.green().to_string()
        } else if text.starts_with('-') {
            text.red().to_string()
        } else {
            text.to_string()
        };
        out.extend_from_slice(styled.as_bytes());
        out.extend_from_slice(newline.as_bytes());
    }
    out
}

#[derive(Debug, Serialize)]
struct PatchSummary {
    kind: ChangeKind,
    status: char,
    old_label: String,
    new_label: String,
    old_id: String,
    new_id: String,
    binary: bool,
    hunks: usize,
    stats: LineStats,
    bytes: usize,
}

impl From<&Patch> for PatchSummary {
    fn from(patch: &Patch) -> Self {
        Self {
            kind: patch.kind(),
            status: patch.kind().status_char(),
            old_label: patch.old_label().to_owned(),
            new_label: patch.new_label().to_owned(),
            old_id: patch.old_id().to_hex(),
            new_id: patch.new_id().to_hex(),
            binary: patch.is_binary(),
            hunks: patch.hunks().len(),
            stats: patch.line_stats(),
            bytes: patch.size(),
        }
    }
}

fn cmd_stat(args: &DiffArgs, config: &CliConfig, format: OutputFormat) -> anyhow::Result<()> {
    let patch = build_patch(args, config)?;
    let summary = PatchSummary::from(&patch);
    resolve_color(args.color.unwrap_or(config.output.color));

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => {
            println!(
                "{} a/{} -> b/{}",
                summary.status.to_string().yellow().bold(),
                summary.old_label,
                summary.new_label
            );
            println!("  Kind: {}", summary.kind);
            println!(
                "  Index: {}..{}",
                patch.old_id().short_hex().dimmed(),
                patch.new_id().short_hex().dimmed()
            );
            if summary.binary {
                println!("  Binary content");
            } else {
                println!(
                    "  Hunks: {}, {} {}, {} context",
                    summary.hunks,
                    format!("+{}", summary.stats.additions).green(),
                    format!("-{}", summary.stats.deletions).red(),
                    summary.stats.context
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use unipatch_diff::PatchError;

    use super::*;
    use crate::input::DEV_NULL;

    /// `colored`'s override is process-wide; tests that set it hold this.
    static COLOR: Mutex<()> = Mutex::new(());

    fn args(old: PathBuf, new: PathBuf) -> DiffArgs {
        DiffArgs {
            old,
            new,
            old_label: None,
            new_label: None,
            context: None,
            inter_hunk_context: None,
            color: Some(ColorChoice::Never),
        }
    }

    #[test]
    fn builds_patch_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        let new = dir.path().join("new.txt");
        fs::write(&old, "hello world\nhola mundo\nbonjour le monde\n").unwrap();
        fs::write(&new, "foo bar\n").unwrap();

        let mut a = args(old, new);
        a.old_label = Some("a/file".into());
        a.new_label = Some("b/file".into());
        let patch = build_patch(&a, &CliConfig::default()).unwrap();
        assert!(patch
            .text()
            .starts_with("diff --git a/a/file b/b/file\nindex a520c24..d675fa4 100644\n"));
    }

    #[test]
    fn dev_null_side_is_creation() {
        let dir = tempfile::tempdir().unwrap();
        let new = dir.path().join("new.txt");
        fs::write(&new, "foo bar\n").unwrap();

        let mut a = args(PathBuf::from(DEV_NULL), new);
        a.new_label = Some("file".into());
        let patch = build_patch(&a, &CliConfig::default()).unwrap();
        assert_eq!(patch.kind(), ChangeKind::Added);
        assert_eq!(patch.old_label(), "file");
        assert!(patch.text().contains("--- /dev/null\n+++ b/file\n"));
    }

    #[test]
    fn both_dev_null_is_invalid() {
        let a = args(PathBuf::from(DEV_NULL), PathBuf::from(DEV_NULL));
        let err = build_patch(&a, &CliConfig::default()).unwrap_err();
        let err = err.downcast::<PatchError>().unwrap();
        assert!(matches!(err, PatchError::InvalidInput(_)));
    }

    #[test]
    fn negative_context_is_invalid() {
        let mut a = args(PathBuf::from(DEV_NULL), PathBuf::from(DEV_NULL));
        a.context = Some(-3);
        let err = build_patch(&a, &CliConfig::default()).unwrap_err();
        assert!(err.to_string().contains("context_lines must not be negative"));
    }

    #[test]
    fn paint_colours_changes() {
        let _guard = COLOR.lock().unwrap();
        colored::control::set_override(true);
        let painted = paint(b"diff --git a/f b/f\n--- a/f\n+++ b/f\n@@ -1 +1 @@\n-old\n+new\n");
        let painted = String::from_utf8(painted).unwrap();
        assert!(painted.contains(&"-old".red().to_string()));
        assert!(painted.contains(&"+new".green().to_string()));
        assert!(painted.contains(&"+++ b/f".bold().to_string()));
        assert!(painted.contains(&"@@ -1 +1 @@".cyan().to_string()));
    }

    #[test]
    fn paint_keeps_non_utf8_bytes() {
        let data = b"@@ -1 +1 @@\n-H\xf8gsberg\n";
        let painted = paint(data);
        assert!(painted.ends_with(b"-H\xf8gsberg\n"));
    }

    #[test]
    fn write_patch_without_colour_is_verbatim() {
        let patch = compute_patch(
            b"Kristian H\xf8gsberg\n",
            b"Kristian H\xf8gsberg\nfoo\n",
            Some("iso-8859-1.txt"),
            Some("iso-8859-1.txt"),
            &Default::default(),
        )
        .unwrap();

        let mut out = Vec::new();
        write_patch(&mut out, &patch, false).unwrap();
        assert_eq!(out, patch.data());
        assert!(out.ends_with(b"@@ -1 +1,2 @@\n Kristian H\xf8gsberg\n+foo\n"));
    }

    #[test]
    fn write_patch_with_colour_paints() {
        let _guard = COLOR.lock().unwrap();
        colored::control::set_override(true);
        let patch = compute_patch(b"a\n", b"b\n", None, None, &Default::default()).unwrap();

        let mut out = Vec::new();
        write_patch(&mut out, &patch, true).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains(&"+b".green().to_string()));
        assert!(out.contains(&"-a".red().to_string()));
    }

    #[test]
    fn never_disables_colour() {
        let _guard = COLOR.lock().unwrap();
        assert!(!resolve_color(ColorChoice::Never));
        assert_eq!("x".red().to_string(), "x");
        assert!(resolve_color(ColorChoice::Always));
        assert_ne!("x".red().to_string(), "x");
    }

    #[test]
    fn summary_serialises() {
        let patch = compute_patch(
            b"a\n",
            b"a\nb\n",
            Some("f"),
            Some("f"),
            &Default::default(),
        )
        .unwrap();
        let json = serde_json::to_value(PatchSummary::from(&patch)).unwrap();
        assert_eq!(json["kind"], "modified");
        assert_eq!(json["status"], "M");
        assert_eq!(json["hunks"], 1);
        assert_eq!(json["stats"]["additions"], 1);
        assert_eq!(json["stats"]["context"], 1);
    }
}

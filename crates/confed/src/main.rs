//! confed: edit one setting in a line-oriented configuration file.
//!
//! # Usage
//!
//! ```text
//! confed [OPTIONS] <FILE> <SETTING> [VALUE]
//!
//! confed postgresql.conf port 5433                 # print updated file
//! confed -I postgresql.conf port 5433              # rewrite the file
//! confed -t -p ssh sshd_config PermitRootLogin no  # show a diff only
//! confed -I -d -k app.conf debug                   # comment out `debug`
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable          | Description                          |
//! |-------------------|--------------------------------------|
//! | `CONFED_PRESET`   | Grammar preset to use (`--preset`)   |
//! | `CONFED_PRESETS`  | Presets file path (`--presets-file`) |
//! | `RUST_LOG`        | Log filter, logs go to stderr        |

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use confed::application::edit_file::{
    EditFileOutcome, EditFileRequest, EditFileUseCase, OutputMode,
};
use confed::infrastructure::storage::file::{is_stdin, FsConfigFileStore};
use confed::infrastructure::storage::presets::{presets_file_path, PresetTable};
use confed_core::{GrammarConfig, OperationRequest};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Edit one setting in a line-oriented configuration file.
///
/// Updates the setting in place when it is defined, otherwise adds it next to
/// a commented-out definition or at the end of the file.  Formatting, quoting
/// and comments of every other line are left untouched.
#[derive(Debug, Parser)]
#[command(name = "confed", version)]
struct Cli {
    /// Configuration file to edit, or `-` for standard input.
    #[arg(required_unless_present = "list_presets")]
    file: Option<PathBuf>,

    /// Name of the setting (a regular expression with --regex).
    #[arg(required_unless_present = "list_presets")]
    setting: Option<String>,

    /// Value to write.  With --delete --multiple, the value to delete.
    value: Option<String>,

    /// Delete the setting instead of updating it.
    #[arg(short, long)]
    delete: bool,

    /// Comment out the old definition instead of replacing or removing it.
    #[arg(short, long)]
    keep: bool,

    /// Allow several definitions of the setting, selected by value.
    #[arg(short, long)]
    multiple: bool,

    /// Treat SETTING and VALUE as regular expressions.
    #[arg(short, long)]
    regex: bool,

    /// Match SETTING and VALUE case-insensitively.
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Comment to attach to the written definition.
    #[arg(short, long, value_name = "TEXT")]
    comment: Option<String>,

    /// Insert a new definition before this setting.
    #[arg(long, value_name = "SETTING", conflicts_with = "after")]
    before: Option<String>,

    /// Insert a new definition after this setting.
    #[arg(long, value_name = "SETTING")]
    after: Option<String>,

    /// Grammar preset (see --list-presets).
    #[arg(short, long, value_name = "NAME", env = "CONFED_PRESET")]
    preset: Option<String>,

    /// TOML file with additional presets.
    #[arg(long, value_name = "PATH", env = "CONFED_PRESETS")]
    presets_file: Option<PathBuf>,

    /// List the available presets and exit.
    #[arg(long)]
    list_presets: bool,

    /// Character between name and value.
    #[arg(long, value_name = "CHAR", conflicts_with = "no_assign")]
    assign: Option<char>,

    /// Name and value are separated by whitespace only.
    #[arg(long)]
    no_assign: bool,

    /// Character that starts a comment.
    #[arg(long, value_name = "CHAR", conflicts_with = "no_comment")]
    comment_char: Option<char>,

    /// The format has no comments.
    #[arg(long)]
    no_comment: bool,

    /// Every character allowed in a setting name.
    #[arg(long, value_name = "CHARS")]
    name_chars: Option<String>,

    /// Every character allowed in an unquoted value.
    #[arg(long, value_name = "CHARS")]
    value_chars: Option<String>,

    /// Rewrite FILE instead of printing the result.
    #[arg(short = 'I', long, conflicts_with = "test")]
    in_place: bool,

    /// Print a unified diff of the change and write nothing.
    #[arg(short, long)]
    test: bool,

    /// Log scan and edit decisions to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Loads the preset table from --presets-file or the platform config dir.
    fn preset_table(&self) -> anyhow::Result<PresetTable> {
        match self.presets_file.clone().or_else(presets_file_path) {
            Some(path) => PresetTable::load(&path)
                .with_context(|| format!("failed to load presets from {}", path.display())),
            None => Ok(PresetTable::builtin()),
        }
    }

    /// Builds the grammar: default, then preset, then explicit flags.
    fn grammar_config(&self, presets: &PresetTable) -> anyhow::Result<GrammarConfig> {
        let mut grammar = match &self.preset {
            Some(name) => presets.get(name)?.clone(),
            None => GrammarConfig::default(),
        };
        if self.no_assign {
            grammar.assign = None;
        } else if let Some(ch) = self.assign {
            grammar.assign = Some(ch);
        }
        if self.no_comment {
            grammar.comment = None;
        } else if let Some(ch) = self.comment_char {
            grammar.comment = Some(ch);
        }
        if let Some(chars) = &self.name_chars {
            grammar.name_chars = chars.clone();
        }
        if let Some(chars) = &self.value_chars {
            grammar.value_chars = chars.clone();
        }
        Ok(grammar)
    }

    /// Builds the operation from the positional arguments and edit flags.
    fn operation(&self) -> anyhow::Result<OperationRequest> {
        let Some(setting) = self.setting.clone() else {
            bail!("SETTING is required");
        };
        let mut request = if self.delete {
            OperationRequest::delete(setting)
        } else {
            OperationRequest {
                setting,
                ..OperationRequest::default()
            }
        };
        request.value = self.value.clone();
        request.before = self.before.clone();
        request.after = self.after.clone();
        request.comment = self.comment.clone();
        Ok(request
            .keep(self.keep)
            .multiple(self.multiple)
            .use_regex(self.regex)
            .case_insensitive(self.ignore_case))
    }

    fn output_mode(&self) -> OutputMode {
        if self.in_place {
            OutputMode::InPlace
        } else if self.test {
            OutputMode::Test
        } else {
            OutputMode::Stdout
        }
    }
}

fn describe_char(ch: Option<char>) -> String {
    ch.map(|c| format!("{c:?}")).unwrap_or_else(|| "none".to_string())
}

fn list_presets(presets: &PresetTable) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    for (name, grammar) in presets.iter() {
        writeln!(
            out,
            "{name:<10} assign={:<6} comment={:<6} names={:?} values={:?}",
            describe_char(grammar.assign),
            describe_char(grammar.comment),
            grammar.name_chars,
            grammar.value_chars,
        )?;
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries file content and diffs, so logs go to stderr.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // A broken presets file only matters when a preset is actually used.
    let presets = if cli.preset.is_some() || cli.list_presets {
        cli.preset_table()?
    } else {
        PresetTable::builtin()
    };
    if cli.list_presets {
        return list_presets(&presets);
    }

    let Some(path) = cli.file.clone() else {
        bail!("FILE is required");
    };
    let mode = cli.output_mode();
    if mode == OutputMode::InPlace && is_stdin(&path) {
        bail!("--in-place cannot be used when reading standard input");
    }

    let request = EditFileRequest {
        grammar: cli.grammar_config(&presets)?,
        operation: cli.operation()?,
        mode,
        path,
    };
    debug!(?request, "edit request");

    let use_case = EditFileUseCase::new(FsConfigFileStore::new());
    let outcome = use_case
        .execute(&request)
        .with_context(|| format!("failed to edit {}", request.path.display()))?;

    let mut out = std::io::stdout().lock();
    match outcome {
        EditFileOutcome::Rendered(content) | EditFileOutcome::Diff(content) => {
            out.write_all(content.as_bytes())?;
            out.flush()?;
        }
        EditFileOutcome::Written { .. } => {}
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

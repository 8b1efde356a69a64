//! CLI argument definitions for the voter roll tools.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Directory the mapping repository lives in unless `--repo` says otherwise.
pub const DEFAULT_REPO_DIR: &str = ".vrs";

#[derive(Parser)]
#[command(
    name = "vrs",
    version,
    about = "Voter roll parser - reconcile headers and classify surnames",
    long_about = "Parse Nepali voter lists from CSV, XLSX or JSON.\n\n\
                  Headers in Nepali or English are mapped onto a fixed record shape,\n\
                  and every voter name is classified by caste category with an\n\
                  independent Newar tag."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow voter names and other row values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Classify one or more voter names.
    Classify(ClassifyArgs),

    /// Show how the header row of a file maps onto record fields.
    Headers(InputArgs),

    /// Parse a voter list and export the records.
    Parse(ParseArgs),

    /// Print caste, gender and ward totals for a voter list.
    Summary(SummaryArgs),

    /// List the built-in caste categories.
    Castes,

    /// Edit the stored column mappings of a dataset.
    #[command(subcommand)]
    Mapping(MappingCommand),

    /// Record a manual caste/surname for one voter.
    Override(OverrideArgs),
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Full voter names, in English or Nepali script.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,
}

/// Where an upload comes from and how to read it.
#[derive(Args, Clone)]
pub struct InputArgs {
    /// Voter list to read (.csv, .xlsx or .json).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Read the file as this format instead of guessing from the extension.
    #[arg(long = "input-format", value_enum)]
    pub input_format: Option<InputFormatArg>,

    /// Worksheet to read from a workbook (default: the first one).
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheet: Option<String>,

    /// Maximum upload size in bytes.
    #[arg(long = "max-file-size", value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Maximum number of data rows.
    #[arg(long = "max-rows", value_name = "N")]
    pub max_rows: Option<usize>,

    /// Maximum characters per cell.
    #[arg(long = "max-field-len", value_name = "N")]
    pub max_field_len: Option<usize>,

    /// Do not read name, age and gender from fixed column positions when the
    /// header row does not name them.
    #[arg(long = "no-positional-fallback")]
    pub no_positional_fallback: bool,
}

/// Dataset whose stored mappings and overrides apply to an upload.
#[derive(Args, Clone)]
pub struct DatasetArgs {
    /// Dataset identifier in the mapping repository.
    #[arg(long = "dataset", value_name = "ID")]
    pub dataset: Option<String>,

    /// Mapping repository directory.
    #[arg(long = "repo", value_name = "DIR", default_value = DEFAULT_REPO_DIR)]
    pub repo: PathBuf,
}

#[derive(Parser)]
pub struct ParseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Export format.
    #[arg(long = "format", value_enum, default_value = "json")]
    pub format: ExportFormatArg,

    /// Write records to this file instead of stdout.
    #[arg(long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Print the summary as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum MappingCommand {
    /// Map a source column to a field, or `none` to leave it unmapped.
    Set(MappingSetArgs),
}

#[derive(Parser)]
pub struct MappingSetArgs {
    /// Dataset identifier.
    #[arg(value_name = "DATASET")]
    pub dataset: String,

    /// Source column header, exactly as it appears in the upload.
    #[arg(value_name = "COLUMN")]
    pub column: String,

    /// Target field key (e.g. voterName, wardNo) or `none`.
    #[arg(value_name = "FIELD")]
    pub field: String,

    /// Mapping repository directory.
    #[arg(long = "repo", value_name = "DIR", default_value = DEFAULT_REPO_DIR)]
    pub repo: PathBuf,
}

#[derive(Parser)]
pub struct OverrideArgs {
    /// Dataset identifier.
    #[arg(value_name = "DATASET")]
    pub dataset: String,

    /// Record key: the voter ID, or `<serial>:<name>` when there is none.
    #[arg(value_name = "RECORD_KEY")]
    pub record_key: String,

    /// Caste category, `Other`, or a custom tag.
    #[arg(long = "caste")]
    pub caste: Option<String>,

    /// Surname to store for the voter.
    #[arg(long = "surname")]
    pub surname: Option<String>,

    /// Register `--caste` as a new custom tag when it is not known yet.
    #[arg(long = "new-tag", requires = "caste")]
    pub new_tag: bool,

    /// Mapping repository directory.
    #[arg(long = "repo", value_name = "DIR", default_value = DEFAULT_REPO_DIR)]
    pub repo: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InputFormatArg {
    Csv,
    Xlsx,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Json,
    Csv,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

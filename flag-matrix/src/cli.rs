//! Command-line interface definitions for `flag-matrix`.

use camino::Utf8PathBuf;
use clap::Parser;
use serde::Serialize;

/// Parsed CLI arguments for `flag-matrix`.
///
/// Every option is optional; values given here override the environment, the
/// configuration file, and the built-in defaults. Fields serialize only when
/// present so absent options never mask lower configuration layers.
#[derive(Debug, Parser, Serialize)]
#[command(name = "flag-matrix")]
#[command(about = "Generate a CI workflow covering every feature-flag combination")]
#[command(version)]
pub struct Args {
    /// Header file containing the marker-delimited flag declarations.
    #[arg(long = "input", value_name = "path")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_path: Option<Utf8PathBuf>,
    /// Destination document (`-` for standard output).
    #[arg(long = "output", value_name = "path")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    /// Line marker opening the flag region.
    #[arg(long, value_name = "text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_marker: Option<String>,
    /// Line marker closing the flag region.
    #[arg(long, value_name = "text")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_marker: Option<String>,
    /// Characters stripped from identifiers to form display names.
    #[arg(long, value_name = "chars")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    /// Token prepended to each flag identifier in the configure command.
    #[arg(long, value_name = "token")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub define_prefix: Option<String>,
    /// Explicit configuration file (TOML).
    #[arg(long, value_name = "path")]
    #[serde(skip)]
    pub config: Option<Utf8PathBuf>,
}

//! Layered configuration loading.
//!
//! Merges built-in defaults, an optional TOML configuration file, prefixed
//! environment variables, and command-line options, in that order of
//! precedence (highest last).

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::error::MatrixError;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "FLAG_MATRIX_";

/// Configuration file looked up in the working directory when `--config` is
/// absent.
pub const DEFAULT_CONFIG_FILE: &str = ".flag-matrix.toml";

/// Generator configuration, fully merged for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Header file containing the marker-delimited flag declarations.
    pub input_path: Utf8PathBuf,
    /// Destination document; the literal `-` writes to standard output.
    pub output_path: String,
    /// Line marker opening the flag region.
    pub start_marker: String,
    /// Line marker closing the flag region.
    pub end_marker: String,
    /// Characters stripped from identifiers to form display names.
    pub separator: String,
    /// Token prepended to each flag identifier in the configure command.
    pub define_prefix: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_path: Utf8PathBuf::from("gstack-header.h"),
            output_path: ".github/workflows/cmake.yml".to_owned(),
            start_marker: "#ifdef FULL_DEBUG".to_owned(),
            end_marker: "STACK_VERBOSE".to_owned(),
            separator: "_".to_owned(),
            define_prefix: "-D".to_owned(),
        }
    }
}

/// Merges all configuration layers for this invocation.
///
/// Precedence, lowest to highest: struct defaults, TOML configuration file,
/// `FLAG_MATRIX_`-prefixed environment variables, command-line options.
///
/// # Errors
///
/// Returns [`MatrixError::File`] when a configuration file cannot be read or
/// parsed and [`MatrixError::Gathering`] when layer extraction fails.
pub fn load(args: &Args) -> Result<GeneratorConfig, MatrixError> {
    let mut figment = Figment::from(Serialized::defaults(GeneratorConfig::default()));
    if let Some(file) = config_file_figment(args.config.as_deref())? {
        figment = figment.merge(file);
    }
    let config = figment
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(args))
        .extract()
        .map_err(Box::new)?;
    Ok(config)
}

/// Selects the configuration file layer.
///
/// An explicit path must load; the implicit working-directory candidate is
/// optional.
fn config_file_figment(explicit: Option<&Utf8Path>) -> Result<Option<Figment>, MatrixError> {
    match explicit {
        Some(path) => file_figment(path).map(Some),
        None => {
            let candidate = Utf8Path::new(DEFAULT_CONFIG_FILE);
            if candidate.is_file() {
                file_figment(candidate).map(Some)
            } else {
                Ok(None)
            }
        }
    }
}

/// Validates the file with the TOML parser before handing it to Figment.
fn file_figment(path: &Utf8Path) -> Result<Figment, MatrixError> {
    let data = std::fs::read_to_string(path).map_err(|err| MatrixError::File {
        path: path.to_path_buf(),
        source: err.into(),
    })?;
    toml::from_str::<toml::Value>(&data).map_err(|err| MatrixError::File {
        path: path.to_path_buf(),
        source: err.into(),
    })?;
    Ok(Figment::from(Toml::string(&data)))
}

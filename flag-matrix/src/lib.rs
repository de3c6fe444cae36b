//! Library interface for the `flag-matrix` workflow generator.
//!
//! Derives a GitHub Actions workflow from the compile-time feature flags
//! declared in a marker-delimited header region: one build-and-test job per
//! proper non-empty flag combination, plus a fixed baseline job built without
//! any flag defines.

pub mod cli;
pub mod combine;
pub mod config;
pub mod error;
pub mod extract;
pub mod flags;
pub mod output;
pub mod render;

use crate::config::GeneratorConfig;
use crate::error::MatrixError;
use crate::flags::FlagSet;
use crate::output::OutputTarget;

/// Runs one full generation pass for `config`.
///
/// Reads the header, extracts and validates the flag set, and streams the
/// workflow document to the configured sink. Nothing is written until the
/// flag set has validated; file output is published atomically, so a failed
/// run leaves any existing document untouched.
///
/// # Errors
///
/// Propagates extraction, validation, and I/O failures.
pub fn generate(config: &GeneratorConfig) -> Result<(), MatrixError> {
    let text = std::fs::read_to_string(&config.input_path).map_err(|source| MatrixError::Io {
        path: config.input_path.clone(),
        source,
    })?;
    let idents = extract::extract_flags(&text, &config.start_marker, &config.end_marker)?;
    let flag_set = FlagSet::new(idents, &config.separator)?;
    tracing::debug!(flags = flag_set.len(), "extracted flag set");

    let target = OutputTarget::from_config(&config.output_path);
    target.publish(|out| render::write_document(out, &flag_set, &config.define_prefix))
}

//! Marker-delimited flag extraction.

use crate::error::MatrixError;

/// Extracts flag identifiers from the marker-delimited region of `text`.
///
/// The region spans the lines strictly between the first line containing
/// `start_marker` and the next line containing `end_marker`. Each non-blank
/// line in the region contributes its last whitespace-separated token. An
/// empty region yields an empty list.
///
/// # Errors
///
/// Returns [`MatrixError::MissingMarker`] when either marker is absent.
pub fn extract_flags(
    text: &str,
    start_marker: &str,
    end_marker: &str,
) -> Result<Vec<String>, MatrixError> {
    let mut lines = text.lines();
    let start_line = lines
        .by_ref()
        .find(|line| line.contains(start_marker))
        .ok_or_else(|| MatrixError::MissingMarker {
            marker: start_marker.to_owned(),
        })?;

    // The end marker may already sit on the start line, leaving an empty region.
    if start_line
        .split_once(start_marker)
        .is_some_and(|(_, rest)| rest.contains(end_marker))
    {
        return Ok(Vec::new());
    }

    let mut idents = Vec::new();
    for line in lines {
        if line.contains(end_marker) {
            return Ok(idents);
        }
        if let Some(token) = line.split_whitespace().last() {
            idents.push(token.to_owned());
        }
    }

    Err(MatrixError::MissingMarker {
        marker: end_marker.to_owned(),
    })
}

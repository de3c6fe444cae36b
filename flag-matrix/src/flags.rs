//! Validated flag sets and display-name derivation.

use std::collections::HashMap;

use crate::combine::{Combinations, combination_count};
use crate::error::MatrixError;

/// Hard upper bound on the number of flags the generator will enumerate.
pub const MAX_FLAGS: usize = 16;

/// Flag count from which a warning about workflow size is logged.
pub const WARN_FLAGS: usize = 10;

/// A feature flag extracted from the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    /// Raw identifier as it appears in the header.
    pub ident: String,
    /// Identifier with separator characters stripped, used in job names.
    pub display: String,
}

/// Ordered, duplicate-free collection of validated flags.
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    flags: Vec<Flag>,
}

impl FlagSet {
    /// Validates `idents` into a flag set.
    ///
    /// Display names are the identifiers with every character of `separator`
    /// removed. Exact duplicate identifiers collapse to their first
    /// occurrence, preserving header order.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NameCollision`] when two distinct identifiers
    /// share a display name, [`MatrixError::EmptyDisplayName`] when an
    /// identifier strips to nothing, and [`MatrixError::TooManyFlags`] when
    /// the set exceeds [`MAX_FLAGS`].
    pub fn new(idents: Vec<String>, separator: &str) -> Result<Self, MatrixError> {
        let mut flags: Vec<Flag> = Vec::new();
        let mut claimed: HashMap<String, String> = HashMap::new();
        for ident in idents {
            if flags.iter().any(|flag| flag.ident == ident) {
                continue;
            }
            let display = display_name(&ident, separator);
            if display.is_empty() {
                return Err(MatrixError::EmptyDisplayName { ident });
            }
            if let Some(first) = claimed.get(&display) {
                return Err(MatrixError::NameCollision {
                    display,
                    first: first.clone(),
                    second: ident,
                });
            }
            claimed.insert(display.clone(), ident.clone());
            flags.push(Flag { ident, display });
        }

        let set = Self { flags };
        set.check_scale()?;
        Ok(set)
    }

    /// Flags in header order.
    #[must_use]
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    /// Number of flags in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the set holds no flags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Lazy iterator over every proper non-empty combination of the set.
    #[must_use]
    pub fn combinations(&self) -> Combinations<'_, Flag> {
        Combinations::new(&self.flags)
    }

    fn check_scale(&self) -> Result<(), MatrixError> {
        let count = self.flags.len();
        if count > MAX_FLAGS {
            return Err(MatrixError::TooManyFlags {
                count,
                limit: MAX_FLAGS,
            });
        }
        if count >= WARN_FLAGS {
            tracing::warn!(
                flags = count,
                jobs = combination_count(count) + 1,
                "large flag set produces an exponentially sized workflow"
            );
        }
        if count == 0 {
            tracing::debug!("no flags extracted; only the baseline job will be emitted");
        }
        Ok(())
    }
}

/// Derives the display name for `ident` by removing every character that
/// occurs in `separator`.
fn display_name(ident: &str, separator: &str) -> String {
    ident
        .chars()
        .filter(|character| !separator.contains(*character))
        .collect()
}

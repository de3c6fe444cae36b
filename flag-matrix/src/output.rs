//! Output sink resolution and transactional publication.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::{Dir, OpenOptions};

use crate::error::MatrixError;

/// Destination for the generated document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Stream to standard output.
    Stdout,
    /// Publish atomically to a file.
    File(Utf8PathBuf),
}

impl OutputTarget {
    /// Resolves a configured output path; the literal `-` selects stdout.
    #[must_use]
    pub fn from_config(raw: &str) -> Self {
        if raw == "-" {
            Self::Stdout
        } else {
            Self::File(Utf8PathBuf::from(raw))
        }
    }

    /// Streams the document produced by `render` into this target.
    ///
    /// File targets are written to a temporary sibling and renamed into place
    /// only after a successful flush, so a failed run leaves any existing
    /// document untouched.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::Io`] when the sink cannot be opened, written,
    /// or published, and [`MatrixError::Message`] when the output path has no
    /// file name.
    pub fn publish<F>(&self, render: F) -> Result<(), MatrixError>
    where
        F: FnOnce(&mut dyn Write) -> io::Result<()>,
    {
        match self {
            Self::Stdout => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                render(&mut lock)
                    .and_then(|()| lock.flush())
                    .map_err(|source| MatrixError::Io {
                        path: Utf8PathBuf::from("-"),
                        source,
                    })
            }
            Self::File(path) => publish_file(path, render),
        }
    }
}

fn publish_file<F>(path: &Utf8Path, render: F) -> Result<(), MatrixError>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let file_name = path
        .file_name()
        .ok_or_else(|| MatrixError::Message(format!("output path '{path}' has no file name")))?;
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir.to_path_buf(),
        _ => Utf8PathBuf::from("."),
    };
    let dir = ensure_dir(&parent)?;
    let temp_name = format!(".{file_name}.tmp");

    match write_temp(&dir, &parent, &temp_name, render) {
        Ok(()) => dir
            .rename(&temp_name, &dir, file_name)
            .map_err(|source| MatrixError::Io {
                path: path.to_path_buf(),
                source,
            }),
        Err(err) => {
            if let Err(cleanup) = dir.remove_file(&temp_name) {
                tracing::debug!(error = %cleanup, "failed to remove temporary output");
            }
            Err(err)
        }
    }
}

fn write_temp<F>(
    dir: &Dir,
    parent: &Utf8Path,
    temp_name: &str,
    render: F,
) -> Result<(), MatrixError>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let file = dir
        .open_with(
            temp_name,
            OpenOptions::new().write(true).create(true).truncate(true),
        )
        .map_err(|source| temp_error(parent, temp_name, source))?;
    let mut writer = io::BufWriter::new(file);
    render(&mut writer).map_err(|source| temp_error(parent, temp_name, source))?;
    writer
        .flush()
        .map_err(|source| temp_error(parent, temp_name, source))
}

fn temp_error(parent: &Utf8Path, temp_name: &str, source: io::Error) -> MatrixError {
    MatrixError::Io {
        path: parent.join(temp_name),
        source,
    }
}

fn ensure_dir(path: &Utf8Path) -> Result<Dir, MatrixError> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Ok(dir),
        Err(open_err) if open_err.kind() == io::ErrorKind::NotFound => {
            Dir::create_ambient_dir_all(path, ambient_authority()).map_err(|source| {
                MatrixError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            Dir::open_ambient_dir(path, ambient_authority()).map_err(|source| MatrixError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        Err(open_err) => Err(MatrixError::Io {
            path: path.to_path_buf(),
            source: open_err,
        }),
    }
}

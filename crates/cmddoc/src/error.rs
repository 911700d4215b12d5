//! Error types for documentation generation.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Recoverable failures returned to the caller.
///
/// Broken template sources and generators attached for unknown templates are
/// programmer errors and panic instead; see [`crate::Registry::register`] and
/// [`crate::DocGenTool::add_doc_generator`].
#[derive(Error, Debug)]
pub enum Error {
    /// The root command has no name, so no file name can be derived.
    #[error("you need a command name to have a man page")]
    EmptyCommandName,

    /// The requested template was never registered.
    #[error("the given template has not been registered: {0}")]
    TemplateNotFound(String),

    /// Creating or writing an output file failed.
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to a caller-supplied writer failed.
    #[error("failed to write output")]
    Write(#[from] io::Error),

    /// Template execution failed (unknown filter, bad field access, ...).
    #[error("failed to render template {template}")]
    Render {
        template: String,
        #[source]
        source: tera::Error,
    },

    /// The documentation tool's own command line could not be parsed.
    #[error(transparent)]
    Cli(#[from] clap::Error),
}

/// Result type alias for cmddoc operations
pub type Result<T> = std::result::Result<T, Error>;

//! cmddoc: man pages, mdoc pages, markdown and bash completion generated
//! from a command tree.
//!
//! Describe the application as a [`Command`] tree (or convert a
//! `clap::Command`), pick a template from a [`Registry`] and call
//! [`generate_docs`], or wrap everything in a [`DocGenTool`] that adds a
//! `doc` command line to the application.

mod completion;
mod error;
pub mod escape;
mod from_clap;
mod generate;
mod model;
mod options;
mod page;
mod registry;
mod tool;

pub use completion::{generate_bash_completion_file, write_bash_completion};
pub use error::{Error, Result};
pub use generate::{generate_docs, generate_page, Generator};
pub use model::{
    ArgPolicy, Command, Flag, Node, ARG_HINTS, AUTHOR_SECTION, BUGS_SECTION, ENVIRONMENT_SECTION,
    EXAMPLES_SECTION, FILES_SECTION,
};
pub use options::{Options, Settings, DEFAULT_TEMPLATE};
pub use page::{FlagEntry, Page, Relation, SeeAlso};
pub use registry::{Registry, Renderer, TemplateEntry, TemplateFn, TeraRenderer};
pub use tool::DocGenTool;

//! Companion command-line tool that generates docs for an application.
//!
//! ```no_run
//! use cmddoc::{Command, DocGenTool, Options, Registry};
//!
//! let app = Command::new("zap");
//! let tool = DocGenTool::new(app, Registry::default())
//!     .add_bash_completion_generator("zap.sh")
//!     .add_doc_generator(Options::new().author("Someone"), "troff");
//! tool.execute().unwrap();
//! ```

use crate::completion;
use crate::error::{Error, Result};
use crate::generate::Generator;
use crate::model::Command;
use crate::options::Options;
use crate::registry::Registry;
use clap::{Arg, ArgMatches};
use std::ffi::OsString;
use std::path::PathBuf;

const COMPLETION_COMMAND: &str = "generate-auto-complete";

enum Action {
    Docs { template: String, options: Options },
    Completion { file_name: String },
}

/// Wraps an application's command tree in a `doc` tool with one
/// `generate-*` subcommand per attached generator.
pub struct DocGenTool {
    app: Command,
    registry: Registry,
    actions: Vec<(String, Action)>,
}

impl DocGenTool {
    pub fn new(app: Command, registry: Registry) -> Self {
        DocGenTool {
            app,
            registry,
            actions: Vec::new(),
        }
    }

    /// Add `generate-auto-complete`, writing a bash completion script named
    /// `file_name` into `--directory`.
    pub fn add_bash_completion_generator(mut self, file_name: impl Into<String>) -> Self {
        self.actions.push((
            COMPLETION_COMMAND.to_string(),
            Action::Completion {
                file_name: file_name.into(),
            },
        ));
        self
    }

    /// Add `generate-<template>`, rendering every page with `template`.
    ///
    /// # Panics
    ///
    /// Panics if `template` is not registered: the tool would otherwise fail
    /// only once someone runs the subcommand.
    pub fn add_doc_generator(mut self, options: Options, template: &str) -> Self {
        if !self.registry.contains(template) {
            panic!("the given template has not been registered: {}", template);
        }
        self.actions.push((
            format!("generate-{}", template),
            Action::Docs {
                template: template.to_string(),
                options: options.template(template),
            },
        ));
        self
    }

    /// The tool's clap definition.
    pub fn command(&self) -> clap::Command {
        let mut cmd = clap::Command::new("doc")
            .about("Generate documentation, etc.")
            .arg(
                Arg::new("directory")
                    .long("directory")
                    .global(true)
                    .value_name("DIR")
                    .default_value(".")
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Directory to install generated files"),
            );
        for (name, action) in &self.actions {
            let about = match action {
                Action::Docs { template, .. } => format!("Generate docs with the {} template", template),
                Action::Completion { .. } => "Generate bash auto complete script".to_string(),
            };
            cmd = cmd.subcommand(clap::Command::new(name.clone()).about(about));
        }
        cmd
    }

    /// Parse the process arguments and run the chosen generator.
    pub fn execute(&self) -> Result<()> {
        self.execute_from(std::env::args_os())
    }

    /// Parse `args` (including the program name) and run the chosen generator.
    pub fn execute_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match self.command().try_get_matches_from(args) {
            Ok(m) => m,
            Err(e) if !e.use_stderr() => {
                // --help / --version
                e.print()?;
                return Ok(());
            }
            Err(e) => return Err(Error::Cli(e)),
        };

        let Some((name, sub)) = matches.subcommand() else {
            self.command().print_help()?;
            return Ok(());
        };
        let Some((_, action)) = self.actions.iter().find(|(n, _)| n == name) else {
            // clap only accepts subcommands we declared
            return Ok(());
        };
        let directory = directory(sub);

        match action {
            Action::Docs { options, .. } => {
                let options = options.clone().directory(directory);
                Generator::new(&self.registry, &options).generate_docs(&self.app)
            }
            Action::Completion { file_name } => {
                std::fs::create_dir_all(&directory).map_err(|source| Error::Io {
                    path: directory.clone(),
                    source,
                })?;
                completion::generate_bash_completion_file(&self.app, &directory.join(file_name))
            }
        }
    }
}

fn directory(matches: &ArgMatches) -> PathBuf {
    matches
        .get_one::<PathBuf>("directory")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."))
}

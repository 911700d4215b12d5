//! docutil: generate man pages, markdown and bash completion for `zap`.
//!
//! `zap` is a small file-tidying CLI declared with clap. This binary is its
//! documentation companion:
//!
//! - `docutil generate-troff --directory man/man1`
//! - `docutil generate-markdown --directory docs`
//! - `docutil generate-auto-complete --directory completions`

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use cmddoc::{Command, DocGenTool, Options, Registry, ENVIRONMENT_SECTION, FILES_SECTION};
use std::path::PathBuf;
use std::process::exit;

#[derive(Parser)]
#[command(
    name = "zap",
    about = "Tidy up build artifacts",
    long_about = "zap finds build artifacts below a directory and removes them.\n\nNothing is deleted unless --force is given."
)]
#[allow(dead_code)]
struct Zap {
    /// Print every path considered
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: ZapCommand,
}

#[derive(Subcommand)]
#[allow(dead_code)]
enum ZapCommand {
    /// List artifacts that would be removed
    List {
        /// Directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Remove artifacts
    Clean {
        /// Actually delete files
        #[arg(short, long)]
        force: bool,

        /// Glob of files to keep
        #[arg(long, value_name = "GLOB", default_value = "*.lock")]
        keep: String,

        /// Directories to clean
        paths: Vec<PathBuf>,
    },
    /// Print the effective configuration
    Config,
}

/// The documented form of `zap`, with the sections clap has no place for.
fn zap() -> Command {
    let mut app = Command::from(Zap::command())
        .example("zap list target\nzap clean --force target")
        .annotation(FILES_SECTION, "~/.config/zap/zap.toml\n\nUser configuration.")
        .annotation(ENVIRONMENT_SECTION, "ZAP_CONFIG overrides the configuration file path.");
    if let Some(clean) = app.find_mut(&["clean"]) {
        clean.example = "zap clean --force --keep '*.pdb' target".to_string();
    }
    app
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    if let Err(e) = try_main() {
        log::error!("{:#}", e);
        exit(1);
    }
}

fn try_main() -> Result<()> {
    let options = Options::new()
        .left_footer("zap")
        .center_header("zap manual")
        .author("The zap developers")
        .bugs("Report bugs to the zap issue tracker.");

    DocGenTool::new(zap(), Registry::default())
        .add_doc_generator(options.clone(), "troff")
        .add_doc_generator(options.clone(), "mdoc")
        .add_doc_generator(options, "markdown")
        .add_bash_completion_generator("zap.sh")
        .execute()?;
    Ok(())
}

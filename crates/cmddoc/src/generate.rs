//! Tree walker: one page per documented command.

use crate::error::{Error, Result};
use crate::model::{Command, Node};
use crate::options::{Options, Settings};
use crate::page::Page;
use crate::registry::{Registry, TemplateEntry};
use std::fs::{self, File};
use std::io::{BufWriter, Write};

/// Renders pages with one set of options against one registry.
pub struct Generator<'r> {
    registry: &'r Registry,
    options: &'r Options,
}

impl<'r> Generator<'r> {
    pub fn new(registry: &'r Registry, options: &'r Options) -> Self {
        Generator { registry, options }
    }

    fn template(&self) -> Result<&'r TemplateEntry> {
        self.registry
            .lookup(&self.options.template)
            .ok_or_else(|| Error::TemplateNotFound(self.options.template.clone()))
    }

    /// Write a file for `root` and every documented descendant.
    ///
    /// Children are written before their parent. The first failure stops the
    /// run; files already written are left in place.
    pub fn generate_docs(&self, root: &Command) -> Result<()> {
        if root.name.is_empty() {
            return Err(Error::EmptyCommandName);
        }
        let entry = self.template()?;
        let settings = self.options.resolve(entry);

        fs::create_dir_all(&settings.directory).map_err(|source| Error::Io {
            path: settings.directory.clone(),
            source,
        })?;

        self.walk(&Node::root(root), entry, &settings)
    }

    fn walk(&self, node: &Node<'_>, entry: &TemplateEntry, settings: &Settings) -> Result<()> {
        for child in node.children() {
            if !child.command().is_documented() {
                log::debug!("skipping {}", child.command_path());
                continue;
            }
            self.walk(&child, entry, settings)?;
        }

        let path = settings.directory.join(settings.file_name(&node.command_path()));
        let io_err = |source| Error::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        render(node, entry, settings, &mut out)?;
        out.flush().map_err(io_err)?;

        log::info!("wrote {}", path.display());
        Ok(())
    }

    /// Render the page for `node` into `out` without touching the filesystem.
    pub fn generate_page(&self, node: &Node<'_>, out: &mut dyn Write) -> Result<()> {
        let entry = self.template()?;
        let settings = self.options.resolve(entry);
        render(node, entry, &settings, out)
    }
}

fn render(node: &Node<'_>, entry: &TemplateEntry, settings: &Settings, out: &mut dyn Write) -> Result<()> {
    log::debug!("rendering {}", node.command_path());
    let page = Page::extract(node, settings);
    let text = entry.renderer.render(&page)?;
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// Generate files for `root` and its descendants into `options.directory`.
pub fn generate_docs(root: &Command, options: &Options, registry: &Registry) -> Result<()> {
    Generator::new(registry, options).generate_docs(root)
}

/// Render a single page into `out`.
pub fn generate_page(node: &Node<'_>, options: &Options, registry: &Registry, out: &mut dyn Write) -> Result<()> {
    Generator::new(registry, options).generate_page(node, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Flag, Renderer};
    use std::io;
    use std::path::Path;
    use tempfile::TempDir;

    fn files_in(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    fn two_level() -> Command {
        Command::new("foo")
            .subcommand(Command::new("bar"))
            .subcommand(Command::new("cat"))
    }

    #[test]
    fn troff_file_names() {
        let dir = TempDir::new().unwrap();
        let opts = Options::new().directory(dir.path());
        generate_docs(&two_level(), &opts, &Registry::default()).unwrap();
        assert_eq!(files_in(dir.path()), vec!["foo-bar.1", "foo-cat.1", "foo.1"]);
    }

    #[test]
    fn section_changes_extension() {
        let dir = TempDir::new().unwrap();
        let opts = Options::new().directory(dir.path()).section("8");
        generate_docs(&Command::new("foo"), &opts, &Registry::default()).unwrap();
        assert_eq!(files_in(dir.path()), vec!["foo.8"]);
    }

    #[test]
    fn custom_separator_and_extension() {
        let dir = TempDir::new().unwrap();
        let opts = Options::new()
            .directory(dir.path())
            .file_separator("_")
            .file_extension("md");
        generate_docs(&two_level(), &opts, &Registry::default()).unwrap();
        assert_eq!(files_in(dir.path()), vec!["foo.md", "foo_bar.md", "foo_cat.md"]);
    }

    #[test]
    fn markdown_template_names() {
        let dir = TempDir::new().unwrap();
        let opts = Options::new().directory(dir.path()).template("markdown");
        generate_docs(&two_level(), &opts, &Registry::default()).unwrap();
        assert_eq!(files_in(dir.path()), vec!["foo.md", "foo_bar.md", "foo_cat.md"]);
    }

    #[test]
    fn skips_hidden_and_help_topics() {
        let dir = TempDir::new().unwrap();
        let root = two_level()
            .subcommand(Command::new("secret").hidden())
            .subcommand(Command::new("old").deprecated("gone"))
            .subcommand(Command::new("topics").help_topic());
        let opts = Options::new().directory(dir.path());
        generate_docs(&root, &opts, &Registry::default()).unwrap();
        assert_eq!(files_in(dir.path()), vec!["foo-bar.1", "foo-cat.1", "foo.1"]);
    }

    #[test]
    fn nested_output_directory_is_created() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("man").join("man1");
        let opts = Options::new().directory(&out);
        generate_docs(&Command::new("foo"), &opts, &Registry::default()).unwrap();
        assert!(out.join("foo.1").is_file());
    }

    #[test]
    fn empty_root_name_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let root = Command::new("").subcommand(Command::new("bar"));
        let opts = Options::new().directory(dir.path());
        let err = generate_docs(&root, &opts, &Registry::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyCommandName));
        assert_eq!(err.to_string(), "you need a command name to have a man page");
        assert!(files_in(dir.path()).is_empty());
    }

    #[test]
    fn unknown_template_is_an_error() {
        let dir = TempDir::new().unwrap();
        let opts = Options::new().directory(dir.path()).template("nope");
        let err = generate_docs(&Command::new("foo"), &opts, &Registry::default()).unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound(ref name) if name == "nope"));

        let mut buf = Vec::new();
        let cmd = Command::new("foo");
        let err = generate_page(&Node::root(&cmd), &opts, &Registry::default(), &mut buf).unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound(_)));
        assert!(buf.is_empty());
    }

    #[test]
    fn render_failure_stops_the_run() {
        let dir = TempDir::new().unwrap();
        let mut registry = Registry::new();
        registry.register("broken", "-", Some("txt"), "{{ command_path | nope }}");
        let opts = Options::new().directory(dir.path()).template("broken");
        let err = generate_docs(&two_level(), &opts, &registry).unwrap_err();
        assert!(matches!(err, Error::Render { .. }));
    }

    /// Renders every page except the root.
    struct FailsOnRoot;

    impl Renderer for FailsOnRoot {
        fn render(&self, page: &Page) -> Result<String> {
            if page.command_path == "foo" {
                return Err(Error::Render {
                    template: "picky".to_string(),
                    source: tera::Error::msg("root refused"),
                });
            }
            Ok(format!("page for {}\n", page.command_path))
        }
    }

    #[test]
    fn written_pages_survive_a_later_failure() {
        let dir = TempDir::new().unwrap();
        let mut registry = Registry::new();
        registry.register_renderer("picky", "-", Some("txt"), Box::new(FailsOnRoot));
        let opts = Options::new().directory(dir.path()).template("picky");

        let err = generate_docs(&two_level(), &opts, &registry).unwrap_err();
        assert!(matches!(err, Error::Render { ref template, .. } if template == "picky"));

        let bar = fs::read_to_string(dir.path().join("foo-bar.txt")).unwrap();
        assert_eq!(bar, "page for foo bar\n");
        let cat = fs::read_to_string(dir.path().join("foo-cat.txt")).unwrap();
        assert_eq!(cat, "page for foo cat\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_failure_is_returned() {
        let cmd = Command::new("foo");
        let err = generate_page(&Node::root(&cmd), &Options::new(), &Registry::default(), &mut BrokenPipe)
            .unwrap_err();
        assert!(matches!(err, Error::Write(ref e) if e.kind() == io::ErrorKind::Other));
    }

    #[test]
    fn page_content_lands_in_file() {
        let dir = TempDir::new().unwrap();
        let root = Command::new("foo")
            .about("does foo")
            .flag(Flag::new("thing", "a thing"));
        let opts = Options::new().directory(dir.path());
        generate_docs(&root, &opts, &Registry::default()).unwrap();
        let text = fs::read_to_string(dir.path().join("foo.1")).unwrap();
        assert!(text.starts_with(".TH \"FOO\" \"1\""));
        assert!(text.contains("foo \\- does foo"));
    }
}

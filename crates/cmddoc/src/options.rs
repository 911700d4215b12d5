//! Per-run generation options and their resolved form.

use crate::registry::TemplateEntry;
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

/// Name of the template used when none is chosen.
pub const DEFAULT_TEMPLATE: &str = "troff";

/// Configures how pages are generated. Every field is optional; empty
/// strings mean "not set".
#[derive(Debug, Clone)]
pub struct Options {
    /// Manual section (`1` if not set)
    pub section: String,
    /// Center footer on every page (defaults to the month and year of `date`)
    pub center_footer: String,
    /// Generation date (defaults to today)
    pub date: Option<NaiveDate>,
    pub left_footer: String,
    pub center_header: String,
    /// FILES section for every page; `man-files-section` overrides it per command
    pub files: String,
    /// BUGS section for every page; `man-bugs-section` overrides it per command
    pub bugs: String,
    /// ENVIRONMENT section for every page; `man-environment-section` overrides it per command
    pub environment: String,
    /// AUTHOR section for every page; `man-author-section` overrides it per command
    pub author: String,
    /// Where generated files are written
    pub directory: PathBuf,
    /// Separator between command names in file names (template default if not set)
    pub file_separator: Option<String>,
    /// File extension (template default, then the section, if not set)
    pub file_extension: Option<String>,
    /// Registered template to render with
    pub template: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            section: String::new(),
            center_footer: String::new(),
            date: None,
            left_footer: String::new(),
            center_header: String::new(),
            files: String::new(),
            bugs: String::new(),
            environment: String::new(),
            author: String::new(),
            directory: PathBuf::from("."),
            file_separator: None,
            file_extension: None,
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    pub fn center_footer(mut self, text: impl Into<String>) -> Self {
        self.center_footer = text.into();
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn left_footer(mut self, text: impl Into<String>) -> Self {
        self.left_footer = text.into();
        self
    }

    pub fn center_header(mut self, text: impl Into<String>) -> Self {
        self.center_header = text.into();
        self
    }

    pub fn files(mut self, text: impl Into<String>) -> Self {
        self.files = text.into();
        self
    }

    pub fn bugs(mut self, text: impl Into<String>) -> Self {
        self.bugs = text.into();
        self
    }

    pub fn environment(mut self, text: impl Into<String>) -> Self {
        self.environment = text.into();
        self
    }

    pub fn author(mut self, text: impl Into<String>) -> Self {
        self.author = text.into();
        self
    }

    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = dir.into();
        self
    }

    pub fn file_separator(mut self, sep: impl Into<String>) -> Self {
        self.file_separator = Some(sep.into());
        self
    }

    pub fn file_extension(mut self, ext: impl Into<String>) -> Self {
        self.file_extension = Some(ext.into());
        self
    }

    pub fn template(mut self, name: impl Into<String>) -> Self {
        self.template = name.into();
        self
    }

    /// Fill in every default against the chosen template.
    pub fn resolve(&self, entry: &TemplateEntry) -> Settings {
        let section = if self.section.is_empty() {
            "1".to_string()
        } else {
            self.section.clone()
        };
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let center_footer = if self.center_footer.is_empty() {
            date.format("%b %Y").to_string()
        } else {
            self.center_footer.clone()
        };
        let separator = self
            .file_separator
            .clone()
            .unwrap_or_else(|| entry.separator.clone());
        let extension = self
            .file_extension
            .clone()
            .or_else(|| entry.extension.clone())
            .unwrap_or_else(|| section.clone());

        Settings {
            section,
            date,
            center_footer,
            left_footer: self.left_footer.clone(),
            center_header: self.center_header.clone(),
            files: self.files.clone(),
            bugs: self.bugs.clone(),
            environment: self.environment.clone(),
            author: self.author.clone(),
            directory: self.directory.clone(),
            separator,
            extension,
        }
    }
}

/// [`Options`] with every default applied. Immutable for the rest of the run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub section: String,
    pub date: NaiveDate,
    pub center_footer: String,
    pub left_footer: String,
    pub center_header: String,
    pub files: String,
    pub bugs: String,
    pub environment: String,
    pub author: String,
    pub directory: PathBuf,
    pub separator: String,
    pub extension: String,
}

impl Settings {
    /// File name for a command path: spaces become the separator.
    pub fn file_name(&self, command_path: &str) -> String {
        format!(
            "{}.{}",
            command_path.replace(' ', &self.separator),
            self.extension
        )
    }
}

//! Template-facing projection of one command.

use crate::model::{
    Flag, Node, AUTHOR_SECTION, BUGS_SECTION, ENVIRONMENT_SECTION, EXAMPLES_SECTION,
    FILES_SECTION,
};
use crate::options::Settings;
use crate::ArgPolicy;
use serde::Serialize;

/// Everything a template can reference for one page.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub section: String,
    /// Long-form date, e.g. `June 21, 2018`
    pub date: String,
    pub center_footer: String,
    pub left_footer: String,
    pub center_header: String,
    pub use_line: String,
    pub command_path: String,
    pub short_description: String,
    pub description: String,
    pub no_args: bool,

    pub all_flags: Vec<FlagEntry>,
    pub inherited_flags: Vec<FlagEntry>,
    pub non_inherited_flags: Vec<FlagEntry>,
    pub see_alsos: Vec<SeeAlso>,
    pub sub_commands: Vec<String>,

    pub author: Option<String>,
    pub environment: Option<String>,
    pub files: Option<String>,
    pub bugs: Option<String>,
    pub examples: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlagEntry {
    pub shorthand: Option<char>,
    pub name: String,
    pub no_opt_def_val: Option<String>,
    pub def_value: String,
    pub usage: String,
    pub arg_hint: Option<String>,
}

/// How a "see also" entry relates to the documented command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Parent,
    Sibling,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeeAlso {
    pub cmd_path: String,
    pub section: String,
    pub relation: Relation,
}

impl Page {
    /// Build the page record for `node`.
    pub fn extract(node: &Node<'_>, settings: &Settings) -> Page {
        let cmd = node.command();

        let description = if cmd.long.is_empty() {
            cmd.short.clone()
        } else {
            cmd.long.clone()
        };

        let own: Vec<&Flag> = cmd.own_flags().collect();
        let inherited = node.inherited_flags();
        let all: Vec<&Flag> = own.iter().chain(inherited.iter()).copied().collect();

        let sub_commands = cmd
            .children
            .iter()
            .filter(|c| !c.help_topic)
            .map(|c| node.descend(c).command_path())
            .collect();

        let section_text = |key: &str, fallback: &str| {
            override_or(cmd.annotations.get(key).map(String::as_str), fallback)
        };

        Page {
            section: settings.section.clone(),
            date: settings.date.format("%B %-d, %Y").to_string(),
            center_footer: settings.center_footer.clone(),
            left_footer: settings.left_footer.clone(),
            center_header: settings.center_header.clone(),
            use_line: node.use_line(),
            command_path: node.command_path(),
            short_description: cmd.short.clone(),
            description,
            no_args: cmd.args == ArgPolicy::NoArgs,
            all_flags: flag_entries(&all),
            inherited_flags: flag_entries(&inherited),
            non_inherited_flags: flag_entries(&own),
            see_alsos: see_alsos(node, &settings.section),
            sub_commands,
            author: section_text(AUTHOR_SECTION, &settings.author),
            environment: section_text(ENVIRONMENT_SECTION, &settings.environment),
            files: section_text(FILES_SECTION, &settings.files),
            bugs: section_text(BUGS_SECTION, &settings.bugs),
            examples: section_text(EXAMPLES_SECTION, &cmd.example),
        }
    }
}

/// A non-empty annotation beats a non-empty fallback; neither means no section.
fn override_or(annotation: Option<&str>, fallback: &str) -> Option<String> {
    match annotation {
        Some(text) if !text.is_empty() => Some(text.to_string()),
        _ if !fallback.is_empty() => Some(fallback.to_string()),
        _ => None,
    }
}

/// Visible flags only, sorted by name.
fn flag_entries(flags: &[&Flag]) -> Vec<FlagEntry> {
    let mut entries: Vec<FlagEntry> = flags
        .iter()
        .filter(|f| f.is_visible())
        .map(|f| FlagEntry {
            shorthand: if f.shorthand_deprecated.is_some() {
                None
            } else {
                f.shorthand
            },
            name: f.name.clone(),
            no_opt_def_val: f.no_opt_default.clone(),
            def_value: f.default_value.clone(),
            usage: f.usage.clone(),
            arg_hint: f.arg_hint_value().map(str::to_string),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Parent, then siblings by name, then children by name.
fn see_alsos(node: &Node<'_>, section: &str) -> Vec<SeeAlso> {
    let cmd = node.command();
    let mut out = Vec::new();
    let entry = |path: String, relation| SeeAlso {
        cmd_path: path,
        section: section.to_string(),
        relation,
    };

    if let Some(parent) = node.parent() {
        out.push(entry(parent.command_path(), Relation::Parent));
        let mut siblings: Vec<_> = parent
            .command()
            .children
            .iter()
            .filter(|c| c.is_documented() && c.name != cmd.name)
            .collect();
        siblings.sort_by(|a, b| a.name.cmp(&b.name));
        for sibling in siblings {
            out.push(entry(parent.descend(sibling).command_path(), Relation::Sibling));
        }
    }

    let mut children: Vec<_> = cmd.children.iter().filter(|c| c.is_documented()).collect();
    children.sort_by(|a, b| a.name.cmp(&b.name));
    for child in children {
        out.push(entry(node.descend(child).command_path(), Relation::Child));
    }

    out
}

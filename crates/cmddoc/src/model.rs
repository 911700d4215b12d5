//! Command tree model: the read-only input to every generator.

use std::collections::BTreeMap;

/// Annotation overriding the FILES section for one command.
pub const FILES_SECTION: &str = "man-files-section";
/// Annotation overriding the BUGS section for one command.
pub const BUGS_SECTION: &str = "man-bugs-section";
/// Annotation overriding the ENVIRONMENT section for one command.
pub const ENVIRONMENT_SECTION: &str = "man-environment-section";
/// Annotation overriding the EXAMPLES section for one command.
pub const EXAMPLES_SECTION: &str = "man-examples-section";
/// Annotation overriding the AUTHOR section for one command.
pub const AUTHOR_SECTION: &str = "man-author-section";
/// Flag annotation naming the argument placeholder, e.g. `FILE`.
pub const ARG_HINTS: &str = "man-arg-hints";

/// What a command accepts as positional arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArgPolicy {
    /// Any positional argument is rejected.
    NoArgs,
    #[default]
    Arbitrary,
    /// Positionals are checked by a custom validator.
    Validated,
}

/// A single command in the tree: the root or a subcommand.
#[derive(Debug, Clone, Default)]
pub struct Command {
    pub name: String,
    /// Positional synopsis shown after the command path, e.g. `<file>...`
    pub usage: String,
    pub short: String,
    pub long: String,
    pub example: String,
    pub annotations: BTreeMap<String, String>,
    /// Flags that apply to this command only
    pub flags: Vec<Flag>,
    /// Flags this command declares and all descendants inherit
    pub persistent_flags: Vec<Flag>,
    pub args: ArgPolicy,
    pub hidden: bool,
    pub deprecated: Option<String>,
    /// Documentation-only placeholder without behavior of its own
    pub help_topic: bool,
    pub children: Vec<Command>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Command {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn about(mut self, short: impl Into<String>) -> Self {
        self.short = short.into();
        self
    }

    pub fn long_about(mut self, long: impl Into<String>) -> Self {
        self.long = long.into();
        self
    }

    pub fn usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub fn annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn flag(mut self, flag: Flag) -> Self {
        self.flags.push(flag);
        self
    }

    pub fn persistent_flag(mut self, flag: Flag) -> Self {
        self.persistent_flags.push(flag);
        self
    }

    pub fn args(mut self, policy: ArgPolicy) -> Self {
        self.args = policy;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self
    }

    pub fn help_topic(mut self) -> Self {
        self.help_topic = true;
        self
    }

    pub fn subcommand(mut self, child: Command) -> Self {
        self.children.push(child);
        self
    }

    /// Neither hidden nor deprecated.
    pub fn is_available(&self) -> bool {
        !self.hidden && self.deprecated.is_none()
    }

    /// Whether the generators should produce a page for this command.
    pub fn is_documented(&self) -> bool {
        self.is_available() && !self.help_topic
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&Command> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Mutable lookup along a path of child names, e.g. `["remote", "add"]`.
    pub fn find_mut(&mut self, path: &[&str]) -> Option<&mut Command> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self
                .children
                .iter_mut()
                .find(|c| c.name == *first)?
                .find_mut(rest),
        }
    }

    /// Local and persistent flags declared on this command.
    pub fn own_flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter().chain(self.persistent_flags.iter())
    }
}

/// A single command-line flag.
#[derive(Debug, Clone, Default)]
pub struct Flag {
    pub name: String,
    pub shorthand: Option<char>,
    pub usage: String,
    /// Default value as displayed to the user
    pub default_value: String,
    /// Value implied when the flag is given without an argument
    pub no_opt_default: Option<String>,
    pub deprecated: Option<String>,
    pub shorthand_deprecated: Option<String>,
    pub hidden: bool,
    pub annotations: BTreeMap<String, Vec<String>>,
}

impl Flag {
    pub fn new(name: impl Into<String>, usage: impl Into<String>) -> Self {
        Flag {
            name: name.into(),
            usage: usage.into(),
            ..Default::default()
        }
    }

    /// A boolean switch: defaults to `false`, implies `true` when present.
    pub fn switch(name: impl Into<String>, usage: impl Into<String>) -> Self {
        Flag::new(name, usage).default_value("false").no_opt_default("true")
    }

    pub fn short(mut self, c: char) -> Self {
        self.shorthand = Some(c);
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = value.into();
        self
    }

    pub fn no_opt_default(mut self, value: impl Into<String>) -> Self {
        self.no_opt_default = Some(value.into());
        self
    }

    pub fn deprecated(mut self, message: impl Into<String>) -> Self {
        self.deprecated = Some(message.into());
        self
    }

    pub fn shorthand_deprecated(mut self, message: impl Into<String>) -> Self {
        self.shorthand_deprecated = Some(message.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn annotation(mut self, key: impl Into<String>, values: Vec<String>) -> Self {
        self.annotations.insert(key.into(), values);
        self
    }

    pub fn arg_hint(self, hint: impl Into<String>) -> Self {
        self.annotation(ARG_HINTS, vec![hint.into()])
    }

    /// Hidden and deprecated flags never reach the documentation.
    pub fn is_visible(&self) -> bool {
        !self.hidden && self.deprecated.is_none()
    }

    pub fn arg_hint_value(&self) -> Option<&str> {
        self.annotations
            .get(ARG_HINTS)
            .and_then(|hints| hints.first())
            .map(String::as_str)
    }
}

/// A command together with its ancestor chain.
///
/// The tree itself stores only child links; a `Node` supplies the parent
/// side while walking down from the root.
#[derive(Debug, Clone)]
pub struct Node<'a> {
    command: &'a Command,
    ancestors: Vec<&'a Command>,
}

impl<'a> Node<'a> {
    pub fn root(command: &'a Command) -> Self {
        Node {
            command,
            ancestors: Vec::new(),
        }
    }

    pub fn command(&self) -> &'a Command {
        self.command
    }

    pub fn has_parent(&self) -> bool {
        !self.ancestors.is_empty()
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        let (parent, rest) = self.ancestors.split_last()?;
        Some(Node {
            command: parent,
            ancestors: rest.to_vec(),
        })
    }

    /// Cursor for a child command of this node.
    pub fn descend(&self, child: &'a Command) -> Node<'a> {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(self.command);
        Node {
            command: child,
            ancestors,
        }
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + '_ {
        self.command.children.iter().map(|c| self.descend(c))
    }

    /// Follow child names from this node, e.g. `["remote", "add"]`.
    pub fn find(&self, path: &[&str]) -> Option<Node<'a>> {
        let mut node = self.clone();
        for name in path {
            let child = node.command.child(name)?;
            node = node.descend(child);
        }
        Some(node)
    }

    /// Names from the root down to this command, joined by spaces.
    pub fn command_path(&self) -> String {
        self.ancestors
            .iter()
            .chain(std::iter::once(&self.command))
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Persistent flags of the ancestors, nearest first, minus any name
    /// already declared closer to this command.
    pub fn inherited_flags(&self) -> Vec<&'a Flag> {
        let mut seen: Vec<&str> = self.command.own_flags().map(|f| f.name.as_str()).collect();
        let mut inherited = Vec::new();
        for ancestor in self.ancestors.iter().rev() {
            for flag in &ancestor.persistent_flags {
                if seen.contains(&flag.name.as_str()) {
                    continue;
                }
                seen.push(flag.name.as_str());
                inherited.push(flag);
            }
        }
        inherited
    }

    /// `<path> <usage> [flags]`, the way the command is invoked.
    pub fn use_line(&self) -> String {
        let mut line = self.command_path();
        if !self.command.usage.is_empty() {
            line.push(' ');
            line.push_str(&self.command.usage);
        }
        let has_flags = self.command.own_flags().any(Flag::is_visible)
            || self.inherited_flags().iter().any(|f| f.is_visible());
        if has_flags && !line.contains("[flags]") {
            line.push_str(" [flags]");
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Command {
        Command::new("git")
            .persistent_flag(Flag::switch("verbose", "be chatty").short('v'))
            .persistent_flag(Flag::new("config", "config file"))
            .subcommand(
                Command::new("remote")
                    .persistent_flag(Flag::new("config", "remote config"))
                    .subcommand(Command::new("add").usage("<name> <url>")),
            )
    }

    #[test]
    fn command_path_joins_names() {
        let root = tree();
        let node = Node::root(&root).find(&["remote", "add"]).unwrap();
        assert_eq!(node.command_path(), "git remote add");
        assert_eq!(node.parent().unwrap().command_path(), "git remote");
        assert!(Node::root(&root).parent().is_none());
    }

    #[test]
    fn nearest_persistent_flag_shadows() {
        let root = tree();
        let node = Node::root(&root).find(&["remote", "add"]).unwrap();
        let inherited = node.inherited_flags();
        let names: Vec<_> = inherited.iter().map(|f| (f.name.as_str(), f.usage.as_str())).collect();
        assert_eq!(names, vec![("config", "remote config"), ("verbose", "be chatty")]);
    }

    #[test]
    fn use_line_appends_flags_marker() {
        let root = tree();
        let node = Node::root(&root).find(&["remote", "add"]).unwrap();
        assert_eq!(node.use_line(), "git remote add <name> <url> [flags]");

        let bare = Command::new("foo");
        assert_eq!(Node::root(&bare).use_line(), "foo");
    }

    #[test]
    fn find_mut_reaches_nested_commands() {
        let mut root = tree();
        root.find_mut(&["remote", "add"]).unwrap().example = "git remote add o url".into();
        assert_eq!(root.child("remote").unwrap().child("add").unwrap().example, "git remote add o url");
        assert!(root.find_mut(&["nope"]).is_none());
    }

    #[test]
    fn availability() {
        assert!(Command::new("a").is_documented());
        assert!(!Command::new("a").hidden().is_available());
        assert!(!Command::new("a").deprecated("use b").is_available());
        assert!(Command::new("a").help_topic().is_available());
        assert!(!Command::new("a").help_topic().is_documented());
    }
}

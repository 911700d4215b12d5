//! Build a [`Command`] tree from a `clap::Command`.

use crate::model::{ArgPolicy, Command, Flag, ARG_HINTS};

impl From<&clap::Command> for Command {
    fn from(cmd: &clap::Command) -> Self {
        let mut out = Command::new(cmd.get_name());
        if let Some(about) = cmd.get_about() {
            out.short = about.to_string();
        }
        if let Some(long) = cmd.get_long_about() {
            out.long = long.to_string();
        }
        out.hidden = cmd.is_hide_set();

        let positionals: Vec<&clap::Arg> = cmd.get_positionals().collect();
        out.args = if positionals.is_empty() {
            ArgPolicy::NoArgs
        } else {
            ArgPolicy::Validated
        };
        out.usage = positionals
            .iter()
            .map(|arg| positional_synopsis(arg))
            .collect::<Vec<_>>()
            .join(" ");

        for arg in cmd.get_arguments().filter(|a| !a.is_positional()) {
            let flag = flag_from_arg(arg);
            if arg.is_global_set() {
                out.persistent_flags.push(flag);
            } else {
                out.flags.push(flag);
            }
        }

        out.children = cmd.get_subcommands().map(Command::from).collect();
        out
    }
}

impl From<clap::Command> for Command {
    fn from(cmd: clap::Command) -> Self {
        Command::from(&cmd)
    }
}

fn value_names(arg: &clap::Arg) -> Vec<String> {
    arg.get_value_names()
        .map(|names| names.iter().map(|n| n.to_string()).collect())
        .unwrap_or_default()
}

/// `<NAME>` when required, `[NAME]` otherwise, with `...` when repeatable.
fn positional_synopsis(arg: &clap::Arg) -> String {
    let names = value_names(arg);
    let name = if names.is_empty() {
        arg.get_id().as_str().to_uppercase()
    } else {
        names.join(" ")
    };
    let repeated = arg
        .get_num_args()
        .map(|range| range.max_values() > 1)
        .unwrap_or(false);
    let dots = if repeated { "..." } else { "" };
    if arg.is_required_set() {
        format!("<{}>{}", name, dots)
    } else {
        format!("[{}]{}", name, dots)
    }
}

fn flag_from_arg(arg: &clap::Arg) -> Flag {
    let name = arg
        .get_long()
        .map(str::to_string)
        .unwrap_or_else(|| arg.get_id().as_str().to_string());
    let mut flag = Flag::new(name, arg.get_help().map(|h| h.to_string()).unwrap_or_default());
    flag.shorthand = arg.get_short();
    flag.hidden = arg.is_hide_set();
    flag.default_value = arg
        .get_default_values()
        .iter()
        .map(|v| v.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(",");
    if !arg.get_action().takes_values() {
        flag.no_opt_default = Some("true".to_string());
    }
    let names = value_names(arg);
    if !names.is_empty() {
        flag.annotations.insert(ARG_HINTS.to_string(), vec![names.join(" ")]);
    }
    flag
}

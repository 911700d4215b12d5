//! Bash completion script generation for a command tree.

use crate::error::{Error, Result};
use crate::model::{Command, Node};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a bash completion script for `root` to `path`.
pub fn generate_bash_completion_file(root: &Command, path: &Path) -> Result<()> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    write_bash_completion(root, &mut out).map_err(io_err)?;
    out.flush().map_err(io_err)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

/// Emit a bash completion function for `root` and all of its subcommands.
///
/// The function follows the already-typed words down the tree, then offers
/// that command's flags (after `-`) or its subcommands.
pub fn write_bash_completion<W: Write>(root: &Command, out: &mut W) -> std::io::Result<()> {
    let cmd_name = &root.name;
    let func_name = format!("_{}", sanitize_function_name(cmd_name));

    let mut nodes = Vec::new();
    collect(&Node::root(root), &mut nodes);

    writeln!(out, "# bash completion for {}", cmd_name.replace('\n', " "))?;
    writeln!(out, "{}() {{", func_name)?;
    writeln!(out, "    local cur=\"${{COMP_WORDS[COMP_CWORD]}}\"")?;
    writeln!(out, "    local path={}", shell_quote(cmd_name))?;
    writeln!(out, "    local flags=\"\" cmds=\"\" i")?;
    writeln!(out)?;

    // Descend through the words typed so far
    let nested: Vec<String> = nodes
        .iter()
        .filter(|n| n.has_parent())
        .map(|n| shell_quote(&n.command_path()))
        .collect();
    writeln!(out, "    for ((i = 1; i < COMP_CWORD; i++)); do")?;
    if !nested.is_empty() {
        writeln!(out, "        case \"${{path}} ${{COMP_WORDS[i]}}\" in")?;
        writeln!(out, "            {})", nested.join("|"))?;
        writeln!(out, "                path=\"${{path}} ${{COMP_WORDS[i]}}\"")?;
        writeln!(out, "                ;;")?;
        writeln!(out, "        esac")?;
    } else {
        writeln!(out, "        :")?;
    }
    writeln!(out, "    done")?;
    writeln!(out)?;

    writeln!(out, "    case \"${{path}}\" in")?;
    for node in &nodes {
        writeln!(out, "        {})", shell_quote(&node.command_path()))?;
        writeln!(out, "            flags={}", shell_quote(&flag_words(node).join(" ")))?;
        writeln!(out, "            cmds={}", shell_quote(&command_words(node.command()).join(" ")))?;
        writeln!(out, "            ;;")?;
    }
    writeln!(out, "    esac")?;
    writeln!(out)?;

    writeln!(out, "    if [[ \"${{cur}}\" == -* ]]; then")?;
    writeln!(out, "        COMPREPLY=($(compgen -W \"${{flags}}\" -- \"${{cur}}\"))")?;
    writeln!(out, "    else")?;
    writeln!(out, "        COMPREPLY=($(compgen -W \"${{cmds}}\" -- \"${{cur}}\"))")?;
    writeln!(out, "    fi")?;
    writeln!(out, "}}")?;
    writeln!(out, "complete -o default -F {} {}", func_name, shell_quote(cmd_name))?;
    Ok(())
}

/// Pre-order list of every command that can be completed.
fn collect<'a>(node: &Node<'a>, nodes: &mut Vec<Node<'a>>) {
    nodes.push(node.clone());
    for child in node.children() {
        if child.command().is_documented() {
            collect(&child, nodes);
        }
    }
}

/// `--long` and `-s` forms of every visible flag, own and inherited.
fn flag_words(node: &Node<'_>) -> Vec<String> {
    let inherited = node.inherited_flags();
    node.command()
        .own_flags()
        .chain(inherited.into_iter())
        .filter(|f| f.is_visible())
        .flat_map(|f| {
            let mut words = vec![format!("--{}", f.name)];
            if let (Some(short), None) = (f.shorthand, &f.shorthand_deprecated) {
                words.push(format!("-{}", short));
            }
            words
        })
        .collect()
}

fn command_words(cmd: &Command) -> Vec<&str> {
    cmd.children
        .iter()
        .filter(|c| c.is_documented())
        .map(|c| c.name.as_str())
        .collect()
}

/// Single-quote `s` for bash; nothing inside is expanded.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Shell function names allow only `[A-Za-z0-9_]`.
fn sanitize_function_name(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

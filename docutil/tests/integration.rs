use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_docutil")));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn files_in(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

// -- help --

#[test]
fn help_lists_generators() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate documentation, etc."))
        .stdout(predicate::str::contains("generate-troff"))
        .stdout(predicate::str::contains("generate-mdoc"))
        .stdout(predicate::str::contains("generate-markdown"))
        .stdout(predicate::str::contains("generate-auto-complete"));
}

#[test]
fn no_subcommand_prints_help() {
    cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("generate-markdown"));
}

#[test]
fn unknown_subcommand_fails() {
    cmd()
        .arg("generate-html")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ERROR"))
        .stderr(predicate::str::contains("generate-html"));
}

// -- generators --

#[test]
fn troff_pages_per_command() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["generate-troff", "--directory"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("zap.1"));

    assert_eq!(
        files_in(&dir),
        vec!["zap-clean.1", "zap-config.1", "zap-list.1", "zap.1"]
    );

    let page = std::fs::read_to_string(dir.path().join("zap-clean.1")).unwrap();
    assert!(page.starts_with(".TH \"ZAP-CLEAN\" \"1\""));
    assert!(page.contains("\"zap\" \"zap manual\""));
    assert!(page.contains(".SH NAME\nzap\\-clean \\- Remove artifacts\n"));
    assert!(page.contains("\\fB\\-\\-keep\\fP=\\fIGLOB\\fP"));
    assert!(page.contains(".SH OPTIONS INHERITED FROM PARENT COMMANDS"));
    assert!(page.contains(".SH EXAMPLES\n.PP\nzap clean \\-\\-force \\-\\-keep '*.pdb' target\n"));
    assert!(page.contains(".SH AUTHOR\n.PP\nThe zap developers\n"));
}

#[test]
fn root_page_carries_annotations() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["generate-troff", "--directory"])
        .arg(dir.path())
        .assert()
        .success();

    let page = std::fs::read_to_string(dir.path().join("zap.1")).unwrap();
    assert!(page.contains(".SH FILES\n.PP\n\\~/.config/zap/zap.toml\n.PP\nUser configuration.\n"));
    assert!(page.contains(".SH ENVIRONMENT\n.PP\nZAP\\_CONFIG overrides"));
    assert!(page.contains(".SH SEE ALSO\n.BR zap\\-clean (1),\n.BR zap\\-config (1),\n.BR zap\\-list (1)\n"));
}

#[test]
fn markdown_into_directory() {
    let dir = TempDir::new().unwrap();
    cmd()
        .args(["generate-markdown", "--directory"])
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(
        files_in(&dir),
        vec!["zap.md", "zap_clean.md", "zap_config.md", "zap_list.md"]
    );
    let page = std::fs::read_to_string(dir.path().join("zap.md")).unwrap();
    assert!(page.starts_with("zap\n===\n\nTidy up build artifacts\n"));
    assert!(page.contains("* [zap clean](zap_clean.md)"));
}

#[test]
fn mdoc_creates_nested_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("man").join("man1");
    cmd()
        .arg("generate-mdoc")
        .arg("--directory")
        .arg(&out)
        .assert()
        .success();

    let page = std::fs::read_to_string(out.join("zap-list.1")).unwrap();
    assert!(page.contains(".Dt ZAP-LIST 1\n"));
    assert!(page.contains(".Nd List artifacts that would be removed\n"));
}

#[test]
fn completion_script() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg("--directory")
        .arg(dir.path())
        .arg("generate-auto-complete")
        .assert()
        .success();

    assert_eq!(files_in(&dir), vec!["zap.sh"]);
    let script = std::fs::read_to_string(dir.path().join("zap.sh")).unwrap();
    assert!(script.contains("_zap() {"));
    assert!(script.contains("cmds='list clean config'"));
    assert!(script.contains("--force -f"));
    assert!(script.ends_with("complete -o default -F _zap 'zap'\n"));
}

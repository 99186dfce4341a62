//! Full runs of the `excludepaths` binary against temporary trees.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use test_support::TreeFixture;

fn excludepaths() -> Command {
    Command::new(env!("CARGO_BIN_EXE_excludepaths"))
}

fn package_tree() -> TreeFixture {
    let fixture = TreeFixture::new();
    fixture.files(&[
        "usr/bin/tool",
        "usr/share/doc/tool/changelog.gz",
        "usr/share/doc/tool/copyright",
        "usr/share/doc/libfoo/README",
        "usr/share/man/man1/tool.1.gz",
        "usr/share/man/de/man1/tool.1.gz",
        "usr/share/locale/de/LC_MESSAGES/tool.mo",
        "usr/share/locale/en/LC_MESSAGES/tool.mo",
    ]);
    fixture
}

const MINIMAL_RULES: &str = "\
# Drop docs but keep copyright files
path-exclude /usr/share/doc/*
path-include /usr/share/doc/*/copyright
path-exclude /usr/share/man/*
path-include /usr/share/man/man1/*
path-exclude /usr/share/locale/*
path-include /usr/share/locale/en*
";

fn expected(fixture: &TreeFixture, relatives: &[&str]) -> String {
    relatives
        .iter()
        .map(|relative| format!("{}\n", fixture.path(relative).display()))
        .collect()
}

// ============================================================================
// Rules from standard input
// ============================================================================

#[test]
fn stdin_rules_produce_collapsed_list() {
    let fixture = package_tree();
    excludepaths()
        .arg(fixture.root())
        .write_stdin(MINIMAL_RULES)
        .assert()
        .success()
        .stdout(expected(
            &fixture,
            &[
                "usr/share/doc/libfoo/README",
                "usr/share/doc/libfoo",
                "usr/share/doc/tool/changelog.gz",
                "usr/share/locale/de/LC_MESSAGES/tool.mo",
                "usr/share/locale/de/LC_MESSAGES",
                "usr/share/locale/de",
                "usr/share/man/de/man1/tool.1.gz",
                "usr/share/man/de/man1",
                "usr/share/man/de",
            ],
        ));
}

#[test]
fn dedupe_keeps_only_outermost_entries() {
    let fixture = package_tree();
    excludepaths()
        .arg("--dedupe")
        .arg(fixture.root())
        .write_stdin(MINIMAL_RULES)
        .assert()
        .success()
        .stdout(expected(
            &fixture,
            &[
                "usr/share/doc/libfoo",
                "usr/share/doc/tool/changelog.gz",
                "usr/share/locale/de",
                "usr/share/man/de",
            ],
        ));
}

#[test]
fn parallel_output_matches_sequential_output() {
    let fixture = package_tree();
    let sequential = excludepaths()
        .arg(fixture.root())
        .write_stdin(MINIMAL_RULES)
        .output()
        .expect("sequential run");
    excludepaths()
        .arg("--parallel")
        .arg(fixture.root())
        .write_stdin(MINIMAL_RULES)
        .assert()
        .success()
        .stdout(sequential.stdout);
}

#[test]
fn no_rules_means_no_output() {
    let fixture = package_tree();
    excludepaths()
        .arg(fixture.root())
        .write_stdin("# nothing configured\npath-something-else /x\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ============================================================================
// Rule files, fragment directories and output files
// ============================================================================

#[test]
fn rules_dir_and_output_file() {
    let fixture = package_tree();
    let dir = fixture.aux_dir("dpkg.cfg.d");
    fs::write(dir.join("01_nodoc"), "path-exclude /usr/share/doc/*\n").expect("fragment");
    fs::write(
        dir.join("02_keep_copyright"),
        "path-include /usr/share/doc/*/copyright\n",
    )
    .expect("fragment");
    fs::write(dir.join(".hidden"), "path-exclude /usr/bin/*\n").expect("hidden fragment");
    let output = fixture.aux().join("list");

    excludepaths()
        .arg("--rules-dir")
        .arg(&dir)
        .arg("--output")
        .arg(&output)
        .arg(fixture.root())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&output).expect("read output");
    assert_eq!(
        written,
        expected(
            &fixture,
            &[
                "usr/share/doc/libfoo/README",
                "usr/share/doc/libfoo",
                "usr/share/doc/tool/changelog.gz",
            ],
        )
    );
}

#[test]
fn null_records_from_rule_file() {
    let fixture = package_tree();
    let rules = fixture.aux_file("rules.cfg", "path-exclude /usr/bin/*\n");

    excludepaths()
        .args(["-0", "-f"])
        .arg(&rules)
        .arg(fixture.root())
        .assert()
        .success()
        .stdout(format!("{}\0", fixture.path("usr/bin/tool").display()));
}

#[cfg(unix)]
#[test]
fn latin1_rule_matches_latin1_name_byte_for_byte() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let fixture = TreeFixture::new();
    let name = OsStr::from_bytes(b"caf\xe9");
    fs::write(fixture.root().join(name), b"menu").expect("write latin1 file");
    fixture.file("keep");

    let mut expected = fixture.root().join(name).into_os_string().into_vec();
    expected.push(b'\n');

    excludepaths()
        .arg(fixture.root())
        .write_stdin(b"path-exclude /caf\xe9*\n".to_vec())
        .assert()
        .success()
        .stdout(expected);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn missing_root_is_fatal() {
    let fixture = TreeFixture::new();
    excludepaths()
        .arg(fixture.path("absent"))
        .write_stdin(MINIMAL_RULES)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("cannot walk"));
}

#[test]
fn unreadable_rules_dir_is_fatal() {
    let fixture = package_tree();
    excludepaths()
        .arg("-d")
        .arg(fixture.aux().join("missing.d"))
        .arg(fixture.root())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to list rule fragments"));
}

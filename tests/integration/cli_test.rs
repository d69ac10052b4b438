//! Integration tests for the command line interface

use assert_cmd::Command;
use predicates::prelude::*;

use crate::helpers::{deck_dir, unused_port, TestPlayer, SAMPLE_DECK};

fn termdeck() -> Command {
    let mut cmd = Command::cargo_bin("termdeck").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

// ============================================================================
// Help Output
// ============================================================================

#[test]
fn help_lists_subcommands() {
    termdeck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("remote"))
        .stdout(predicate::str::contains("console"));
}

#[test]
fn play_without_deck_is_usage_error() {
    termdeck()
        .arg("play")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<DECK>"));
}

// ============================================================================
// check
// ============================================================================

#[test]
fn check_prints_summary() {
    let (_dir, path) = deck_dir(SAMPLE_DECK, &[]);
    termdeck()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 slides"))
        .stdout(predicate::str::contains("Details"))
        .stdout(predicate::str::contains("steps=2"))
        .stdout(predicate::str::contains("remember the demo").not());
}

#[test]
fn check_with_notes_prints_handouts() {
    let (_dir, path) = deck_dir(SAMPLE_DECK, &[]);
    termdeck()
        .args(["check", "--notes"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("remember the demo"));
}

#[test]
fn check_invalid_deck_fails() {
    let (_dir, path) = deck_dir("[[slides]]\ntransition = { style = \"spin\" }\n", &[]);
    termdeck()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("spin"));
}

// ============================================================================
// remote
// ============================================================================

#[test]
fn remote_prints_raw_response() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let port = player.addr().port().to_string();

    termdeck()
        .args(["remote", "current", "--host", "127.0.0.1", "--port", &port])
        .assert()
        .success()
        .stdout("current 0 0 Intro\n");

    termdeck()
        .args(["remote", "jump", "2", "--host", "127.0.0.1", "--port", &port])
        .assert()
        .success()
        .stdout("current 2 0 Thanks\n");

    termdeck()
        .args(["remote", "list", "--host", "127.0.0.1", "--port", &port])
        .assert()
        .success()
        .stdout("slide 0 Intro\nslide 1 Details\nslide 2 Thanks\nend\n");
}

#[test]
fn remote_rejected_jump_fails() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let port = player.addr().port().to_string();
    termdeck()
        .args(["remote", "jump", "7", "--host", "127.0.0.1", "--port", &port])
        .assert()
        .failure()
        .stdout("err\n");
}

#[test]
fn remote_bad_index_fails_before_connecting() {
    termdeck()
        .args(["remote", "jump", "abc", "--port", &unused_port().to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid remote command"));
}

#[test]
fn remote_without_player_fails() {
    termdeck()
        .args(["remote", "current", "--host", "127.0.0.1", "--port", &unused_port().to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to connect"));
}

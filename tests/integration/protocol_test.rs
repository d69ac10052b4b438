//! Control protocol against a live in-process player

use std::collections::HashSet;
use std::thread;

use termdeck::control::Client;

use crate::helpers::{TestPlayer, SAMPLE_DECK};

// ============================================================================
// Read-only Commands
// ============================================================================

#[test]
fn list_returns_titles_then_end() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let mut client = player.connect();
    client.send("list");
    assert_eq!(client.read_line(), "slide 0 Intro\n");
    assert_eq!(client.read_line(), "slide 1 Details\n");
    assert_eq!(client.read_line(), "slide 2 Thanks\n");
    assert_eq!(client.read_line(), "end\n");
}

#[test]
fn current_reports_first_slide_after_start() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let mut client = player.connect();
    assert_eq!(client.ask("current"), "current 0 0 Intro\n");
}

#[test]
fn size_reports_player_screen() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let mut client = player.connect();
    assert_eq!(client.ask("size"), "size 40 10\n");
}

#[test]
fn whitespace_around_requests_is_ignored() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let mut client = player.connect();
    assert_eq!(client.ask("  current \r"), "current 0 0 Intro\n");
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn next_walks_reveals_then_slides() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let mut client = player.connect();
    assert_eq!(client.ask("next"), "current 1 0 Details\n");
    assert_eq!(client.ask("next"), "current 1 1 Details\n");
    assert_eq!(client.ask("next"), "current 1 2 Details\n");
    assert_eq!(client.ask("next"), "current 2 0 Thanks\n");
    // end of deck
    assert_eq!(client.ask("next"), "current 2 0 Thanks\n");
    // backing onto a slide shows it fully revealed
    assert_eq!(client.ask("prev"), "current 1 2 Details\n");
}

#[test]
fn prev_at_start_stays_put() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let mut client = player.connect();
    assert_eq!(client.ask("prev"), "current 0 0 Intro\n");
}

#[test]
fn jump_moves_to_slide() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let mut client = player.connect();
    assert_eq!(client.ask("jump 2"), "current 2 0 Thanks\n");
    assert_eq!(client.ask("jump 1"), "current 1 0 Details\n");
}

#[test]
fn out_of_range_jump_answers_err_and_keeps_state() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let mut client = player.connect();
    assert_eq!(client.ask("jump 99"), "err\n");
    assert_eq!(client.ask("current"), "current 0 0 Intro\n");
}

#[test]
fn bad_jump_arguments_answer_err() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let mut client = player.connect();
    assert_eq!(client.ask("jump abc"), "err\n");
    assert_eq!(client.ask("jump"), "err\n");
    assert_eq!(client.ask("jump -1"), "err\n");
}

#[test]
fn unknown_verbs_get_no_answer() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let mut client = player.connect();
    client.send("dance");
    client.send("");
    // the next line read belongs to this request
    assert_eq!(client.ask("current"), "current 0 0 Intro\n");
}

#[test]
fn invalid_utf8_line_keeps_connection_open() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let mut client = player.connect();
    client.send_raw(b"\xff\xfe\n");
    client.send_raw(b"jump \xff\n");
    assert_eq!(client.read_line(), "err\n");
    assert_eq!(client.ask("current"), "current 0 0 Intro\n");
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn concurrent_next_requests_are_serialized() {
    let deck = r#"
[defaults]
transition = { style = "cut" }

[[slides]]
title = "A"

[[slides]]
title = "B"

[[slides]]
title = "C"
"#;
    let player = TestPlayer::start(deck);
    let addr = player.addr();

    let workers: Vec<_> = (0..2)
        .map(|_| {
            thread::spawn(move || {
                let mut client = crate::helpers::LineClient::connect(addr);
                client.ask("next")
            })
        })
        .collect();
    let answers: HashSet<String> = workers.into_iter().map(|w| w.join().unwrap()).collect();

    // each request saw its own step, so the answers differ
    let expected: HashSet<String> = ["current 1 0 B\n", "current 2 0 C\n"]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(answers, expected);

    let controller = player.stop();
    assert_eq!(controller.position().index, Some(2));
}

#[test]
fn transitions_are_drawn_before_the_answer() {
    let deck = r#"
[defaults]
transition = { style = "dissolve", duration = 0.05 }

[[slides]]
title = "A"

[[slides]]
title = "B"
"#;
    let player = TestPlayer::start(deck);
    let mut client = player.connect();
    assert_eq!(client.ask("next"), "current 1 0 B\n");

    let controller = player.stop();
    // blank to A, A to B: both transitions produced intermediate frames
    assert!(controller.display().frames().len() > 4);
}

// ============================================================================
// Library Client
// ============================================================================

#[test]
fn client_parses_responses() {
    let player = TestPlayer::start(SAMPLE_DECK);
    let addr = player.addr();
    let mut client = Client::connect(&addr.ip().to_string(), addr.port()).unwrap();

    assert_eq!(client.list().unwrap(), vec!["Intro", "Details", "Thanks"]);
    let report = client.jump(1).unwrap();
    assert_eq!(report.index, Some(1));
    assert_eq!(report.title, "Details");
    assert_eq!(client.next().unwrap().depth, 1);
    assert_eq!(client.size().unwrap().cols, 40);
    assert!(client.jump(42).is_err());
    assert_eq!(client.current().unwrap().depth, 1);
}

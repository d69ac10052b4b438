//! ANSI parser tests.
//!
//! Organized by handler category:
//! - plain text and control characters
//! - cursor movement
//! - SGR color/attribute parsing
//! - run coalescing of the final grid

use crate::terminal::{AnsiParser, Attr, CellFlags, Color, GridPerformer, Run, LINE_WIDTH};

fn red() -> Attr {
    Attr::new(Color::Indexed(1), Color::Indexed(0))
}

// === Plain text ===

#[test]
fn plain_text_runs_match_lines() {
    let art = AnsiParser::parse_str("hello\r\nworld  \r\n");
    assert_eq!(
        art.runs,
        vec![Run::new(Attr::ansi_default(), "hello\nworld\n")]
    );
}

#[test]
fn plain_text_without_escapes_splits_per_line() {
    let lines = ["first line", "  indented", "", "last"];
    let input = lines.join("\r\n");
    let art = AnsiParser::parse_str(&input);

    assert_eq!(art.runs.len(), 1);
    let expected: String = lines.iter().map(|l| format!("{}\n", l.trim_end())).collect();
    assert_eq!(art.runs[0].text, expected);
}

#[test]
fn line_feed_preserves_column() {
    let art = AnsiParser::parse_str("ab\ncd");
    assert_eq!(art.canvas.cell(2, 1).ch, 'c');
    assert_eq!(art.canvas.cell(3, 1).ch, 'd');
}

#[test]
fn carriage_return_overwrites_line() {
    let art = AnsiParser::parse_str("abc\rX");
    assert_eq!(art.canvas.cell(0, 0).ch, 'X');
    assert_eq!(art.canvas.cell(1, 0).ch, 'b');
}

#[test]
fn tab_and_bell_take_no_cell() {
    let art = AnsiParser::parse_str("a\tb\x07c");
    assert_eq!(art.canvas.cell(1, 0).ch, 'b');
    assert_eq!(art.canvas.cell(2, 0).ch, 'c');
}

#[test]
fn sub_control_is_ignored() {
    let art = AnsiParser::parse_str("a\x1ab");
    assert_eq!(art.canvas.cell(0, 0).ch, 'a');
    assert_eq!(art.canvas.cell(1, 0).ch, 'b');
}

#[test]
fn printing_past_line_width_wraps() {
    let art = AnsiParser::parse_str(&"x".repeat(LINE_WIDTH + 5));
    assert_eq!(art.canvas.size().cols, LINE_WIDTH);
    assert_eq!(art.canvas.cell(LINE_WIDTH - 1, 0).ch, 'x');
    assert_eq!(art.canvas.cell(4, 1).ch, 'x');
    assert_eq!(art.canvas.cell(5, 1).ch, ' ');
}

#[test]
fn trailing_blank_lines_collapse_to_one() {
    let art = AnsiParser::parse_str("a\r\n\r\n\r\n\r\n");
    assert_eq!(art.runs, vec![Run::new(Attr::ansi_default(), "a\n")]);
}

#[test]
fn empty_stream_yields_single_blank_line() {
    let art = AnsiParser::parse(b"");
    assert_eq!(art.runs, vec![Run::new(Attr::ansi_default(), "\n")]);
    assert_eq!(art.canvas.size().rows, 1);
}

// === Cursor movement ===

#[test]
fn cursor_position_is_one_based() {
    let art = AnsiParser::parse_str("\x1b[2;3HX");
    assert_eq!(art.canvas.cell(2, 1).ch, 'X');
}

#[test]
fn cursor_forward_skips_columns() {
    let art = AnsiParser::parse_str("a\x1b[3Cb");
    assert_eq!(art.canvas.cell(4, 0).ch, 'b');
}

#[test]
fn cursor_forward_without_count_moves_one() {
    let art = AnsiParser::parse_str("a\x1b[Cb");
    assert_eq!(art.canvas.cell(2, 0).ch, 'b');
}

#[test]
fn cursor_up_clamps_at_first_row() {
    let art = AnsiParser::parse_str("\r\n\r\n\x1b[5Az");
    assert_eq!(art.canvas.cell(0, 0).ch, 'z');
}

#[test]
fn cursor_position_grows_buffer() {
    let art = AnsiParser::parse_str("\x1b[10;1H");
    assert_eq!(art.canvas.size().rows, 10);
}

#[test]
fn unknown_final_byte_is_ignored() {
    let art = AnsiParser::parse_str("\x1b[2Jab");
    assert_eq!(art.canvas.cell(0, 0).ch, 'a');
}

// === SGR ===

#[test]
fn sgr_sets_bold_blink_and_colors() {
    let art = AnsiParser::parse_str("\x1b[1;5;31;44mX");
    let attr = art.canvas.cell(0, 0).attr;
    assert_eq!(attr.fg, Color::Indexed(9));
    assert_eq!(attr.bg, Color::Indexed(4));
    assert!(attr.flags.bold);
    assert!(attr.flags.blink);
}

#[test]
fn sgr_zero_resets_every_prior_state() {
    let priors = [
        "\x1b[1m",
        "\x1b[5m",
        "\x1b[1;5;33;45m",
        "\x1b[38;5;196m",
        "\x1b[48;5;240m",
        "\x1b[38;2;10;200;30;48;5;17m",
        "\x1b[4;7m",
    ];
    for prior in priors {
        let input = format!("{}\x1b[0mX", prior);
        let art = AnsiParser::parse_str(&input);
        assert_eq!(
            art.canvas.cell(0, 0).attr,
            Attr::ansi_default(),
            "reset failed after {:?}",
            prior
        );
    }
}

#[test]
fn empty_sgr_resets() {
    let art = AnsiParser::parse_str("\x1b[31m\x1b[mX");
    assert_eq!(art.canvas.cell(0, 0).attr, Attr::ansi_default());
}

#[test]
fn missing_parameter_defaults_to_zero() {
    let art = AnsiParser::parse_str("\x1b[1m\x1b[;31mX");
    let attr = art.canvas.cell(0, 0).attr;
    assert_eq!(attr.fg, Color::Indexed(1));
    assert!(!attr.flags.bold);
}

#[test]
fn base_color_clears_extended_color() {
    let art = AnsiParser::parse_str("\x1b[38;5;196m\x1b[32mX");
    assert_eq!(art.canvas.cell(0, 0).attr.fg, Color::Indexed(2));
}

#[test]
fn indexed_foreground_cube_and_gray() {
    let art = AnsiParser::parse_str("\x1b[38;5;196mA\x1b[48;5;232mB");
    assert_eq!(art.canvas.cell(0, 0).attr.fg, Color::Rgb4(0xf, 0, 0));
    assert_eq!(art.canvas.cell(1, 0).attr.bg, Color::Gray(3));
}

#[test]
fn high_intensity_index_implies_bold() {
    let art = AnsiParser::parse_str("\x1b[38;5;12mX");
    let attr = art.canvas.cell(0, 0).attr;
    assert_eq!(attr.fg, Color::Indexed(12));
    assert_eq!(attr.flags, CellFlags::BOLD);
}

#[test]
fn truecolor_is_quantized_to_cube_levels() {
    let art = AnsiParser::parse_str("\x1b[38;2;255;100;0mX");
    assert_eq!(art.canvas.cell(0, 0).attr.fg, Color::Rgb4(0xf, 0x6, 0x0));
}

#[test]
fn overlong_sgr_applies_every_parameter() {
    let art = AnsiParser::parse_str(&format!("\x1b[{}31mx", "1;".repeat(40)));
    let attr = art.canvas.cell(0, 0).attr;
    assert_eq!(attr.fg, Color::Indexed(9));
    assert!(attr.flags.bold);
}

#[test]
fn overlong_sgr_keeps_extended_selectors_whole() {
    let art = AnsiParser::parse_str(&format!("\x1b[{}38;5;196;4mx", "0;".repeat(31)));
    let attr = art.canvas.cell(0, 0).attr;
    assert_eq!(attr.fg, Color::Rgb4(0xf, 0, 0));
    assert!(attr.flags.underline);
}

#[test]
fn unknown_sgr_codes_are_ignored() {
    let art = AnsiParser::parse_str("\x1b[31;99;3mX");
    assert_eq!(art.canvas.cell(0, 0).attr, red());
}

// === Run coalescing ===

#[test]
fn runs_split_on_color_change() {
    let art = AnsiParser::parse_str("\x1b[31mred\x1b[0m plain\r\n");
    assert_eq!(
        art.runs,
        vec![
            Run::new(red(), "red"),
            Run::new(Attr::ansi_default(), " plain\n"),
        ]
    );
}

#[test]
fn colored_background_lines_keep_trailing_spaces() {
    let art = AnsiParser::parse_str("\x1b[44m\n");
    let last = art.runs.last().unwrap();
    assert_eq!(last.attr.bg, Color::Indexed(4));
    assert_eq!(last.text.len(), LINE_WIDTH + 1);
}

#[test]
fn flag_only_changes_do_not_split_runs() {
    let art = AnsiParser::parse_str("a\x1b[5mb");
    assert_eq!(art.runs.len(), 1);
    assert_eq!(art.runs[0].text, "ab\n");
}

#[test]
fn performer_steps_can_be_driven_directly() {
    let mut performer = GridPerformer::new();
    let mut parser = vte::Parser::new();
    parser.advance(&mut performer, b"\x1b[3;5H");
    assert_eq!(performer.cursor().x, 4);
    assert_eq!(performer.cursor().y, 2);
    assert_eq!(performer.lines().len(), 3);
}

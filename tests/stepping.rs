//! Stepping scenarios - word and line steps, clamping, symmetry

mod common;

use common::Harness;
use spanstep::StepMsg;

// ========================================================================
// Word stepping
// ========================================================================

#[test]
fn test_next_word_reveals_growing_prefix() {
    let mut h = Harness::with_selection("Hello World, this is a test");

    h.step(StepMsg::NextWord).unwrap();
    assert_eq!(h.content(), "Hello");
    h.step(StepMsg::NextWord).unwrap();
    assert_eq!(h.content(), "Hello World");
    h.step(StepMsg::NextWord).unwrap();
    assert_eq!(h.content(), "Hello World, ");
    h.step(StepMsg::NextWord).unwrap();
    assert_eq!(h.content(), "Hello World, this");
}

#[test]
fn test_next_word_is_idempotent_at_span_end() {
    let mut h = Harness::with_selection("one two");
    for _ in 0..6 {
        h.step(StepMsg::NextWord).unwrap();
    }
    assert_eq!(h.content(), "one two");
    h.step(StepMsg::NextWord).unwrap();
    assert_eq!(h.content(), "one two");
}

#[test]
fn test_prev_word_starts_by_hiding_last_token() {
    let mut h = Harness::with_selection("alpha beta gamma");
    h.step(StepMsg::PrevWord).unwrap();
    assert_eq!(h.content(), "alpha beta");
    h.step(StepMsg::PrevWord).unwrap();
    assert_eq!(h.content(), "alpha");
    h.step(StepMsg::PrevWord).unwrap();
    assert_eq!(h.content(), "");
    // Clamped: still empty.
    h.step(StepMsg::PrevWord).unwrap();
    assert_eq!(h.content(), "");
}

#[test]
fn test_forward_prefix_is_strictly_monotonic_until_full() {
    let original = "one two three four five";
    let mut h = Harness::with_selection(original);
    let mut previous = String::new();
    loop {
        h.step(StepMsg::NextWord).unwrap();
        let visible = h.content();
        assert!(original.starts_with(&visible));
        if visible == original {
            break;
        }
        assert!(
            visible.len() > previous.len(),
            "prefix did not grow: {:?} -> {:?}",
            previous,
            visible
        );
        previous = visible;
    }
}

#[test]
fn test_backward_then_forward_reproduces_span() {
    let original = "now doing\na multiline test\nwith\nvarying number of words";
    let mut h = Harness::with_selection(original);

    // Retract everything from the fully visible state.
    for _ in 0..32 {
        h.step(StepMsg::PrevWord).unwrap();
    }
    assert_eq!(h.content(), "");

    // Reveal everything again.
    for _ in 0..32 {
        h.step(StepMsg::NextWord).unwrap();
    }
    assert_eq!(h.content(), original);
}

// ========================================================================
// Line stepping
// ========================================================================

#[test]
fn test_next_line_reveals_whole_lines() {
    let mut h = Harness::with_selection("now doing\na multiline test\nwith\nvarying number of words");

    h.step(StepMsg::NextLine).unwrap();
    assert_eq!(h.content(), "now doing\n");
    h.step(StepMsg::NextLine).unwrap();
    assert_eq!(h.content(), "now doing\na multiline test\n");
    h.step(StepMsg::NextLine).unwrap();
    assert_eq!(h.content(), "now doing\na multiline test\nwith\n");
    h.step(StepMsg::NextLine).unwrap();
    assert_eq!(
        h.content(),
        "now doing\na multiline test\nwith\nvarying number of words"
    );
}

#[test]
fn test_next_line_without_terminator_reveals_whole_span() {
    let mut h = Harness::with_selection("Hello World, this is a test");
    h.step(StepMsg::NextLine).unwrap();
    assert_eq!(h.content(), "Hello World, this is a test");
}

#[test]
fn test_prev_line_on_single_line_span_hides_everything() {
    let mut h = Harness::with_selection("Hello World, this is a test");
    h.step(StepMsg::PrevLine).unwrap();
    assert_eq!(h.content(), "");
}

#[test]
fn test_prev_line_retreats_line_by_line() {
    let mut h = Harness::with_selection("one\ntwo\nthree\nfour");

    h.step(StepMsg::PrevLine).unwrap();
    assert_eq!(h.content(), "one\ntwo\nthree\n");
    h.step(StepMsg::PrevLine).unwrap();
    assert_eq!(h.content(), "one\ntwo\n");
    h.step(StepMsg::PrevLine).unwrap();
    assert_eq!(h.content(), "one\n");
    h.step(StepMsg::PrevLine).unwrap();
    assert_eq!(h.content(), "");
    h.step(StepMsg::PrevLine).unwrap();
    assert_eq!(h.content(), "");
}

#[test]
fn test_word_and_line_steps_mix() {
    let mut h = Harness::with_selection("ab cd\nef gh");

    h.step(StepMsg::NextWord).unwrap();
    assert_eq!(h.content(), "ab");
    h.step(StepMsg::NextLine).unwrap();
    assert_eq!(h.content(), "ab cd\n");
    h.step(StepMsg::NextWord).unwrap();
    assert_eq!(h.content(), "ab cd\nef");
    h.step(StepMsg::PrevLine).unwrap();
    assert_eq!(h.content(), "ab cd\n");
    h.step(StepMsg::PrevWord).unwrap();
    assert_eq!(h.content(), "ab");
}

// ========================================================================
// CRLF and whitespace handling
// ========================================================================

#[test]
fn test_crlf_lines_step_as_units() {
    let mut h = Harness::with_selection("one\r\ntwo\r\nthree");

    h.step(StepMsg::NextLine).unwrap();
    assert_eq!(h.content(), "one\r\n");
    h.step(StepMsg::NextLine).unwrap();
    assert_eq!(h.content(), "one\r\ntwo\r\n");
    h.step(StepMsg::NextLine).unwrap();
    assert_eq!(h.content(), "one\r\ntwo\r\nthree");
}

#[test]
fn test_indented_words_carry_their_whitespace() {
    let mut h = Harness::with_selection("    first\n    second");

    h.step(StepMsg::NextWord).unwrap();
    assert_eq!(h.content(), "    first\n");
    h.step(StepMsg::NextWord).unwrap();
    assert_eq!(h.content(), "    first\n    second");
}

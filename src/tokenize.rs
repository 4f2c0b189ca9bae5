//! Span tokenization for stepping.
//!
//! A span is split into tokens a user would recognize as one "step": a word
//! (with any leading whitespace attached), or a line remnant terminated by a
//! newline. Concatenating the tokens in order always reproduces the input
//! exactly, so the stepper can move text between the buffer and the hidden
//! remainder without loss.

use unicode_segmentation::UnicodeSegmentation;

/// One steppable unit of a span.
///
/// Classification is implicit in the trailing character: a token ending in
/// `'\n'` is a *line token* (its content plus the terminator, possibly with
/// merged leading whitespace), anything else is a *word token*. Tokens are
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// The token's text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for tokens terminated by a newline.
    ///
    /// Carriage returns don't count; in a CRLF ending the `'\r'` stays
    /// attached to the content before the `'\n'`.
    pub fn is_line(&self) -> bool {
        self.0.ends_with('\n')
    }

    /// Length in chars, matching the char-offset ranges used buffer-wide.
    pub fn len_chars(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Split `text` into steppable tokens.
///
/// Pure and total: empty input yields an empty sequence, and the tokens
/// partition the input exactly.
///
/// The pipeline:
/// 1. rough split at Unicode word boundaries, re-merging adjacent pieces
///    that contain no word characters (UAX#29 separates `","` from a
///    following space; stepping wants `", "` as one unit);
/// 2. re-split every piece immediately after each `'\n'`, so a newline
///    always terminates its piece;
/// 3. left-merge: a newline-terminated piece joins the piece before it,
///    unless that one already ends in a newline (keeps a line's terminator
///    attached to its content instead of dangling alone);
/// 4. forward-merge: a pure-whitespace piece with no newline joins the
///    piece after it (indentation sticks to the word or line it precedes).
///
/// A trailing pure-whitespace piece has nothing to merge into and is kept
/// verbatim as the final token.
pub fn tokenize(text: &str) -> Vec<Token> {
    // Rough split: maximal word runs vs. runs of everything else.
    let mut rough: Vec<String> = Vec::new();
    for piece in text.split_word_bounds() {
        let wordless = !piece.chars().any(|c| c.is_alphanumeric() || c == '_');
        match rough.last_mut() {
            Some(prev)
                if wordless && !prev.chars().any(|c| c.is_alphanumeric() || c == '_') =>
            {
                prev.push_str(piece);
            }
            _ => rough.push(piece.to_string()),
        }
    }

    // Newline split: every '\n' ends the piece it is in.
    let mut pieces: Vec<String> = Vec::new();
    for piece in rough {
        let mut rest = piece.as_str();
        while let Some(i) = rest.find('\n') {
            pieces.push(rest[..=i].to_string());
            rest = &rest[i + 1..];
        }
        if !rest.is_empty() {
            pieces.push(rest.to_string());
        }
    }

    // Left-merge newline-terminated pieces into their line's content.
    let mut merged: Vec<String> = Vec::new();
    for piece in pieces {
        match merged.last_mut() {
            Some(prev) if piece.ends_with('\n') && !prev.ends_with('\n') => {
                prev.push_str(&piece);
            }
            _ => merged.push(piece),
        }
    }

    // Forward-merge loose whitespace into the token that follows it.
    // Walk back-to-front so the "next" piece is already in place.
    let mut tokens: Vec<String> = Vec::new();
    for piece in merged.into_iter().rev() {
        let loose_ws = !piece.ends_with('\n') && piece.chars().all(char::is_whitespace);
        match tokens.last_mut() {
            Some(next) if loose_ws && !piece.is_empty() => {
                next.insert_str(0, &piece);
            }
            _ => {
                if !piece.is_empty() {
                    tokens.push(piece);
                }
            }
        }
    }
    tokens.reverse();

    tokens.into_iter().map(Token).collect()
}

/// Concatenate a run of tokens back into text.
pub fn concat(tokens: &[Token]) -> String {
    tokens.iter().map(Token::as_str).collect()
}

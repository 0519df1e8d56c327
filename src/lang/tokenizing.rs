#![allow(clippy::while_let_loop)]

use crate::lang::source_buffer::{SourceBuffer, SourceLocation};
use crate::runtime::error::{self, ErrorKind, ScriptError};
use std::fmt::{self, Display, Formatter};

/// A single lexical token, tagged with where it was found in the original source text.
///
/// Unlike a classic Forth lexer that only separates numbers/strings/words and leaves the rest to
/// a later compile pass, this tokenizer performs the full classification spec'd for the
/// interpreter up front: brackets, booleans, numbers, deferred terms and plain terms are all
/// distinguished here, because there is no later compile pass to defer it to (see spec.md
/// section 9, "Identifier collisions with literals").
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// `[` — opens a new quote literal context.
    LeftBracket(SourceLocation),

    /// `]` — closes the innermost quote literal context.
    RightBracket(SourceLocation),

    /// `true` or `false`.
    Bool(SourceLocation, bool),

    /// A signed 64-bit integer literal.
    Int(SourceLocation, i64),

    /// A floating point literal (contains a `.` or an exponent).
    Float(SourceLocation, f64),

    /// A double-quoted string literal, already escape-processed.
    String(SourceLocation, String),

    /// A plain identifier, naming a command to look up and run immediately.
    Word(SourceLocation, String),

    /// `\identifier` — names a command without running it.
    DeferredWord(SourceLocation, String),

    /// End of input.
    End,
}

impl Token {
    /// Where in the source text this token was found. `End` has no location of its own.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Token::LeftBracket(loc)
            | Token::RightBracket(loc)
            | Token::Bool(loc, _)
            | Token::Int(loc, _)
            | Token::Float(loc, _)
            | Token::String(loc, _)
            | Token::Word(loc, _)
            | Token::DeferredWord(loc, _) => Some(loc),
            Token::End => None,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Token::LeftBracket(_) => write!(f, "["),
            Token::RightBracket(_) => write!(f, "]"),
            Token::Bool(_, value) => write!(f, "{}", value),
            Token::Int(_, value) => write!(f, "{}", value),
            Token::Float(_, value) => write!(f, "{}", value),
            Token::String(_, value) => write!(f, "{:?}", value),
            Token::Word(_, name) => write!(f, "{}", name),
            Token::DeferredWord(_, name) => write!(f, "\\{}", name),
            Token::End => write!(f, "<end>"),
        }
    }
}

/// The full list of tokens found in a piece of source text, in order.
pub type TokenList = Vec<Token>;

fn is_whitespace(next: char) -> bool {
    next == ' ' || next == '\t' || next == '\r' || next == '\n'
}

fn skip_whitespace(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if !is_whitespace(next) {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Skip a `#` comment through to (but not including) the line terminator. Also the mechanism by
/// which a shebang line (`#!/usr/bin/env tally`) is ignored, with no special casing in the driver.
fn skip_comment(buffer: &mut SourceBuffer) {
    while let Some(next) = buffer.peek_next() {
        if next == '\n' {
            break;
        }

        let _ = buffer.next_char();
    }
}

/// Process a backslash escape sequence inside a string literal. Assumes the backslash itself has
/// already been consumed.
fn process_escape(location: &SourceLocation, buffer: &mut SourceBuffer) -> error::Result<char> {
    match buffer.next_char() {
        Some('n') => Ok('\n'),
        Some('t') => Ok('\t'),
        Some('r') => Ok('\r'),
        Some('0') => Ok('\0'),
        Some('\\') => Ok('\\'),
        Some('"') => Ok('"'),
        Some(other) => Ok(other),
        None => Err(ScriptError::new(
            ErrorKind::ParseError,
            "Unexpected end of file in string literal.".to_string(),
            Some(location.clone()),
        )),
    }
}

fn process_string(buffer: &mut SourceBuffer) -> error::Result<(SourceLocation, String)> {
    let opening = buffer.next_char();
    debug_assert_eq!(opening, Some('"'));

    let location = buffer.location().clone();
    let mut text = String::new();

    loop {
        match buffer.peek_next() {
            Some('"') => {
                let _ = buffer.next_char();
                return Ok((location, text));
            }

            Some('\n') | None => {
                return Err(ScriptError::new(
                    ErrorKind::ParseError,
                    "Unterminated string literal.".to_string(),
                    Some(location),
                ));
            }

            Some('\\') => {
                let _ = buffer.next_char();
                text.push(process_escape(&location, buffer)?);
            }

            Some(other) => {
                let _ = buffer.next_char();
                text.push(other);
            }
        }
    }
}

/// Pull text out of the buffer up to the next whitespace or bracket character. Brackets always
/// terminate a bare token even without surrounding whitespace, so `[1 2]` tokenizes as `[`, `1`,
/// `2`, `]` rather than swallowing the bracket into the number.
fn process_bare_token(buffer: &mut SourceBuffer) -> (SourceLocation, String) {
    let location = buffer.location().clone();
    let mut text = String::new();

    loop {
        match buffer.peek_next() {
            Some(next) if is_whitespace(next) => break,
            Some('[') | Some(']') if !text.is_empty() => break,
            Some(next) => {
                text.push(next);
                let _ = buffer.next_char();

                if next == '[' || next == ']' {
                    break;
                }
            }
            None => break,
        }
    }

    (location, text)
}

fn looks_numeric(text: &str) -> bool {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);

    !body.is_empty() && body.chars().next().unwrap().is_ascii_digit()
}

fn is_float_literal(text: &str) -> bool {
    text.contains('.') || text.contains('e') || text.contains('E')
}

/// Classify a bare (unquoted) token: bool, then int, then float, then a plain or deferred term,
/// in that order (spec.md section 9's prescribed classification order).
fn classify_bare(location: SourceLocation, text: String) -> error::Result<Token> {
    if text == "true" {
        return Ok(Token::Bool(location, true));
    }

    if text == "false" {
        return Ok(Token::Bool(location, false));
    }

    if looks_numeric(&text) {
        if is_float_literal(&text) {
            return match text.parse::<f64>() {
                Ok(value) => Ok(Token::Float(location, value)),
                Err(_) => Ok(Token::Word(location, text)),
            };
        }

        return match text.parse::<i64>() {
            Ok(value) => Ok(Token::Int(location, value)),
            Err(_) => {
                // Doesn't fit in an i64 after all; fall back to float, then to a plain word.
                match text.parse::<f64>() {
                    Ok(value) => Ok(Token::Float(location, value)),
                    Err(_) => Ok(Token::Word(location, text)),
                }
            }
        };
    }

    if let Some(name) = text.strip_prefix('\\') {
        if name.is_empty() {
            return Err(ScriptError::new(
                ErrorKind::ParseError,
                "Expected an identifier after '\\'.".to_string(),
                Some(location),
            ));
        }

        return Ok(Token::DeferredWord(location, name.to_string()));
    }

    Ok(Token::Word(location, text))
}

/// Tokenize a complete piece of source text. `path` is only used to tag error locations and
/// doesn't need to refer to a real file (the REPL uses `<repl>`).
pub fn tokenize(path: &str, source: &str) -> error::Result<TokenList> {
    let mut buffer = SourceBuffer::new(path, source);
    let mut tokens = TokenList::new();

    loop {
        match buffer.peek_next() {
            None => break,

            Some(next) if is_whitespace(next) => {
                skip_whitespace(&mut buffer);
            }

            Some('#') => {
                skip_comment(&mut buffer);
            }

            Some('"') => {
                let (location, text) = process_string(&mut buffer)?;
                tokens.push(Token::String(location, text));
            }

            Some('[') => {
                let location = buffer.location().clone();
                let _ = buffer.next_char();
                tokens.push(Token::LeftBracket(location));
            }

            Some(']') => {
                let location = buffer.location().clone();
                let _ = buffer.next_char();
                tokens.push(Token::RightBracket(location));
            }

            Some(_) => {
                let (location, text) = process_bare_token(&mut buffer);

                match text.as_str() {
                    "[" => tokens.push(Token::LeftBracket(location)),
                    "]" => tokens.push(Token::RightBracket(location)),
                    _ => tokens.push(classify_bare(location, text)?),
                }
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(tokens: &[Token]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn skips_shebang_and_comments() {
        let tokens = tokenize("<test>", "#!/usr/bin/env tally\n# a comment\n1 2 +").unwrap();
        assert_eq!(words(&tokens), vec!["1", "2", "+"]);
    }

    #[test]
    fn classifies_literals_in_order() {
        let tokens = tokenize("<test>", "true false 42 -7 3.5 1e3 \"hi\" \\dup dup").unwrap();
        assert!(matches!(tokens[0], Token::Bool(_, true)));
        assert!(matches!(tokens[1], Token::Bool(_, false)));
        assert!(matches!(tokens[2], Token::Int(_, 42)));
        assert!(matches!(tokens[3], Token::Int(_, -7)));
        assert!(matches!(tokens[4], Token::Float(_, v) if v == 3.5));
        assert!(matches!(tokens[5], Token::Float(_, v) if v == 1000.0));
        assert!(matches!(&tokens[6], Token::String(_, s) if s == "hi"));
        assert!(matches!(&tokens[7], Token::DeferredWord(_, s) if s == "dup"));
        assert!(matches!(&tokens[8], Token::Word(_, s) if s == "dup"));
    }

    #[test]
    fn string_escapes() {
        let tokens = tokenize("<test>", "\"a\\nb\\t\\\"c\\\\\"").unwrap();
        assert!(matches!(&tokens[0], Token::String(_, s) if s == "a\nb\t\"c\\"));
    }

    #[test]
    fn unterminated_string_is_parse_error() {
        let result = tokenize("<test>", "\"abc");
        assert_eq!(result.unwrap_err().kind(), ErrorKind::ParseError);
    }

    #[test]
    fn brackets_tokenize_without_surrounding_whitespace() {
        let tokens = tokenize("<test>", "[1 2 3]").unwrap();
        assert!(matches!(tokens[0], Token::LeftBracket(_)));
        assert!(matches!(tokens[1], Token::Int(_, 1)));
        assert!(matches!(tokens[4], Token::RightBracket(_)));
    }
}

//! GCURVES format tokenizer.
//!
//! Splits the text into whitespace-delimited tokens; braces are
//! self-delimiting. No strings, no escaping, no comments.
//!
//! Tokens are produced lazily so the parser can abandon a damaged curve
//! block at the raw-text level and keep lexing after its closing brace.

use gcurves_core::{CurveError, Result};

/// A single lexical token from a GCURVES file.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare word, e.g. `GCURVES`, `curve`, `type`, `polyline`
    Ident(String),
    /// Numeric literal, e.g. `42`, `-0.5`, `1.5e-3`
    Number(f64),
    OpenBrace,
    CloseBrace,
}

/// Incremental tokenizer over a GCURVES text stream.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Produce the next token, or `None` at end of input. An unlexable byte
    /// is an error and leaves the cursor on that byte.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        let bytes = self.input.as_bytes();
        let len = bytes.len();

        while self.pos < len && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos >= len {
            return Ok(None);
        }

        match bytes[self.pos] {
            b'{' => {
                self.pos += 1;
                Ok(Some(Token::OpenBrace))
            }
            b'}' => {
                self.pos += 1;
                Ok(Some(Token::CloseBrace))
            }

            // Number: optional sign, digits, optional fraction and exponent
            c if c.is_ascii_digit() || c == b'-' || c == b'+' || c == b'.' => {
                let start = self.pos;
                if bytes[self.pos] == b'-' || bytes[self.pos] == b'+' {
                    self.pos += 1;
                }
                while self.pos < len && bytes[self.pos].is_ascii_digit() {
                    self.pos += 1;
                }
                if self.pos < len && bytes[self.pos] == b'.' {
                    self.pos += 1;
                    while self.pos < len && bytes[self.pos].is_ascii_digit() {
                        self.pos += 1;
                    }
                }
                if self.pos < len && (bytes[self.pos] == b'e' || bytes[self.pos] == b'E') {
                    self.pos += 1;
                    if self.pos < len && (bytes[self.pos] == b'+' || bytes[self.pos] == b'-') {
                        self.pos += 1;
                    }
                    while self.pos < len && bytes[self.pos].is_ascii_digit() {
                        self.pos += 1;
                    }
                }
                let text = &self.input[start..self.pos];
                let v: f64 = text
                    .parse()
                    .map_err(|e| CurveError::Parse(format!("invalid number '{text}': {e}")))?;
                Ok(Some(Token::Number(v)))
            }

            // Ident: letters, digits, underscore
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let start = self.pos;
                while self.pos < len
                    && (bytes[self.pos].is_ascii_alphanumeric() || bytes[self.pos] == b'_')
                {
                    self.pos += 1;
                }
                Ok(Some(Token::Ident(self.input[start..self.pos].to_string())))
            }

            other => Err(CurveError::Parse(format!(
                "unexpected character '{}' at byte {}",
                other as char, self.pos
            ))),
        }
    }

    /// Abandon the current token stream and move the raw cursor just past
    /// the next `}`, dropping the rest of a damaged block regardless of what
    /// it contains. Returns `false` if no closing brace remains.
    pub fn skip_past_close_brace(&mut self) -> bool {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            self.pos += 1;
            if b == b'}' {
                return true;
            }
        }
        false
    }
}

/// Tokenize a complete GCURVES text stream into a vector of tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    while let Some(tok) = lexer.next_token()? {
        tokens.push(tok);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idents() {
        let tokens = tokenize("GCURVES curve type polyline").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("GCURVES".into()),
                Token::Ident("curve".into()),
                Token::Ident("type".into()),
                Token::Ident("polyline".into()),
            ]
        );
    }

    #[test]
    fn test_braces_self_delimit() {
        let tokens = tokenize("curve {}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("curve".into()),
                Token::OpenBrace,
                Token::CloseBrace,
            ]
        );
    }

    #[test]
    fn test_integer() {
        assert_eq!(tokenize("42").unwrap(), vec![Token::Number(42.0)]);
    }

    #[test]
    fn test_negative_real() {
        assert_eq!(tokenize("-0.5").unwrap(), vec![Token::Number(-0.5)]);
    }

    #[test]
    fn test_real_exponent() {
        assert_eq!(tokenize("1.5e-3").unwrap(), vec![Token::Number(1.5e-3)]);
    }

    #[test]
    fn test_bare_fraction() {
        assert_eq!(tokenize(".25").unwrap(), vec![Token::Number(0.25)]);
    }

    #[test]
    fn test_cp_line() {
        let tokens = tokenize("    cp 0 1.5 0 1\n").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("cp".into()),
                Token::Number(0.0),
                Token::Number(1.5),
                Token::Number(0.0),
                Token::Number(1.0),
            ]
        );
    }

    #[test]
    fn test_bad_number_is_error() {
        assert!(tokenize("-").is_err());
    }

    #[test]
    fn test_unexpected_character_is_error() {
        assert!(tokenize("cp @ 1 2 3").is_err());
    }

    #[test]
    fn test_lexing_resumes_after_skipped_block() {
        let mut lexer = Lexer::new("cp @ 1 }  curve");
        assert_eq!(lexer.next_token().unwrap(), Some(Token::Ident("cp".into())));
        assert!(lexer.next_token().is_err());
        assert!(lexer.skip_past_close_brace());
        assert_eq!(
            lexer.next_token().unwrap(),
            Some(Token::Ident("curve".into()))
        );
        assert_eq!(lexer.next_token().unwrap(), None);
    }

    #[test]
    fn test_skip_without_close_brace_reports_failure() {
        let mut lexer = Lexer::new("cp @ 1 2");
        assert!(lexer.next_token().is_ok());
        assert!(lexer.next_token().is_err());
        assert!(!lexer.skip_past_close_brace());
    }
}

//! GCURVES format parser.
//!
//! Pulls [`Token`]s lazily from the lexer and produces curves. Recovery is
//! block-granular: a malformed `curve { ... }` block — including one holding
//! unlexable bytes — is dropped through its closing brace, logged, and the
//! rest of the file keeps parsing. A block whose opening brace is missing
//! resynchronizes at the next `curve` ident so it cannot swallow a valid
//! neighbor. Anything unexpected at the top level (trailing garbage, an
//! unterminated block) fails the whole parse so a damaged file is never
//! returned as if it were clean.

use gcurves_core::{CurveError, Result};
use gcurves_geometry::{ControlPoint, Curve, CurveKind};
use gcurves_math::Point3;

use crate::lexer::{Lexer, Token};

/// Parse a GCURVES text stream into a set of curves.
pub fn parse_curves(input: &str) -> Result<Vec<Curve>> {
    Parser::new(input).parse_file()
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    peeked: Option<Token>,
    /// Brace depth of the block currently being parsed.
    depth: usize,
    /// Whether the current block's opening brace was ever consumed.
    entered_block: bool,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
            peeked: None,
            depth: 0,
            entered_block: false,
        }
    }

    fn peek(&mut self) -> Result<Option<&Token>> {
        if self.peeked.is_none() {
            self.peeked = self.lexer.next_token()?;
        }
        Ok(self.peeked.as_ref())
    }

    fn advance(&mut self) -> Result<Token> {
        let tok = match self.peeked.take() {
            Some(tok) => tok,
            None => self
                .lexer
                .next_token()?
                .ok_or_else(|| CurveError::Parse("unexpected end of input".into()))?,
        };
        match tok {
            Token::OpenBrace => {
                self.depth += 1;
                self.entered_block = true;
            }
            Token::CloseBrace => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
        Ok(tok)
    }

    fn expect_ident(&mut self, kw: &str) -> Result<()> {
        match self.advance()? {
            Token::Ident(k) if k == kw => Ok(()),
            other => Err(CurveError::Parse(format!(
                "expected '{kw}', got {other:?}"
            ))),
        }
    }

    fn expect_open_brace(&mut self) -> Result<()> {
        match self.advance()? {
            Token::OpenBrace => Ok(()),
            other => Err(CurveError::Parse(format!("expected '{{', got {other:?}"))),
        }
    }

    fn expect_number(&mut self) -> Result<f64> {
        match self.advance()? {
            Token::Number(v) => Ok(v),
            other => Err(CurveError::Parse(format!(
                "expected number, got {other:?}"
            ))),
        }
    }

    /// Parse a complete file: the `GCURVES` magic followed by curve blocks.
    fn parse_file(&mut self) -> Result<Vec<Curve>> {
        self.expect_ident("GCURVES")
            .map_err(|_| CurveError::Parse("missing GCURVES magic".into()))?;

        let mut curves = Vec::new();
        loop {
            match self.peek()? {
                None => break,
                Some(Token::Ident(k)) if k == "curve" => {}
                Some(other) => {
                    return Err(CurveError::Parse(format!(
                        "unexpected {other:?} at top level"
                    )));
                }
            }
            self.depth = 0;
            self.entered_block = false;
            match self.parse_curve() {
                Ok(curve) => curves.push(curve),
                Err(err) => {
                    log::warn!("discarding malformed curve block: {err}");
                    self.recover_block()?;
                }
            }
        }
        Ok(curves)
    }

    /// Parse one `curve { ... }` block.
    fn parse_curve(&mut self) -> Result<Curve> {
        self.expect_ident("curve")?;
        self.expect_open_brace()?;

        let mut kind = CurveKind::default();
        let mut declared: Option<usize> = None;
        let mut points = Vec::new();

        loop {
            match self.advance()? {
                Token::CloseBrace => break,
                Token::Ident(field) => match field.as_str() {
                    "type" => {
                        let name = match self.advance()? {
                            Token::Ident(name) => name,
                            other => {
                                return Err(CurveError::Parse(format!(
                                    "expected curve type, got {other:?}"
                                )));
                            }
                        };
                        kind = CurveKind::from_name(&name).ok_or_else(|| {
                            CurveError::Parse(format!("unknown curve type '{name}'"))
                        })?;
                    }
                    "cpcount" => {
                        declared = Some(self.expect_number()? as usize);
                    }
                    "cp" => {
                        let x = self.expect_number()?;
                        let y = self.expect_number()?;
                        let z = self.expect_number()?;
                        let w = self.expect_number()?;
                        points.push(ControlPoint::new(Point3::new(x, y, z), w));
                    }
                    other => {
                        return Err(CurveError::Parse(format!(
                            "unknown field '{other}' in curve block"
                        )));
                    }
                },
                other => {
                    return Err(CurveError::Parse(format!(
                        "unexpected {other:?} in curve block"
                    )));
                }
            }
        }

        // cpcount is declared but not authoritative.
        if let Some(n) = declared {
            if n != points.len() {
                log::warn!(
                    "cpcount {n} does not match {} parsed control points",
                    points.len()
                );
            }
        }

        Ok(Curve::from_points(kind, points))
    }

    /// Resynchronize after a failed curve block so later blocks still parse.
    fn recover_block(&mut self) -> Result<()> {
        if self.depth > 0 {
            // Still inside the block, possibly stopped on an unlexable byte:
            // drop the raw text through the closing brace. An unclosed block
            // is a file-level error.
            self.peeked = None;
            if !self.lexer.skip_past_close_brace() {
                return Err(CurveError::Parse("unterminated curve block".into()));
            }
            self.depth = 0;
        } else if !self.entered_block {
            // The block never opened; skip tokens up to the next `curve`
            // ident so a missing brace cannot swallow the following block.
            loop {
                match self.peek()? {
                    None => break,
                    Some(Token::Ident(k)) if k == "curve" => break,
                    Some(_) => {}
                }
                self.advance()?;
            }
        }
        // Otherwise the failure already consumed the closing brace and the
        // stream is positioned at the next block.
        Ok(())
    }
}

//! Lexer for the Subjekt expression sub-language, using logos with string
//! interning.
//!
//! The raw logos tokens are cooked into the IR [`TokenList`]: identifiers
//! and string literals are interned, numeric literal text is normalized
//! (whitespace and `_` separators stripped) and parsed, and string escapes
//! are processed.

mod lex_error;
mod parse_helpers;

pub use lex_error::LexError;

use logos::Logos;
use subjekt_ir::{SharedInterner, Span, Token, TokenKind, TokenList};

use crate::parse_helpers::{cook_string, parse_float_literal, parse_int_literal};

/// Raw token from logos (before interning and literal parsing).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace between tokens
enum RawToken {
    // Cast type keywords (reserved words, win over Ident on exact match)
    #[token("int")]
    KwInt,
    #[token("float")]
    KwFloat,
    #[token("string")]
    KwString,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9][0-9_ ]*\.[ _]*[0-9][0-9_ ]*")]
    Float,
    #[regex(r"[0-9][0-9_]*")]
    Int,

    #[regex(r#""(\\.|[^"\\])*""#)]
    DoubleQuoted,
    #[regex(r"'(\\.|[^'\\])*'")]
    SingleQuoted,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("..")]
    DotDot,
    #[token(".")]
    Dot,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
}

/// Tokenize one expression source into a terminated [`TokenList`].
///
/// Identifiers and cooked string literals are interned into `interner` so
/// the parser can move `Name`s straight into IR nodes.
pub fn lex(source: &str, interner: &SharedInterner) -> Result<TokenList, LexError> {
    let mut tokens = TokenList::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let text = lexer.slice();
        let kind = match raw {
            Ok(RawToken::KwInt) => TokenKind::KwInt,
            Ok(RawToken::KwFloat) => TokenKind::KwFloat,
            Ok(RawToken::KwString) => TokenKind::KwString,
            Ok(RawToken::Ident) => TokenKind::Ident(interner.intern(text)),
            Ok(RawToken::Int) => TokenKind::Int(parse_int_literal(text, span)?),
            Ok(RawToken::Float) => TokenKind::Float(parse_float_literal(text, span)?.to_bits()),
            Ok(RawToken::DoubleQuoted | RawToken::SingleQuoted) => {
                TokenKind::Str(interner.intern(&cook_string(text)))
            }
            Ok(RawToken::Plus) => TokenKind::Plus,
            Ok(RawToken::Minus) => TokenKind::Minus,
            Ok(RawToken::Star) => TokenKind::Star,
            Ok(RawToken::Slash) => TokenKind::Slash,
            Ok(RawToken::Percent) => TokenKind::Percent,
            Ok(RawToken::DotDot) => TokenKind::DotDot,
            Ok(RawToken::Dot) => TokenKind::Dot,
            Ok(RawToken::LParen) => TokenKind::LParen,
            Ok(RawToken::RParen) => TokenKind::RParen,
            Ok(RawToken::LBracket) => TokenKind::LBracket,
            Ok(RawToken::RBracket) => TokenKind::RBracket,
            Ok(RawToken::Colon) => TokenKind::Colon,
            Ok(RawToken::Comma) => TokenKind::Comma,
            Err(()) => {
                return Err(LexError::new(
                    format!("unexpected character `{text}`"),
                    span,
                ));
            }
        };
        tokens.push(Token::new(kind, span));
    }

    let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
    tokens.push(Token::new(TokenKind::Eof, Span::new(end, end)));
    Ok(tokens)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let interner = SharedInterner::new();
        let list = lex(source, &interner).unwrap();
        (0..list.len()).map(|i| list.get(i).kind).collect()
    }

    #[test]
    fn lexes_operators_and_punctuation() {
        let got = kinds("+ - * / % .. . ( ) [ ] : ,");
        assert_eq!(
            got,
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::DotDot,
                TokenKind::Dot,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Colon,
                TokenKind::Comma,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_identifiers_and_keywords() {
        let interner = SharedInterner::new();
        let list = lex("(int) intx _a9", &interner).unwrap();
        assert_eq!(list.get(0).kind, TokenKind::LParen);
        assert_eq!(list.get(1).kind, TokenKind::KwInt);
        assert_eq!(list.get(2).kind, TokenKind::RParen);
        let TokenKind::Ident(name) = list.get(3).kind else {
            panic!("expected identifier");
        };
        assert_eq!(interner.resolve(name), "intx");
        let TokenKind::Ident(name) = list.get(4).kind else {
            panic!("expected identifier");
        };
        assert_eq!(interner.resolve(name), "_a9");
    }

    #[test]
    fn lexes_numeric_literals() {
        assert_eq!(
            kinds("42 1_000"),
            vec![TokenKind::Int(42), TokenKind::Int(1000), TokenKind::Eof]
        );
        assert_eq!(
            kinds("3.5"),
            vec![TokenKind::Float(3.5f64.to_bits()), TokenKind::Eof]
        );
    }

    #[test]
    fn numeric_literals_tolerate_interior_whitespace() {
        assert_eq!(
            kinds("1 000.2 5"),
            vec![TokenKind::Float(1000.25f64.to_bits()), TokenKind::Eof]
        );
    }

    #[test]
    fn lexes_string_literals_with_escapes() {
        let interner = SharedInterner::new();
        let list = lex(r#""he said \"hi\"" 'it\'s'"#, &interner).unwrap();
        let TokenKind::Str(a) = list.get(0).kind else {
            panic!("expected string");
        };
        let TokenKind::Str(b) = list.get(1).kind else {
            panic!("expected string");
        };
        assert_eq!(interner.resolve(a), r#"he said "hi""#);
        assert_eq!(interner.resolve(b), "it's");
    }

    #[test]
    fn rejects_unknown_characters() {
        let interner = SharedInterner::new();
        let err = lex("a ?", &interner).unwrap_err();
        assert!(err.to_string().contains("unexpected character"));
        assert_eq!(err.span, Span::new(2, 3));
    }

    #[test]
    fn spans_cover_source_bytes() {
        let interner = SharedInterner::new();
        let list = lex("ab + 1", &interner).unwrap();
        assert_eq!(list.get(0).span, Span::new(0, 2));
        assert_eq!(list.get(1).span, Span::new(3, 4));
        assert_eq!(list.get(2).span, Span::new(5, 6));
        assert_eq!(list.get(3).span, Span::new(6, 6));
    }
}

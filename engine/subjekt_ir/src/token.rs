//! Token types for the expression lexer.

use std::fmt;

use crate::{Name, Span};

/// Token kind.
///
/// Identifier and string payloads are interned; float literals are stored as
/// bits for `Eq`/`Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// Identifier: `[A-Za-z_][A-Za-z0-9_]*`
    Ident(Name),
    /// Integer literal.
    Int(i64),
    /// Float literal (bits).
    Float(u64),
    /// String literal, escapes already processed (interned).
    Str(Name),

    // Cast type keywords
    KwInt,
    KwFloat,
    KwString,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    DotDot,
    Dot,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Comma,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Human-readable description for error messages.
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Ident(_) => "identifier",
            Self::Int(_) => "integer literal",
            Self::Float(_) => "float literal",
            Self::Str(_) => "string literal",
            Self::KwInt => "`int`",
            Self::KwFloat => "`float`",
            Self::KwString => "`string`",
            Self::Plus => "`+`",
            Self::Minus => "`-`",
            Self::Star => "`*`",
            Self::Slash => "`/`",
            Self::Percent => "`%`",
            Self::DotDot => "`..`",
            Self::Dot => "`.`",
            Self::LParen => "`(`",
            Self::RParen => "`)`",
            Self::LBracket => "`[`",
            Self::RBracket => "`]`",
            Self::Colon => "`:`",
            Self::Comma => "`,`",
            Self::Eof => "end of expression",
        }
    }
}

/// A token with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Lexer output: tokens in source order, terminated by an `Eof` token.
#[derive(Clone, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a token.
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Token at `index`; positions past the end yield the final `Eof` token
    /// (or a dummy `Eof` for an unterminated list).
    pub fn get(&self, index: usize) -> Token {
        self.tokens.get(index).copied().unwrap_or_else(|| {
            let end = self.tokens.last().map_or(Span::DUMMY, |t| t.span);
            Token::new(TokenKind::Eof, end)
        })
    }

    /// Number of tokens including the terminator.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the list holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

// Size assertions to keep frequently-allocated types compact.
#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Token, TokenKind};
    crate::static_assert_size!(TokenKind, 16);
    crate::static_assert_size!(Token, 24);
}

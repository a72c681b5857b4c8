//! Parser for the Subjekt expression sub-language.
//!
//! Recursive descent with one method per precedence level, allocating nodes
//! into an [`ExprArena`] and merging spans as it climbs back up:
//!
//! ```text
//! expr    := concat
//! concat  := additive ( ".." additive )*
//! additive:= mult ( ("+" | "-") mult )*
//! mult    := unary ( ("*" | "/" | "%") unary )*
//! unary   := ("+" | "-") unary | "(" type ")" unary | postfix
//! postfix := primary subscripts/calls
//! primary := literal | ident | "(" expr ")"
//! ```

mod error;
mod grammar;

pub use error::ParseError;

use subjekt_ir::{ExprArena, ExprId, ExprTree, SharedInterner, Token, TokenKind, TokenList};

/// Parse one expression source into an [`ExprTree`].
///
/// Identifiers and string literals are interned into `interner`; the
/// returned tree keeps a handle to it for name resolution.
pub fn parse(source: &str, interner: &SharedInterner) -> Result<ExprTree, ParseError> {
    let tokens = subjekt_lexer::lex(source, interner).map_err(ParseError::from_lex)?;
    let mut parser = Parser::new(&tokens);
    let root = parser.parse_expr()?;
    parser.expect_eof()?;
    Ok(ExprTree {
        arena: parser.into_arena(),
        root,
        interner: interner.clone(),
    })
}

/// Token cursor plus the arena under construction.
pub(crate) struct Parser<'t> {
    tokens: &'t TokenList,
    pos: usize,
    pub(crate) arena: ExprArena,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t TokenList) -> Self {
        Parser {
            tokens,
            pos: 0,
            arena: ExprArena::new(),
        }
    }

    fn into_arena(self) -> ExprArena {
        self.arena
    }

    /// Current token.
    pub(crate) fn current(&self) -> Token {
        self.tokens.get(self.pos)
    }

    /// Current token kind.
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Kind of the token `n` positions ahead.
    pub(crate) fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens.get(self.pos + n).kind
    }

    /// Check the current token against a payload-less kind.
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current();
        self.pos += 1;
        token
    }

    /// Consume the current token if it matches, error otherwise.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            let found = self.current();
            Err(ParseError::unexpected(kind.describe(), found))
        }
    }

    /// Require that the whole input was consumed.
    fn expect_eof(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::Eof).map(|_| ())
    }

    /// Parse an expression.
    ///
    /// Wrapped in `ensure_sufficient_stack` so deeply nested input grows the
    /// stack instead of overflowing it.
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        subjekt_stack::ensure_sufficient_stack(|| self.parse_concat())
    }
}

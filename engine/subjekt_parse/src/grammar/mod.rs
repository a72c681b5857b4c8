//! Expression grammar.
//!
//! - `mod.rs`: binary operator precedence chain and operator matchers
//! - `primary.rs`: literals, identifiers, calls, casts, subscripts

mod primary;

use subjekt_ir::{BinaryOp, Expr, ExprId, ExprKind, TokenKind, UnaryOp};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    pub(crate) fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    pub(crate) fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.current_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Plus),
            _ => None,
        }
    }

    fn alloc_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let span = self
            .arena
            .get(left)
            .span
            .merge(self.arena.get(right).span);
        self.arena
            .alloc(Expr::new(ExprKind::Binary { op, left, right }, span))
    }

    /// Parse `..` (lowest precedence, left-associative).
    pub(crate) fn parse_concat(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_additive()?;

        while self.at(TokenKind::DotDot) {
            self.advance();
            let right = self.parse_additive()?;
            left = self.alloc_binary(BinaryOp::Concat, left, right);
        }

        Ok(left)
    }

    /// Parse `+` and `-`.
    fn parse_additive(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while let Some(op) = self.match_additive_op() {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = self.alloc_binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse `*`, `/` and `%`.
    fn parse_multiplicative(&mut self) -> Result<ExprId, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.match_multiplicative_op() {
            self.advance();
            let right = self.parse_unary()?;
            left = self.alloc_binary(op, left, right);
        }

        Ok(left)
    }

    /// Parse prefix operators: unary `+`/`-` and casts, both binding tighter
    /// than any binary operator.
    pub(crate) fn parse_unary(&mut self) -> Result<ExprId, ParseError> {
        if let Some(op) = self.match_unary_op() {
            let op_span = self.advance().span;
            let operand = self.parse_unary()?;
            let span = op_span.merge(self.arena.get(operand).span);
            return Ok(self
                .arena
                .alloc(Expr::new(ExprKind::Unary { op, operand }, span)));
        }

        if self.is_cast_start() {
            return self.parse_cast();
        }

        self.parse_postfix()
    }
}

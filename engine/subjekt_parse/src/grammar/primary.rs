//! Primary expressions, calls, casts and subscripts.

use smallvec::SmallVec;
use subjekt_ir::{Expr, ExprId, ExprKind, ExprRange, Name, Span, TokenKind, ValueType};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Whether the cursor sits on `( type )` — a prefix cast rather than a
    /// parenthesized expression.
    pub(crate) fn is_cast_start(&self) -> bool {
        self.at(TokenKind::LParen)
            && matches!(
                self.peek_kind(1),
                TokenKind::KwInt | TokenKind::KwFloat | TokenKind::KwString
            )
            && self.peek_kind(2) == TokenKind::RParen
    }

    /// Parse `(int)x`, `(float)x`, `(string)x`.
    pub(crate) fn parse_cast(&mut self) -> Result<ExprId, ParseError> {
        let open = self.expect(TokenKind::LParen)?;
        let target = match self.current_kind() {
            TokenKind::KwInt => ValueType::Integer,
            TokenKind::KwFloat => ValueType::Float,
            TokenKind::KwString => ValueType::String,
            _ => {
                let found = self.current();
                return Err(ParseError::unexpected("a cast type", found));
            }
        };
        self.advance();
        self.expect(TokenKind::RParen)?;
        let operand = self.parse_unary()?;
        let span = open.span.merge(self.arena.get(operand).span);
        Ok(self
            .arena
            .alloc(Expr::new(ExprKind::Cast { target, operand }, span)))
    }

    /// Parse a primary expression plus any call or subscript suffix.
    pub(crate) fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let token = self.current();
        match token.kind {
            TokenKind::Int(value) => {
                self.advance();
                Ok(self.arena.alloc(Expr::new(ExprKind::Int(value), token.span)))
            }
            TokenKind::Float(bits) => {
                self.advance();
                Ok(self
                    .arena
                    .alloc(Expr::new(ExprKind::Float(bits), token.span)))
            }
            TokenKind::Str(name) => {
                self.advance();
                Ok(self.arena.alloc(Expr::new(ExprKind::Str(name), token.span)))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident(name) => {
                self.advance();
                self.parse_ident_suffix(name, token.span)
            }
            _ => Err(ParseError::unexpected("an expression", token)),
        }
    }

    /// Parse what follows an identifier: a call, a qualified call, a
    /// subscript, or nothing.
    fn parse_ident_suffix(&mut self, name: Name, span: Span) -> Result<ExprId, ParseError> {
        match self.current_kind() {
            TokenKind::LParen => {
                let (args, end) = self.parse_call_args()?;
                Ok(self
                    .arena
                    .alloc(Expr::new(ExprKind::Call { name, args }, span.merge(end))))
            }
            TokenKind::Dot => {
                self.advance();
                let member = self.current();
                let TokenKind::Ident(member_name) = member.kind else {
                    return Err(ParseError::unexpected("identifier after `.`", member));
                };
                self.advance();
                let (args, end) = self.parse_call_args()?;
                Ok(self.arena.alloc(Expr::new(
                    ExprKind::DotCall {
                        module: name,
                        name: member_name,
                        args,
                    },
                    span.merge(end),
                )))
            }
            TokenKind::LBracket => self.parse_subscript(name, span),
            _ => Ok(self.arena.alloc(Expr::new(ExprKind::Ident(name), span))),
        }
    }

    /// Parse `( expr, ... )` into a flattened argument range.
    fn parse_call_args(&mut self) -> Result<(ExprRange, Span), ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut args: SmallVec<[ExprId; 4]> = SmallVec::new();
        if !self.at(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if self.at(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        let close = self.expect(TokenKind::RParen)?;
        Ok((self.arena.alloc_args(&args), close.span))
    }

    /// Parse `name[...]` subscripts: a single index or a range slice with
    /// any combination of omitted bounds.
    fn parse_subscript(&mut self, param: Name, ident_span: Span) -> Result<ExprId, ParseError> {
        self.expect(TokenKind::LBracket)?;

        let start = if self.at(TokenKind::Colon) {
            None
        } else {
            Some(self.parse_expr()?)
        };

        // `name[expr]` with no colon is a single subscript.
        if let (Some(index), true) = (start, self.at(TokenKind::RBracket)) {
            let close = self.advance();
            return Ok(self.arena.alloc(Expr::new(
                ExprKind::SingleSlice { param, index },
                ident_span.merge(close.span),
            )));
        }

        self.expect(TokenKind::Colon)?;
        let end = if self.at(TokenKind::Colon) || self.at(TokenKind::RBracket) {
            None
        } else {
            Some(self.parse_expr()?)
        };

        let step = if self.at(TokenKind::Colon) {
            self.advance();
            if self.at(TokenKind::RBracket) {
                None
            } else {
                Some(self.parse_expr()?)
            }
        } else {
            None
        };

        let close = self.expect(TokenKind::RBracket)?;
        let span = ident_span.merge(close.span);
        let start = self.bound_or_marker(start, span);
        let end = self.bound_or_marker(end, span);
        let step = self.bound_or_marker(step, span);
        Ok(self.arena.alloc(Expr::new(
            ExprKind::RangeSlice {
                param,
                start,
                end,
                step,
            },
            span,
        )))
    }

    /// An omitted slice bound becomes an `EndOfSlice` marker node, so slice
    /// bounds are always valid ids.
    fn bound_or_marker(&mut self, bound: Option<ExprId>, slice_span: Span) -> ExprId {
        bound.unwrap_or_else(|| {
            self.arena
                .alloc(Expr::new(ExprKind::EndOfSlice, slice_span))
        })
    }
}

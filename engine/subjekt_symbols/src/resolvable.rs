//! Templates pre-scanned into skeleton and expression slots.

use subjekt_ir::{ExprTree, SharedInterner, Span};
use subjekt_parse::ParseError;

use crate::errors::{internal, EvalError};

/// Delimiter pair marking embedded expressions inside a template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateDelimiters {
    pub open: String,
    pub close: String,
}

impl TemplateDelimiters {
    /// Create a delimiter pair.
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        TemplateDelimiters {
            open: open.into(),
            close: close.into(),
        }
    }
}

impl Default for TemplateDelimiters {
    /// The conventional `${{ ... }}` delimiters.
    fn default() -> Self {
        TemplateDelimiters::new("${{", "}}")
    }
}

/// One piece of the formattable skeleton.
#[derive(Clone, Debug)]
enum Segment {
    /// Literal text copied through verbatim.
    Text(String),
    /// Index into the unique expression slots.
    Slot(usize),
}

/// A template string pre-scanned into a formattable skeleton plus an
/// ordered list of **unique** raw expression sources.
///
/// Repeated identical expressions collapse to one slot, so the template
/// `"${{x}} and ${{x}}"` carries a single expression resolved once per
/// context. Each unique source is parsed into an [`ExprTree`] at
/// construction; resolution later pairs one string per slot with
/// [`Resolvable::format`].
#[derive(Clone, Debug, Default)]
pub struct Resolvable {
    raw: String,
    segments: Vec<Segment>,
    sources: Vec<String>,
    trees: Vec<ExprTree>,
}

impl Resolvable {
    /// Scan and parse a template.
    ///
    /// Fails on an unclosed delimiter or a malformed embedded expression;
    /// error spans are positioned within the full template string.
    pub fn compile(
        template: &str,
        delimiters: &TemplateDelimiters,
        interner: &SharedInterner,
    ) -> Result<Self, ParseError> {
        let mut segments = Vec::new();
        let mut sources: Vec<String> = Vec::new();
        let mut trees = Vec::new();

        let mut cursor = 0usize;
        while let Some(found) = template[cursor..].find(&delimiters.open) {
            let open_at = cursor + found;
            if open_at > cursor {
                segments.push(Segment::Text(template[cursor..open_at].to_owned()));
            }
            let expr_start = open_at + delimiters.open.len();
            let Some(close_found) = template[expr_start..].find(&delimiters.close) else {
                return Err(ParseError::new(
                    format!("unclosed `{}` delimiter", delimiters.open),
                    Span::from_range(open_at..template.len()),
                ));
            };
            let expr_end = expr_start + close_found;
            let raw_source = &template[expr_start..expr_end];
            let source = raw_source.trim();

            let slot = match sources.iter().position(|s| s == source) {
                Some(slot) => slot,
                None => {
                    let leading = raw_source.len() - raw_source.trim_start().len();
                    let offset = u32::try_from(expr_start + leading).unwrap_or(u32::MAX);
                    let tree = subjekt_parse::parse(source, interner).map_err(|err| {
                        ParseError::new(
                            err.message,
                            Span::new(err.span.start + offset, err.span.end + offset),
                        )
                    })?;
                    sources.push(source.to_owned());
                    trees.push(tree);
                    sources.len() - 1
                }
            };
            segments.push(Segment::Slot(slot));
            cursor = expr_end + delimiters.close.len();
        }
        if cursor < template.len() {
            segments.push(Segment::Text(template[cursor..].to_owned()));
        }

        Ok(Resolvable {
            raw: template.to_owned(),
            segments,
            sources,
            trees,
        })
    }

    /// An empty template (no text, no slots).
    pub fn empty() -> Self {
        Self::default()
    }

    /// The original template string.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Unique raw expression sources, in first-appearance order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Parsed trees, parallel to [`Resolvable::sources`].
    pub fn trees(&self) -> &[ExprTree] {
        &self.trees
    }

    /// Substitute one resolved string per unique slot into the skeleton.
    ///
    /// `slot_values` must be parallel to [`Resolvable::sources`]; a length
    /// mismatch is a broken engine invariant.
    pub fn format(&self, slot_values: &[String]) -> Result<String, EvalError> {
        if slot_values.len() != self.sources.len() {
            return Err(internal(format!(
                "template has {} expression slot(s) but {} value(s) were supplied",
                self.sources.len(),
                slot_values.len()
            )));
        }
        let mut out = String::with_capacity(self.raw.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(slot) => match slot_values.get(*slot) {
                    Some(value) => out.push_str(value),
                    None => return Err(internal("expression slot index out of range")),
                },
            }
        }
        Ok(out)
    }
}

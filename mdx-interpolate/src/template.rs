//! The placeholder-to-expression compiler.
//!
//! Decides whether a brace-delimited specifier denotes a single dotted-path
//! expression or a mixed text template, and builds the corresponding
//! expression fragment. Knows nothing about tags, attributes, or tree
//! traversal.

use std::{cell::Cell, sync::LazyLock};

use oxc::{
	allocator::{Allocator, Box, FromIn, Vec},
	ast::ast::{
		Expression, IdentifierName, IdentifierReference, StaticMemberExpression, TemplateElement,
		TemplateElementValue, TemplateLiteral,
	},
	span::{Atom, Span},
};
use regex::Regex;

/// Matches one non-nested brace span. A second `{` before the matching `}`
/// ends the current match early; braces do not nest.
static PLACEHOLDER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\{[^{}]+\}").expect("placeholder pattern"));

/// Matches a double-brace span, `{{X}}`, capturing the inner text.
static DOUBLE_BRACED: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\{\{([^{}]*)\}\}").expect("double-brace pattern"));

/// Matches a brace span with an optional `prefix:` segment, capturing the
/// text after the colon.
static PREFIXED: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\{([^{}:]*:)?([^{}]+)\}").expect("prefix pattern"));

/// Matches a value that is exactly one brace pair with nothing around it.
static WHOLE_SPAN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\{[^{}]*\}$").expect("whole-span pattern"));

/// Fatal defects raised while compiling placeholder text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterpolateError {
	/// The template scanner collected chunk and hole counts that do not
	/// line up. Signals a bug in the scanning loop, never bad input, so
	/// the document compile must be aborted rather than patched around.
	#[error(
		"malformed interpolation template: {quasis} literal chunks for {holes} holes in `{value}`"
	)]
	MalformedTemplate {
		/// Literal chunks collected by the scanner.
		quasis: usize,
		/// Placeholder holes collected by the scanner.
		holes: usize,
		/// The normalized text being compiled.
		value: String,
		/// Where the offending literal sits in the source document.
		span: Span,
	},
}

impl InterpolateError {
	/// The source location the error should be reported against.
	pub fn span(&self) -> Span {
		match self {
			Self::MalformedTemplate { span, .. } => *span,
		}
	}
}

/// Returns whether `value` still carries at least one placeholder span.
///
/// Values that fail this test must be left byte-identical by the caller.
pub fn has_placeholder(value: &str) -> bool {
	PLACEHOLDER.is_match(value)
}

/// Applies the two textual rewrites, in order: collapse `{{X}}` to `{X}`,
/// then strip an optional `prefix:` segment immediately inside a brace.
///
/// The double-brace form lets authors write markup that survives the
/// upstream parser untouched; the prefix form exists so that collapsing
/// does not re-trigger upstream resolution for single-identifier cases
/// (`{{_:image.alt}}` reduces to `{image.alt}`).
pub fn normalize(input: &str) -> String {
	let collapsed = DOUBLE_BRACED.replace_all(input, "{${1}}");
	PREFIXED.replace_all(&collapsed, "{${2}}").into_owned()
}

/// Compiles a normalized placeholder string into an expression fragment.
///
/// A value that is exactly one brace pair becomes the bare dotted-path
/// expression for its inner text; the attribute's value becomes the
/// expression itself, not a one-hole template. Anything else is scanned
/// left to right: literal runs (including empty ones at either end) become
/// template chunks, each span's trimmed inner text becomes one hole.
///
/// Callers gate on [`has_placeholder`] first; `compile` is only invoked
/// when at least one span exists.
pub fn compile<'a>(
	allocator: &'a Allocator,
	span: Span,
	value: &str,
) -> Result<Expression<'a>, InterpolateError> {
	if WHOLE_SPAN.is_match(value) {
		return Ok(dotted_path(allocator, span, &value[1..value.len() - 1]));
	}

	let mut quasis = Vec::new_in(allocator);
	let mut expressions = Vec::new_in(allocator);
	let mut tail_start = 0;

	for found in PLACEHOLDER.find_iter(value) {
		quasis.push(template_chunk(allocator, span, &value[tail_start..found.start()]));

		let inner = found.as_str();
		expressions.push(dotted_path(allocator, span, inner[1..inner.len() - 1].trim()));

		tail_start = found.end();
	}

	quasis.push(template_chunk(allocator, span, &value[tail_start..]));

	if quasis.len() != expressions.len() + 1 {
		return Err(InterpolateError::MalformedTemplate {
			quasis: quasis.len(),
			holes: expressions.len(),
			value: value.to_owned(),
			span,
		});
	}

	let last = quasis.len() - 1;
	for (index, quasi) in quasis.iter_mut().enumerate() {
		quasi.tail = index == last;
	}

	Ok(Expression::TemplateLiteral(Box::new_in(
		TemplateLiteral { span, quasis, expressions },
		allocator,
	)))
}

/// Folds a dotted identifier path into a member-access chain.
///
/// A single segment stays a bare identifier; `a.b.c` becomes `(a.b).c`,
/// non-computed at every step. Segments are split off verbatim with no
/// validation; malformed segments degrade downstream rather than error
/// here.
fn dotted_path<'a>(allocator: &'a Allocator, span: Span, path: &str) -> Expression<'a> {
	let (head, rest) = match path.split_once('.') {
		Some((head, rest)) => (head, Some(rest)),
		None => (path, None),
	};

	let mut expression = identifier(allocator, span, head);

	if let Some(rest) = rest {
		for segment in rest.split('.') {
			expression = Expression::StaticMemberExpression(Box::new_in(
				StaticMemberExpression {
					span,
					object: expression,
					property: IdentifierName {
						span,
						name: Atom::from_in(segment, allocator),
					},
					optional: false,
				},
				allocator,
			));
		}
	}

	expression
}

/// Builds a bare identifier reference.
fn identifier<'a>(allocator: &'a Allocator, span: Span, name: &str) -> Expression<'a> {
	Expression::Identifier(Box::new_in(
		IdentifierReference {
			span,
			name: Atom::from_in(name, allocator),
			reference_id: Cell::new(None),
		},
		allocator,
	))
}

/// Builds one literal chunk of a template literal. The tail flag is fixed
/// up by [`compile`] once the full chunk list is known.
fn template_chunk<'a>(allocator: &'a Allocator, span: Span, raw: &str) -> TemplateElement<'a> {
	let raw = Atom::from_in(raw, allocator);
	TemplateElement {
		span,
		value: TemplateElementValue { raw, cooked: Some(raw) },
		tail: false,
	}
}

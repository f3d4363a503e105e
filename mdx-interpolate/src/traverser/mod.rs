//! Tree traversal and node selection.
//!
//! The upstream compiler can emit the same markup in two structurally
//! different encodings, so the program is swept twice: once over
//! automatic-runtime factory calls and once over preserved JSX elements.
//! The two matchers are kept independent; only the rewriting downstream of
//! "found a qualifying string value" is shared.

mod call_expression;
mod jsx_element;

use oxc::{
	allocator::Allocator,
	ast::ast::{Expression, StringLiteral},
};

use crate::{
	options::InterpolateOptions,
	template::{self, InterpolateError},
};

/// Pass A: rewrites markup emitted as automatic-runtime factory calls.
pub struct CallExpressionPass<'a, 's> {
	/// Merged caller options, read-only for the duration of the walk.
	pub settings: &'s InterpolateOptions,
	/// The underlying Bumpalo allocator.
	pub allocator: &'a Allocator,
	/// The first template defect hit during the walk. Once set, the
	/// remaining hooks are no-ops and the entry point aborts.
	pub fatal: Option<InterpolateError>,
	/// How many literals were replaced with expressions.
	pub rewrites: usize,
}

impl<'a, 's> CallExpressionPass<'a, 's> {
	/// Creates the pass over the given settings and allocator.
	pub fn new(settings: &'s InterpolateOptions, allocator: &'a Allocator) -> Self {
		Self {
			settings,
			allocator,
			fatal: None,
			rewrites: 0,
		}
	}
}

/// Pass B: rewrites markup preserved as component-table JSX elements.
pub struct JsxElementPass<'a, 's> {
	/// Merged caller options, read-only for the duration of the walk.
	pub settings: &'s InterpolateOptions,
	/// The underlying Bumpalo allocator.
	pub allocator: &'a Allocator,
	/// The first template defect hit during the walk. Once set, the
	/// remaining hooks are no-ops and the entry point aborts.
	pub fatal: Option<InterpolateError>,
	/// How many literals were replaced with expressions.
	pub rewrites: usize,
}

impl<'a, 's> JsxElementPass<'a, 's> {
	/// Creates the pass over the given settings and allocator.
	pub fn new(settings: &'s InterpolateOptions, allocator: &'a Allocator) -> Self {
		Self {
			settings,
			allocator,
			fatal: None,
			rewrites: 0,
		}
	}
}

/// Compiles one qualifying string value, if its decoded, normalized text
/// still carries a placeholder span.
///
/// Returns `Ok(None)` when no brace pair remains; the caller leaves the
/// literal byte-identical in that case, so still-encoded text only ever
/// surfaces in the output when a rewrite actually happens.
fn rewrite_value<'a>(
	allocator: &'a Allocator,
	literal: &StringLiteral<'a>,
) -> Result<Option<Expression<'a>>, InterpolateError> {
	let value = template::normalize(&percent_decode(literal.value.as_str()));
	if !template::has_placeholder(&value) {
		return Ok(None);
	}

	template::compile(allocator, literal.span, &value).map(Some)
}

/// Percent-decodes an attribute value ahead of placeholder scanning.
fn percent_decode(value: &str) -> String {
	let decoded = urlencoding::decode_binary(value.as_bytes());
	String::from_utf8_lossy(&decoded).into_owned()
}

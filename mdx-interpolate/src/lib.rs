//! # mdx-interpolate
//! Core library for the MDX placeholder interpolation pass.
//!
//! The pass scans a compiled MDX program for link, image, and media markup
//! and turns brace-delimited placeholders inside their attribute text into
//! live expressions: `alt="{image.alt} of site"` becomes the template
//! ``alt={`${image.alt} of site`}``, resolved against the surrounding
//! scope at render time. Authors get variable interpolation in ordinary
//! markdown link/image syntax without the upstream parser having to treat
//! that text as code.
//!
//! Markup reaches this stage in one of two encodings, depending on how the
//! upstream compiler emitted the tree: automatic-runtime factory calls
//! (`_jsx(_components.img, {...})`) or preserved JSX elements
//! (`<_components.img ... />`). Each encoding gets its own sweep; see
//! [`interpolate`].

mod constants;
pub mod options;
pub mod policy;
mod template;
mod traverser;

use oxc::{allocator::Allocator, ast::ast::Program, semantic::Scoping};

pub use crate::{
	options::{ExcludeMap, InterpolateOptions},
	policy::{AllowSpec, ExcludeSpec, TargetTag},
	template::InterpolateError,
};
use crate::traverser::{CallExpressionPass, JsxElementPass};

/// Return value from [`interpolate()`].
pub struct InterpolateResult {
	/// The [`Scoping`] instance after transformation.
	pub scoping: Scoping,
	/// How many string literals were replaced with expressions. Zero means
	/// the tree came back unchanged.
	pub rewrites: usize,
}

/// Rewrites brace-delimited placeholders in [`Program`], in place.
///
/// The tree is swept twice: once for automatic-runtime factory calls, once
/// for component-table JSX elements. A node rewritten by the first sweep
/// is a call expression and therefore invisible to the second, so no
/// literal is ever processed twice; re-running the pass on an
/// already-rewritten tree is a no-op, since compiled values are no longer
/// plain string literals.
///
/// With `options.disable` set, no traversal is performed at all.
///
/// # Errors
///
/// [`InterpolateError::MalformedTemplate`] aborts the document compile:
/// the tree may hold a partial rewrite and must not be fed to codegen.
pub fn interpolate<'a>(
	allocator: &'a Allocator,
	program: &mut Program<'a>,
	scoping: Scoping,
	options: &InterpolateOptions,
) -> Result<InterpolateResult, InterpolateError> {
	if options.disable {
		return Ok(InterpolateResult { scoping, rewrites: 0 });
	}

	let mut call_pass = CallExpressionPass::new(options, allocator);
	let scoping = oxc_traverse::traverse_mut(&mut call_pass, allocator, program, scoping);
	if let Some(error) = call_pass.fatal {
		return Err(error);
	}

	let mut element_pass = JsxElementPass::new(options, allocator);
	let scoping = oxc_traverse::traverse_mut(&mut element_pass, allocator, program, scoping);
	if let Some(error) = element_pass.fatal {
		return Err(error);
	}

	Ok(InterpolateResult {
		scoping,
		rewrites: call_pass.rewrites + element_pass.rewrites,
	})
}

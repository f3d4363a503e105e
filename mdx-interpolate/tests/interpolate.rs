//! End-to-end tests: parse a compiled-MDX program, run the pass, and
//! check the generated code.

use mdx_interpolate::{
	ExcludeSpec, InterpolateOptions, TargetTag, interpolate,
};
use oxc::{
	allocator::Allocator, codegen::Codegen, parser::Parser, semantic::SemanticBuilder,
	span::SourceType,
};

/// Parses `source` as JSX, runs the pass with `options`, and returns the
/// printed program along with the number of rewrites performed.
fn rewrite(source: &str, options: &InterpolateOptions) -> (String, usize) {
	let allocator = Allocator::default();
	let parsed = Parser::new(&allocator, source, SourceType::jsx()).parse();
	assert!(
		!parsed.panicked && parsed.errors.is_empty(),
		"fixture failed to parse: {:?}",
		parsed.errors
	);

	let mut program = parsed.program;
	let semantic = SemanticBuilder::new().build(&program);
	assert!(semantic.errors.is_empty(), "fixture failed semantics: {:?}", semantic.errors);

	let scoping = semantic.semantic.into_scoping();
	let result = interpolate(&allocator, &mut program, scoping, options)
		.expect("interpolation should succeed");

	let generated = Codegen::new().with_scoping(Some(result.scoping)).build(&program);
	(generated.code, result.rewrites)
}

/// Same as [`rewrite`], with default options.
fn rewrite_default(source: &str) -> (String, usize) {
	rewrite(source, &InterpolateOptions::default())
}

/// Options excluding one tag with the given spec.
fn exclude_one(tag: TargetTag, spec: ExcludeSpec) -> InterpolateOptions {
	let mut options = InterpolateOptions::default();
	options.exclude.set(tag, spec);
	options
}

const FACTORY_IMAGE: &str = r#"
function _createMdxContent(props) {
	const _components = { img: "img", p: "p", ...props.components };
	return _jsx(_components.p, {
		children: _jsx(_components.img, {
			src: "{image.src}",
			alt: "{image.alt} of site",
			title: "plain title"
		})
	});
}
"#;

#[test]
fn factory_call_whole_span_becomes_path_expression() {
	let (output, rewrites) = rewrite_default(FACTORY_IMAGE);

	assert!(output.contains("src: image.src"), "whole-span src not rewritten:\n{output}");
	assert!(!output.contains("\"{image.src}\""), "original literal survived:\n{output}");
	assert_eq!(rewrites, 2);
}

#[test]
fn factory_call_mixed_text_becomes_template() {
	let (output, _) = rewrite_default(FACTORY_IMAGE);

	assert!(
		output.contains("`${image.alt} of site`"),
		"mixed text not rewritten to a template:\n{output}"
	);
}

#[test]
fn braceless_values_are_left_byte_identical() {
	let (output, _) = rewrite_default(FACTORY_IMAGE);

	assert!(output.contains("\"plain title\""), "untouched value changed:\n{output}");
}

#[test]
fn double_braces_and_prefixes_normalize_before_compiling() {
	let source = r#"
		_jsx(_components.img, { alt: "{{image.alt}}", title: "{{_:image.title}}" });
	"#;
	let (output, rewrites) = rewrite_default(source);

	assert!(output.contains("alt: image.alt"), "double-brace span not collapsed:\n{output}");
	assert!(output.contains("title: image.title"), "prefixed span not stripped:\n{output}");
	assert_eq!(rewrites, 2);
}

#[test]
fn percent_encoded_urls_are_decoded_before_scanning() {
	let source = r#"
		_jsx(_components.img, { src: "%7Bimage.src%7D" });
	"#;
	let (output, rewrites) = rewrite_default(source);

	assert!(output.contains("src: image.src"), "encoded placeholder not rewritten:\n{output}");
	assert_eq!(rewrites, 1);
}

#[test]
fn children_array_is_rewritten_one_level_deep() {
	let source = r#"
		_jsxs(_components.a, {
			href: "{link.href}",
			children: ["{xxx} of ", _jsx(_components.strong, { children: "bold" })]
		});
	"#;
	let (output, rewrites) = rewrite_default(source);

	assert!(output.contains("href: link.href"), "href not rewritten:\n{output}");
	assert!(output.contains("`${xxx} of `"), "array element not rewritten:\n{output}");
	assert!(output.contains("\"bold\""), "nested literal should stay untouched:\n{output}");
	assert_eq!(rewrites, 2);
}

#[test]
fn non_object_second_argument_leaves_the_call_unmodified() {
	let source = r#"
		_jsx(_components.img, props);
		_jsx(_components.img, { ...props });
	"#;
	let (output, rewrites) = rewrite_default(source);

	assert!(output.contains("_jsx(_components.img, props)"), "call changed:\n{output}");
	assert_eq!(rewrites, 0);
}

#[test]
fn unknown_factory_names_are_skipped() {
	let source = r#"
		h(_components.img, { src: "{image.src}" });
	"#;
	let (output, rewrites) = rewrite_default(source);

	assert!(output.contains("\"{image.src}\""), "non-factory call was rewritten:\n{output}");
	assert_eq!(rewrites, 0);
}

#[test]
fn member_callees_fall_through_to_the_shape_checks() {
	let source = r#"
		runtime.jsx(_components.img, { src: "{image.src}" });
	"#;
	let (output, rewrites) = rewrite_default(source);

	assert!(output.contains("src: image.src"), "member-callee call not rewritten:\n{output}");
	assert_eq!(rewrites, 1);
}

#[test]
fn other_receivers_and_tags_are_skipped() {
	let source = r#"
		_jsx(other.img, { src: "{image.src}" });
		_jsx(_components.p, { children: "{text}" });
	"#;
	let (output, rewrites) = rewrite_default(source);

	assert!(output.contains("\"{image.src}\""), "wrong receiver was rewritten:\n{output}");
	assert!(output.contains("\"{text}\""), "non-target tag was rewritten:\n{output}");
	assert_eq!(rewrites, 0);
}

#[test]
fn excluded_attribute_is_never_rewritten() {
	let options = exclude_one(TargetTag::Image, ExcludeSpec::Single("alt".to_owned()));
	let (output, rewrites) = rewrite(FACTORY_IMAGE, &options);

	assert!(output.contains("src: image.src"), "allowed attribute not rewritten:\n{output}");
	assert!(
		output.contains("\"{image.alt} of site\""),
		"excluded attribute was rewritten:\n{output}"
	);
	assert_eq!(rewrites, 1);
}

#[test]
fn excluding_a_tag_suppresses_every_rewrite_under_it() {
	let options = exclude_one(TargetTag::Image, ExcludeSpec::All);
	let (output, rewrites) = rewrite(FACTORY_IMAGE, &options);

	assert!(output.contains("\"{image.src}\""), "suppressed tag was rewritten:\n{output}");
	assert!(output.contains("\"{image.alt} of site\""));
	assert_eq!(rewrites, 0);
}

#[test]
fn disable_skips_the_whole_document() {
	let options = InterpolateOptions {
		disable: true,
		..InterpolateOptions::default()
	};
	let (output, rewrites) = rewrite(FACTORY_IMAGE, &options);

	assert!(output.contains("\"{image.src}\""), "disabled pass still rewrote:\n{output}");
	assert_eq!(rewrites, 0);
}

const JSX_MARKUP: &str = r#"
function _createMdxContent(props) {
	const _components = { a: "a", img: "img", ...props.components };
	return <_components.a href="{link.href}" title="{link.title} here">
		{"{link.text}"}
		<_components.img src="{image.src}" />
	</_components.a>;
}
"#;

#[test]
fn jsx_attributes_become_expression_containers() {
	let (output, rewrites) = rewrite_default(JSX_MARKUP);

	assert!(output.contains("href={link.href}"), "href not rewritten:\n{output}");
	assert!(
		output.contains("title={`${link.title} here`}"),
		"mixed-text title not rewritten:\n{output}"
	);
	assert!(output.contains("src={image.src}"), "nested image not rewritten:\n{output}");
	assert_eq!(rewrites, 4);
}

#[test]
fn anchor_string_children_are_rewritten() {
	let (output, _) = rewrite_default(JSX_MARKUP);

	assert!(output.contains("{link.text}"), "anchor child not rewritten:\n{output}");
	assert!(!output.contains("\"{link.text}\""), "anchor child literal survived:\n{output}");
}

#[test]
fn excluding_anchor_children_keeps_the_text_literal() {
	let options = exclude_one(TargetTag::Anchor, ExcludeSpec::Single("children".to_owned()));
	let (output, _) = rewrite(JSX_MARKUP, &options);

	assert!(output.contains("href={link.href}"), "href should still be rewritten:\n{output}");
	assert!(
		output.contains("\"{link.text}\""),
		"excluded children were rewritten:\n{output}"
	);
}

#[test]
fn excluding_the_anchor_tag_suppresses_children_too() {
	let options = exclude_one(TargetTag::Anchor, ExcludeSpec::All);
	let (output, _) = rewrite(JSX_MARKUP, &options);

	assert!(output.contains("\"{link.href}\""), "excluded anchor href was rewritten:\n{output}");
	assert!(output.contains("\"{link.text}\""), "excluded anchor child was rewritten:\n{output}");
	assert!(output.contains("src={image.src}"), "image under the anchor should rewrite:\n{output}");
}

#[test]
fn bare_tag_elements_are_not_matched() {
	let source = r#"
		const markup = <img src="{image.src}" alt="{image.alt}" />;
	"#;
	let (output, rewrites) = rewrite_default(source);

	assert!(output.contains("src=\"{image.src}\""), "bare tag was rewritten:\n{output}");
	assert_eq!(rewrites, 0);
}

#[test]
fn already_wrapped_jsx_expressions_are_left_alone() {
	let source = r#"
		const markup = <_components.img src={image.src} alt={`${image.alt} of site`} />;
	"#;
	let (output, rewrites) = rewrite_default(source);

	assert!(output.contains("src={image.src}"), "expression attribute changed:\n{output}");
	assert_eq!(rewrites, 0);
}

#[test]
fn rerunning_the_pass_is_a_noop() {
	let (first, first_rewrites) = rewrite_default(FACTORY_IMAGE);
	assert!(first_rewrites > 0);

	let (second, second_rewrites) = rewrite_default(&first);
	assert_eq!(second_rewrites, 0);
	assert_eq!(second, first);
}

#[test]
fn rewrites_are_counted_across_both_passes() {
	let source = r#"
		_jsx(_components.img, { src: "{a}" });
		const markup = <_components.img src="{b}" />;
	"#;
	let (_, rewrites) = rewrite_default(source);

	assert_eq!(rewrites, 2);
}

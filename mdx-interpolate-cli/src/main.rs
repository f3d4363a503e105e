//! CLI for the MDX placeholder interpolation pass.
use std::{
	io::{Read, Write},
	sync::Arc,
};

use clap::Parser;
use mdx_interpolate::{ExcludeMap, ExcludeSpec, InterpolateOptions, TargetTag, interpolate};
use oxc::{
	allocator::Allocator,
	codegen::Codegen,
	diagnostics::{OxcDiagnostic, Severity},
	semantic::SemanticBuilder,
	span::SourceType,
};

/// The MDX placeholder interpolation pass.
///
/// Reads a compiled MDX program (JavaScript or JSX), rewrites brace-delimited
/// placeholder text inside link/image/media attributes into live
/// expressions, and prints the rewritten program.
#[derive(Debug, Parser)]
struct Args {
	/// Where to output the rewritten program. Defaults to
	/// stdout; intermediate folders must exist
	#[arg(short = 'o', long = "output")]
	output: Option<String>,
	/// Exclude a tag entirely (`img`) or specific attributes of it
	/// (`img=alt` or `img=alt,src`); may be repeated
	#[arg(short = 'x', long = "exclude")]
	exclude: Vec<String>,
	/// Skip all rewriting and emit the program unchanged
	#[arg(long = "disable")]
	disable: bool,
	/// Treat warnings as errors
	#[arg(short = 'W')]
	warnings_as_errors: bool,
	/// The program to rewrite (defaults to stdin)
	entry_point: Option<String>,
}

fn main() {
	let args = Args::parse();

	let options = match build_options(&args) {
		Ok(options) => options,
		Err(message) => {
			eprintln!("{message}");
			std::process::exit(2);
		}
	};

	let source = if let Some(ref entry) = args.entry_point {
		std::fs::read_to_string(entry).expect("failed to read entry point")
	} else {
		let mut str = String::with_capacity(4096);
		std::io::stdin()
			.read_to_string(&mut str)
			.expect("failed to read stdin");
		str
	};

	let source = Arc::new(source);
	let mut errors = 0;

	let allocator = Allocator::default();
	let parse_result = oxc::parser::Parser::new(&allocator, &source, SourceType::jsx()).parse();
	if parse_result.panicked || !parse_result.errors.is_empty() {
		if parse_result.errors.is_empty() {
			eprintln!("parser panicked, but emitted no errors");
			std::process::exit(1);
		} else {
			for mut error in parse_result.errors {
				if args.warnings_as_errors {
					error = error.with_severity(Severity::Error);
				}

				if error.severity == Severity::Error {
					errors += 1;
				}

				eprintln!("{:?}", error.with_source_code(Arc::clone(&source)));
			}
		}

		if errors > 0 {
			eprintln!("\nexiting due to {errors} errors");
			std::process::exit(1);
		}
	}

	let mut program = parse_result.program;

	let semantic = SemanticBuilder::new()
		.with_check_syntax_error(true)
		.build(&program);

	if !semantic.errors.is_empty() {
		errors = 0;
		for mut error in semantic.errors {
			if args.warnings_as_errors {
				error = error.with_severity(Severity::Error);
			}

			if error.severity == Severity::Error {
				errors += 1;
			}

			eprintln!("{:?}", error.with_source_code(Arc::clone(&source)));
		}
		if errors > 0 {
			eprintln!("\nexiting due to {errors} errors");
			std::process::exit(1);
		}
	}

	let scoping = semantic.semantic.into_scoping();
	let result = match interpolate(&allocator, &mut program, scoping, &options) {
		Ok(result) => result,
		Err(error) => {
			let diagnostic = OxcDiagnostic::error(error.to_string()).with_label(error.span());
			eprintln!("{:?}", diagnostic.with_source_code(Arc::clone(&source)));
			std::process::exit(1);
		}
	};

	let generated = Codegen::new()
		.with_scoping(Some(result.scoping))
		.build(&program);

	if let Some(output) = args.output {
		let mut fd = std::fs::File::create(&output).expect("failed to create output file");
		fd.write_all(generated.code.as_bytes())
			.expect("failed to write to output");
	} else {
		std::io::stdout()
			.write_all(generated.code.as_bytes())
			.expect("failed to write to stdout");
	}
}

/// Builds the pass options from the raw `--exclude` flags.
///
/// A bare tag name suppresses the tag entirely; `tag=attr` suppresses a
/// single attribute and `tag=a,b` a set of them. Later flags for the same
/// tag replace earlier ones.
fn build_options(args: &Args) -> Result<InterpolateOptions, String> {
	let mut exclude = ExcludeMap::default();

	for flag in &args.exclude {
		let (tag_name, attributes) = match flag.split_once('=') {
			Some((tag_name, attributes)) => (tag_name, Some(attributes)),
			None => (flag.as_str(), None),
		};

		let Some(tag) = TargetTag::from_name(tag_name.trim()) else {
			return Err(format!("--exclude: `{tag_name}` is not a recognized tag"));
		};

		let spec = match attributes {
			None => ExcludeSpec::All,
			Some(attributes) => {
				let mut names: Vec<String> = attributes
					.split(',')
					.map(|name| name.trim().to_owned())
					.filter(|name| !name.is_empty())
					.collect();
				match names.len() {
					0 => ExcludeSpec::All,
					1 => ExcludeSpec::Single(names.remove(0)),
					_ => ExcludeSpec::Set(names),
				}
			}
		};

		exclude.set(tag, spec);
	}

	Ok(InterpolateOptions {
		exclude,
		disable: args.disable,
	})
}

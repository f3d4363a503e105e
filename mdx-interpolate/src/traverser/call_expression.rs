use oxc::ast::ast::{
	Argument, ArrayExpressionElement, CallExpression, Expression, ObjectPropertyKind, PropertyKey,
};
use oxc_traverse::{Traverse, TraverseCtx};

use super::{CallExpressionPass, rewrite_value};
use crate::{
	constants::{COMPONENTS_IDENT, JSX_FACTORY, JSX_FACTORY_DEV, JSX_FACTORY_STATIC},
	policy::{self, TargetTag},
};

impl<'a> Traverse<'a> for CallExpressionPass<'a, '_> {
	fn enter_call_expression(
		&mut self,
		node: &mut CallExpression<'a>,
		_ctx: &mut TraverseCtx<'a>,
	) {
		if self.fatal.is_none() {
			self.rewrite_markup_call(node);
		}
	}
}

impl<'a> CallExpressionPass<'a, '_> {
	/// Rewrites the qualifying properties of one markup-creation call.
	///
	/// Non-matching calls are skipped silently, and traversal continues
	/// into the call's children either way.
	fn rewrite_markup_call(&mut self, node: &mut CallExpression<'a>) {
		let Some(tag) = factory_call_tag(node) else {
			return;
		};

		let allowed = tag.allowed();
		let excluded = self.settings.exclude.for_tag(tag);

		// The second argument must be an inline object literal; spreads
		// and references leave the whole call untouched.
		let Some(Argument::ObjectExpression(object)) = node.arguments.get_mut(1) else {
			return;
		};

		for property in &mut object.properties {
			let ObjectPropertyKind::ObjectProperty(property) = property else {
				continue;
			};
			let name = match &property.key {
				PropertyKey::StaticIdentifier(key) => key.name,
				PropertyKey::Identifier(key) => key.name,
				_ => continue,
			};
			if !policy::is_selected(name.as_str(), allowed, excluded) {
				continue;
			}

			match &mut property.value {
				Expression::StringLiteral(literal) => {
					match rewrite_value(self.allocator, literal) {
						Ok(Some(expression)) => {
							property.value = expression;
							self.rewrites += 1;
						}
						Ok(None) => {}
						Err(error) => {
							self.fatal = Some(error);
							return;
						}
					}
				}
				// One level deep only: string elements are rewritten,
				// everything else in the array is left untouched.
				Expression::ArrayExpression(array) => {
					for element in &mut array.elements {
						let ArrayExpressionElement::StringLiteral(literal) = element else {
							continue;
						};
						match rewrite_value(self.allocator, literal) {
							Ok(Some(expression)) => {
								*element = expression.into();
								self.rewrites += 1;
							}
							Ok(None) => {}
							Err(error) => {
								self.fatal = Some(error);
								return;
							}
						}
					}
				}
				_ => {}
			}
		}
	}
}

/// Resolves the target tag of an automatic-runtime markup call.
///
/// An identifier callee must be one of the runtime's factory names; other
/// callee shapes fall through to the argument checks. The first argument
/// must be a `_components.<tag>` member access naming a target tag. Plain
/// string tag names never appear here unresolved, since the upstream
/// compiler interpolates those elements itself before this stage runs.
fn factory_call_tag(node: &CallExpression<'_>) -> Option<TargetTag> {
	if let Expression::Identifier(callee) = &node.callee {
		let name = callee.name.as_str();
		if name != JSX_FACTORY && name != JSX_FACTORY_STATIC && name != JSX_FACTORY_DEV {
			return None;
		}
	}

	let Some(Argument::StaticMemberExpression(member)) = node.arguments.first() else {
		return None;
	};
	let Expression::Identifier(receiver) = &member.object else {
		return None;
	};
	if receiver.name.as_str() != COMPONENTS_IDENT {
		return None;
	}

	TargetTag::from_name(member.property.name.as_str())
}

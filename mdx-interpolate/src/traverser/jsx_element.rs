use oxc::{
	allocator::Box,
	ast::ast::{
		JSXAttributeItem, JSXAttributeName, JSXAttributeValue, JSXChild, JSXElement,
		JSXElementName, JSXExpression, JSXExpressionContainer, JSXMemberExpressionObject,
		JSXOpeningElement,
	},
};
use oxc_traverse::{Traverse, TraverseCtx};

use super::{JsxElementPass, rewrite_value};
use crate::{
	constants::{CHILDREN, COMPONENTS_IDENT},
	policy::{self, TargetTag},
};

impl<'a> Traverse<'a> for JsxElementPass<'a, '_> {
	fn enter_jsx_element(&mut self, node: &mut JSXElement<'a>, _ctx: &mut TraverseCtx<'a>) {
		if self.fatal.is_none() {
			self.rewrite_markup_element(node);
		}
	}
}

impl<'a> JsxElementPass<'a, '_> {
	/// Rewrites the qualifying attributes of one component-table element,
	/// and for anchors, its string children as well.
	fn rewrite_markup_element(&mut self, node: &mut JSXElement<'a>) {
		let Some(tag) = element_tag(&node.opening_element) else {
			return;
		};

		let allowed = tag.allowed();

		for attribute in &mut node.opening_element.attributes {
			let JSXAttributeItem::Attribute(attribute) = attribute else {
				continue;
			};
			let JSXAttributeName::Identifier(name) = &attribute.name else {
				continue;
			};
			if !policy::is_selected(
				name.name.as_str(),
				allowed,
				self.settings.exclude.for_tag(tag),
			) {
				continue;
			}
			let Some(JSXAttributeValue::StringLiteral(literal)) = &attribute.value else {
				continue;
			};

			let span = literal.span;
			match rewrite_value(self.allocator, literal) {
				Ok(Some(expression)) => {
					attribute.value = Some(JSXAttributeValue::ExpressionContainer(Box::new_in(
						JSXExpressionContainer {
							span,
							expression: expression.into(),
						},
						self.allocator,
					)));
					self.rewrites += 1;
				}
				Ok(None) => {}
				Err(error) => {
					self.fatal = Some(error);
					return;
				}
			}
		}

		// An anchor's visible text is structurally a child slot, not an
		// attribute, yet is governed by the `children` allow-list entry.
		if tag == TargetTag::Anchor
			&& policy::is_selected(CHILDREN, allowed, self.settings.exclude.for_tag(tag))
		{
			self.rewrite_anchor_children(node);
		}
	}

	/// Sweeps an anchor's direct children for expression slots that wrap a
	/// plain string literal. Deeper nesting is left to the outer walk.
	fn rewrite_anchor_children(&mut self, node: &mut JSXElement<'a>) {
		for child in &mut node.children {
			let JSXChild::ExpressionContainer(container) = child else {
				continue;
			};
			let JSXExpression::StringLiteral(literal) = &container.expression else {
				continue;
			};
			match rewrite_value(self.allocator, literal) {
				Ok(Some(expression)) => {
					container.expression = expression.into();
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
}

/// Resolves the target tag of a component-table element.
///
/// Bare tag names are deliberately not matched: unqualified names only
/// arise from markup the upstream compiler has already fully resolved, so
/// revisiting them would be redundant work with no effect.
fn element_tag(opening: &JSXOpeningElement<'_>) -> Option<TargetTag> {
	let JSXElementName::MemberExpression(member) = &opening.name else {
		return None;
	};
	let JSXMemberExpressionObject::IdentifierReference(receiver) = &member.object else {
		return None;
	};
	if receiver.name.as_str() != COMPONENTS_IDENT {
		return None;
	}

	TargetTag::from_name(member.property.name.as_str())
}

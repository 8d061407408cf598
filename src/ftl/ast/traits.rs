//! AST traits - Common interfaces for uniform node access
//!
//! This module defines the common traits that provide uniform access
//! to AST node information across all node types.

use super::elements::{
    Attribute, CallArguments, Comment, Expression, Junk, Message, NamedArgument, Pattern,
    Placeable, Resource, SelectExpression, Term, TextChunk, Variant,
};
use super::range::{Position, Range};

/// Visitor trait for traversing the AST
///
/// Default implementations are empty, so you only need to override the methods you care about.
/// `visit_expression` is called for every expression, before descending into its children.
///
/// # Example
///
/// ```ignore
/// struct VariableCollector(Vec<String>);
///
/// impl Visitor for VariableCollector {
///     fn visit_expression(&mut self, expression: &Expression) {
///         if let Expression::VariableReference(var) = expression {
///             self.0.push(var.id.name.clone());
///         }
///     }
/// }
/// ```
pub trait Visitor {
    fn visit_resource(&mut self, _resource: &Resource) {}
    fn leave_resource(&mut self, _resource: &Resource) {}

    fn visit_message(&mut self, _message: &Message) {}
    fn leave_message(&mut self, _message: &Message) {}

    fn visit_term(&mut self, _term: &Term) {}
    fn leave_term(&mut self, _term: &Term) {}

    fn visit_attribute(&mut self, _attribute: &Attribute) {}
    fn leave_attribute(&mut self, _attribute: &Attribute) {}

    fn visit_comment(&mut self, _comment: &Comment) {}
    fn visit_junk(&mut self, _junk: &Junk) {}

    fn visit_pattern(&mut self, _pattern: &Pattern) {}
    fn leave_pattern(&mut self, _pattern: &Pattern) {}

    fn visit_text_chunk(&mut self, _chunk: &TextChunk) {}

    fn visit_placeable(&mut self, _placeable: &Placeable) {}
    fn leave_placeable(&mut self, _placeable: &Placeable) {}

    fn visit_expression(&mut self, _expression: &Expression) {}

    fn visit_select_expression(&mut self, _select: &SelectExpression) {}
    fn leave_select_expression(&mut self, _select: &SelectExpression) {}

    fn visit_variant(&mut self, _variant: &Variant) {}
    fn leave_variant(&mut self, _variant: &Variant) {}

    fn visit_call_arguments(&mut self, _arguments: &CallArguments) {}
    fn leave_call_arguments(&mut self, _arguments: &CallArguments) {}

    fn visit_named_argument(&mut self, _argument: &NamedArgument) {}
}

/// Common interface for all AST nodes
pub trait AstNode {
    fn node_type(&self) -> &'static str;
    fn display_label(&self) -> String;
    fn range(&self) -> &Range;
    fn start_position(&self) -> Position {
        self.range().start
    }

    /// Accept a visitor for traversing this node and its children
    fn accept(&self, visitor: &mut dyn Visitor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ftl::parsing::parse_resource;

    #[derive(Default)]
    struct CountingVisitor {
        messages: usize,
        terms: usize,
        variants: usize,
        variables: Vec<String>,
        depth: usize,
        max_depth: usize,
    }

    impl Visitor for CountingVisitor {
        fn visit_message(&mut self, _: &Message) {
            self.messages += 1;
        }
        fn visit_term(&mut self, _: &Term) {
            self.terms += 1;
        }
        fn visit_variant(&mut self, _: &Variant) {
            self.variants += 1;
        }
        fn visit_expression(&mut self, expression: &Expression) {
            if let Expression::VariableReference(var) = expression {
                self.variables.push(var.id.name.clone());
            }
        }
        fn visit_placeable(&mut self, _: &Placeable) {
            self.depth += 1;
            self.max_depth = self.max_depth.max(self.depth);
        }
        fn leave_placeable(&mut self, _: &Placeable) {
            self.depth -= 1;
        }
    }

    #[test]
    fn test_visitor_traversal() {
        let source = "\
-brand = Firefox
emails = { $count ->
    [one] One email for { $user }
   *[other] { $count } emails
}
nested = {{ $deep }}
";
        let resource = parse_resource(source);

        let mut visitor = CountingVisitor::default();
        resource.accept(&mut visitor);

        assert_eq!(visitor.messages, 2);
        assert_eq!(visitor.terms, 1);
        assert_eq!(visitor.variants, 2);
        assert_eq!(visitor.variables, vec!["count", "user", "count", "deep"]);
        assert_eq!(visitor.max_depth, 2);
        assert_eq!(visitor.depth, 0);
    }
}

//! The syntactic shapes a class-name attribute value can take.
//!
//! | Shape         | Example                                   | Fragments                         |
//! |---------------|-------------------------------------------|-----------------------------------|
//! | StringLiteral | `className="a b"`, `className={"a b"}`    | the string                        |
//! | Call          | `className={cx("a", { "b": on })}`        | string args, string object keys   |
//! | Logical       | `className={on && "a"}`                   | string operands                   |
//! | Conditional   | `className={on ? "a" : "b"}`              | string branches                   |
//! | Template      | `` className={`${c} a`} ``                | static text between substitutions |
//!
//! Anything else is `Unsupported` and reported rather than silently skipped.

use serde::Serialize;
use tree_sitter::Node;

/// Where inside its shape a fragment was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FragmentOrigin {
    Literal,
    CallArgument,
    ObjectKey,
    LogicalOperand,
    ConditionalBranch,
    TemplateQuasi,
}

/// A byte range of raw literal text that may contain class names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment {
    pub start: usize,
    pub end: usize,
    pub origin: FragmentOrigin,
}

#[derive(Debug, Clone, Copy)]
pub enum ClassShape<'t> {
    StringLiteral(Node<'t>),
    Call(Node<'t>),
    Logical(Node<'t>),
    Conditional(Node<'t>),
    Template(Node<'t>),
    Unsupported(Node<'t>),
}

impl<'t> ClassShape<'t> {
    /// Classify an attribute value (`string` or `jsx_expression` node).
    pub fn classify(value: Node<'t>) -> Self {
        let expr = if value.kind() == "jsx_expression" {
            match inner_expression(value) {
                Some(expr) => expr,
                None => return ClassShape::Unsupported(value),
            }
        } else {
            value
        };

        match expr.kind() {
            "string" => ClassShape::StringLiteral(expr),
            "call_expression" => ClassShape::Call(expr),
            "binary_expression" if is_logical(expr) => ClassShape::Logical(expr),
            "ternary_expression" => ClassShape::Conditional(expr),
            "template_string" => ClassShape::Template(expr),
            _ => ClassShape::Unsupported(expr),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ClassShape::StringLiteral(_) => "string_literal",
            ClassShape::Call(_) => "call",
            ClassShape::Logical(_) => "logical",
            ClassShape::Conditional(_) => "conditional",
            ClassShape::Template(_) => "template",
            ClassShape::Unsupported(_) => "unsupported",
        }
    }

    /// The expression node the shape was classified from
    pub fn node(&self) -> Node<'t> {
        match *self {
            ClassShape::StringLiteral(n)
            | ClassShape::Call(n)
            | ClassShape::Logical(n)
            | ClassShape::Conditional(n)
            | ClassShape::Template(n)
            | ClassShape::Unsupported(n) => n,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ClassShape::Unsupported(_))
    }

    /// Literal fragments reachable within this shape, in source order.
    pub fn fragments(&self) -> Vec<Fragment> {
        let mut out = Vec::new();
        match *self {
            ClassShape::StringLiteral(node) => {
                push_string(&mut out, node, FragmentOrigin::Literal);
            }
            ClassShape::Call(node) => call_fragments(&mut out, node),
            ClassShape::Logical(node) => {
                for field in ["left", "right"] {
                    if let Some(side) = node.child_by_field_name(field) {
                        push_string(&mut out, side, FragmentOrigin::LogicalOperand);
                    }
                }
            }
            ClassShape::Conditional(node) => {
                for field in ["consequence", "alternative"] {
                    if let Some(branch) = node.child_by_field_name(field) {
                        push_string(&mut out, branch, FragmentOrigin::ConditionalBranch);
                    }
                }
            }
            ClassShape::Template(node) => template_fragments(&mut out, node),
            ClassShape::Unsupported(_) => {}
        }
        out
    }
}

/// First non-comment expression inside `{ ... }`
fn inner_expression(container: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = container.walk();
    let expr = container
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment");
    expr
}

fn is_logical(binary: Node<'_>) -> bool {
    binary
        .child_by_field_name("operator")
        .map(|op| matches!(op.kind(), "&&" | "||" | "??"))
        .unwrap_or(false)
}

/// Push the text between the quotes of `node` if it is a string literal
fn push_string(out: &mut Vec<Fragment>, node: Node<'_>, origin: FragmentOrigin) {
    if node.kind() != "string" {
        return;
    }
    let (start, end) = (node.start_byte(), node.end_byte());
    if end - start >= 2 {
        out.push(Fragment { start: start + 1, end: end - 1, origin });
    }
}

fn call_fragments(out: &mut Vec<Fragment>, call: Node<'_>) {
    let Some(arguments) = call.child_by_field_name("arguments") else {
        return;
    };
    if arguments.kind() != "arguments" {
        // Tagged template: cx`...`
        return;
    }

    let mut cursor = arguments.walk();
    for arg in arguments.named_children(&mut cursor) {
        match arg.kind() {
            "string" => push_string(out, arg, FragmentOrigin::CallArgument),
            "object" => {
                let mut member_cursor = arg.walk();
                for member in arg.named_children(&mut member_cursor) {
                    if member.kind() != "pair" {
                        continue;
                    }
                    if let Some(key) = member.child_by_field_name("key") {
                        push_string(out, key, FragmentOrigin::ObjectKey);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Static quasi text: everything between the backticks not inside `${ }`
fn template_fragments(out: &mut Vec<Fragment>, template: Node<'_>) {
    let (start, end) = (template.start_byte(), template.end_byte());
    if end - start < 2 {
        return;
    }
    let inner_end = end - 1;
    let mut pos = start + 1;

    let mut cursor = template.walk();
    for child in template.named_children(&mut cursor) {
        if child.kind() != "template_substitution" {
            continue;
        }
        if child.start_byte() > pos {
            out.push(Fragment { start: pos, end: child.start_byte(), origin: FragmentOrigin::TemplateQuasi });
        }
        pos = child.end_byte();
    }
    if inner_end > pos {
        out.push(Fragment { start: pos, end: inner_end, origin: FragmentOrigin::TemplateQuasi });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_string, ParsedSource};
    use crate::rewrite::jsx::find_class_attributes;

    fn parse(attr: &str) -> ParsedSource {
        parse_string(format!("const a = <div {} />;", attr), "tsx", "<test>".to_string()).unwrap()
    }

    fn shape_and_fragments(parsed: &ParsedSource) -> (&'static str, Vec<(String, FragmentOrigin)>) {
        let attrs = find_class_attributes(parsed, &["className".to_string()]);
        let shape = ClassShape::classify(attrs[0].value.unwrap());
        let fragments = shape
            .fragments()
            .into_iter()
            .map(|f| (parsed.source[f.start..f.end].to_string(), f.origin))
            .collect();
        (shape.tag(), fragments)
    }

    #[test]
    fn test_plain_string() {
        let parsed = parse(r#"className="text-a bg-b""#);
        assert_eq!(
            shape_and_fragments(&parsed),
            ("string_literal", vec![("text-a bg-b".to_string(), FragmentOrigin::Literal)])
        );
    }

    #[test]
    fn test_braced_string() {
        let parsed = parse(r#"className={'text-a'}"#);
        assert_eq!(
            shape_and_fragments(&parsed),
            ("string_literal", vec![("text-a".to_string(), FragmentOrigin::Literal)])
        );
    }

    #[test]
    fn test_call_arguments_and_object_keys() {
        let parsed = parse(r#"className={cx("text-a", className, { "bg-b": on, plain: off, ["c"]: x })}"#);
        assert_eq!(
            shape_and_fragments(&parsed),
            (
                "call",
                vec![
                    ("text-a".to_string(), FragmentOrigin::CallArgument),
                    ("bg-b".to_string(), FragmentOrigin::ObjectKey),
                ]
            )
        );
    }

    #[test]
    fn test_logical() {
        let parsed = parse(r#"className={isActive && "text-a"}"#);
        assert_eq!(
            shape_and_fragments(&parsed),
            ("logical", vec![("text-a".to_string(), FragmentOrigin::LogicalOperand)])
        );

        let parsed = parse(r#"className={custom ?? "text-a"}"#);
        assert_eq!(shape_and_fragments(&parsed).0, "logical");
    }

    #[test]
    fn test_non_logical_binary_is_unsupported() {
        let parsed = parse(r#"className={"text-a " + extra}"#);
        assert_eq!(shape_and_fragments(&parsed), ("unsupported", vec![]));
    }

    #[test]
    fn test_conditional() {
        let parsed = parse(r#"className={on ? "text-a" : "text-b"}"#);
        assert_eq!(
            shape_and_fragments(&parsed),
            (
                "conditional",
                vec![
                    ("text-a".to_string(), FragmentOrigin::ConditionalBranch),
                    ("text-b".to_string(), FragmentOrigin::ConditionalBranch),
                ]
            )
        );
    }

    #[test]
    fn test_template_quasis_only() {
        let parsed = parse(r#"className={`${className} text-a ${on ? "x" : "y"} bg-b`}"#);
        assert_eq!(
            shape_and_fragments(&parsed),
            (
                "template",
                vec![
                    (" text-a ".to_string(), FragmentOrigin::TemplateQuasi),
                    (" bg-b".to_string(), FragmentOrigin::TemplateQuasi),
                ]
            )
        );
    }

    #[test]
    fn test_identifier_is_unsupported() {
        let parsed = parse("className={styles.root}");
        let attrs = find_class_attributes(&parsed, &["className".to_string()]);
        let shape = ClassShape::classify(attrs[0].value.unwrap());
        assert!(!shape.is_supported());
        assert_eq!(shape.node().kind(), "member_expression");
    }
}

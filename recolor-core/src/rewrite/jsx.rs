//! Locating class-name attributes in JSX.

use tree_sitter::Node;

use crate::parser::ParsedSource;

/// A JSX attribute whose name is one of the configured class attributes.
#[derive(Debug, Clone, Copy)]
pub struct ClassAttribute<'t> {
    /// The whole `jsx_attribute` node
    pub node: Node<'t>,
    /// Attribute value; `None` for a bare `<div className />`
    pub value: Option<Node<'t>>,
}

/// All class-name attributes in document order, nested elements included.
pub fn find_class_attributes<'t>(parsed: &'t ParsedSource, names: &[String]) -> Vec<ClassAttribute<'t>> {
    let mut found = Vec::new();
    let mut stack = vec![parsed.root()];

    while let Some(node) = stack.pop() {
        if node.kind() == "jsx_attribute" {
            if let Some(attribute) = class_attribute(parsed, node, names) {
                found.push(attribute);
            }
        }

        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    found
}

fn class_attribute<'t>(parsed: &ParsedSource, node: Node<'t>, names: &[String]) -> Option<ClassAttribute<'t>> {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect();

    let name = children.first()?;
    if name.kind() != "property_identifier" {
        return None;
    }
    let name_text = parsed.text(*name);
    if !names.iter().any(|n| n == name_text) {
        return None;
    }

    Some(ClassAttribute {
        node,
        value: children.get(1).copied(),
    })
}

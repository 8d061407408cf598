//! Treeviz formatter for resources
//!
//! Treeviz is a one line per node rendering of the AST, meant for quickly scanning what the
//! parser made of a file. Nesting is drawn with box connectors, two columns per level:
//!
//!     ⧉ Resource (3 entries)
//!     ├─ ✉ hello
//!     │ ├─ # Greeting shown on the start page
//!     │ └─ ≡ Hello, { $name }!
//!     │   ├─ ◦ Hello,
//!     │   ├─ {} { $name }
//!     │   │ └─ $ $name
//!     │   └─ ◦ !
//!     ├─ ⊖ -brand
//!     │ └─ ≡ Firefox
//!     │   └─ ◦ Firefox
//!     └─ ✗ oops
//!
//! Labels are truncated to 30 characters. With the `show-linum` parameter every line is
//! prefixed with the (1-based) source line the node starts on.
//!
//! Icons
//!     Entries:
//!         Resource: ⧉
//!         Message: ✉
//!         Term: ⊖
//!         Comment, GroupComment, ResourceComment: #, ##, ###
//!         Junk: ✗
//!     Values:
//!         Attribute: @
//!         Pattern: ≡
//!         TextChunk: ◦
//!         Placeable: {}
//!     Expressions:
//!         StringLiteral: "
//!         NumberLiteral: №
//!         VariableReference: $
//!         MessageReference: →
//!         TermReference: -
//!         FunctionReference: ƒ
//!         SelectExpression: ⋔
//!         Variant: ▸
//!         CallArguments: ( )
//!         NamedArgument: :

use crate::ftl::ast::{snapshot_from_resource, AstSnapshot, Resource};
use std::collections::HashMap;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Resource" => "⧉",
        "Message" => "✉",
        "Term" => "⊖",
        "Comment" => "#",
        "GroupComment" => "##",
        "ResourceComment" => "###",
        "Junk" => "✗",
        "Attribute" => "@",
        "Pattern" => "≡",
        "TextChunk" => "◦",
        "Placeable" => "{}",
        "StringLiteral" => "\"",
        "NumberLiteral" => "№",
        "VariableReference" => "$",
        "MessageReference" => "→",
        "TermReference" => "-",
        "FunctionReference" => "ƒ",
        "SelectExpression" => "⋔",
        "Variant" => "▸",
        "CallArguments" => "( )",
        "NamedArgument" => ":",
        _ => "○",
    }
}

struct Layout {
    show_linum: bool,
    linum_width: usize,
}

impl Layout {
    fn linum_prefix(&self, snapshot: &AstSnapshot) -> String {
        if self.show_linum {
            format!(
                "{:0width$} ",
                snapshot.range.start.line + 1,
                width = self.linum_width
            )
        } else {
            String::new()
        }
    }
}

fn format_snapshot(
    snapshot: &AstSnapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    layout: &Layout,
) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(&snapshot.node_type);
    let truncated_label = truncate(&snapshot.label, 30);

    output.push_str(&format!(
        "{}{}{} {} {}\n",
        layout.linum_prefix(snapshot),
        prefix,
        connector,
        icon,
        truncated_label
    ));

    if !snapshot.children.is_empty() {
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let child_count = snapshot.children.len();

        for (i, child) in snapshot.children.iter().enumerate() {
            output.push_str(&format_snapshot(child, &child_prefix, i, child_count, layout));
        }
    }

    output
}

fn format_resource_snapshot(snapshot: &AstSnapshot, layout: &Layout) -> String {
    let icon = get_icon(&snapshot.node_type);
    let mut output = format!(
        "{}{} {}\n",
        layout.linum_prefix(snapshot),
        icon,
        snapshot.label
    );

    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count, layout));
    }

    output
}

pub fn to_treeviz_str(resource: &Resource) -> String {
    to_treeviz_str_with_params(resource, &HashMap::new())
}

pub fn to_treeviz_str_with_params(resource: &Resource, params: &HashMap<String, String>) -> String {
    let show_linum = params
        .get("show-linum")
        .map(|v| v != "false")
        .unwrap_or(false);

    let snapshot = snapshot_from_resource(resource);
    let last_line = snapshot.range.end.line + 1;
    let layout = Layout {
        show_linum,
        linum_width: last_line.to_string().len().max(2),
    };
    format_resource_snapshot(&snapshot, &layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ftl::parsing::parse_resource;

    #[test]
    fn test_tree_shape() {
        let resource = parse_resource("hello = Hi { $name }\n-brand = Firefox\n");
        let output = to_treeviz_str(&resource);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "⧉ Resource (2 entries)");
        assert_eq!(lines[1], "├─ ✉ hello");
        assert_eq!(lines[2], "│ └─ ≡ Hi { $name }");
        assert_eq!(lines[3], "│   ├─ ◦ Hi ");
        assert_eq!(lines[4], "│   └─ {} { $name }");
        assert_eq!(lines[5], "│     └─ $ $name");
        assert_eq!(lines[6], "└─ ⊖ -brand");
    }

    #[test]
    fn test_long_labels_are_truncated() {
        let resource = parse_resource(&format!("m = {}\n", "x".repeat(40)));
        let output = to_treeviz_str(&resource);
        assert!(output.contains(&format!("◦ {}...", "x".repeat(30))));
    }

    #[test]
    fn test_line_numbers() {
        let resource = parse_resource("a = 1\n\nb = 2\n");
        let mut params = HashMap::new();
        params.insert("show-linum".to_string(), "true".to_string());
        let output = to_treeviz_str_with_params(&resource, &params);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].starts_with("01 ⧉"));
        assert!(lines[1].starts_with("01 ├─ ✉ a"));
        assert!(output.contains("03 └─ ✉ b"));
    }

    #[test]
    fn test_junk_icon() {
        let output = to_treeviz_str(&parse_resource("what\n"));
        assert!(output.contains("└─ ✗ what"));
    }
}

//! Markup generator.
//!
//! Walks the AST and writes tags, attributes and text runs. Compact output
//! puts everything on one line; pretty output puts each child on its own
//! line, indented per nesting level.

use crate::WriteError;
use llxml_parser::ast::{Attribute, Child, Node, TagBlock};

/// Write `node` as compact markup.
pub fn render(node: &Node) -> Result<String, WriteError> {
    let mut out = String::new();
    generate_node(node, &Layout::Compact, &mut out, 0)?;
    Ok(out)
}

/// Write `node` with one element or text run per line, children indented by
/// `indent` spaces per level. Ends with a newline.
pub fn render_pretty(node: &Node, indent: usize) -> Result<String, WriteError> {
    let mut out = String::new();
    generate_node(node, &Layout::Pretty { indent }, &mut out, 0)?;
    out.push('\n');
    Ok(out)
}

enum Layout {
    Compact,
    Pretty { indent: usize },
}

impl Layout {
    fn open_line(&self, out: &mut String, depth: usize) {
        if let Layout::Pretty { indent } = self {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&" ".repeat(indent * depth));
        }
    }
}

fn generate_node(
    node: &Node,
    layout: &Layout,
    out: &mut String,
    depth: usize,
) -> Result<(), WriteError> {
    match node {
        Node::Single(tag) => {
            layout.open_line(out, depth);
            generate_open(&tag.name, &tag.attributes, out)?;
            out.push_str("/>");
            Ok(())
        }
        Node::Block(block) => generate_block(block, layout, out, depth),
    }
}

fn generate_block(
    block: &TagBlock,
    layout: &Layout,
    out: &mut String,
    depth: usize,
) -> Result<(), WriteError> {
    layout.open_line(out, depth);
    generate_open(&block.name, &block.attributes, out)?;
    out.push('>');

    let mut previous_was_text = false;
    for child in &block.children {
        match child {
            Child::Text(text) => {
                if previous_was_text {
                    return Err(WriteError::new(format!(
                        "adjacent text runs inside <{}> would merge",
                        block.name
                    )));
                }
                check_text(&text.value)?;
                layout.open_line(out, depth + 1);
                out.push_str(&text.value);
                previous_was_text = true;
            }
            Child::Element(node) => {
                generate_node(node, layout, out, depth + 1)?;
                previous_was_text = false;
            }
        }
    }

    // Empty blocks stay on one line
    if !block.children.is_empty() {
        layout.open_line(out, depth);
    }
    out.push_str("</");
    out.push_str(&block.name);
    out.push('>');

    Ok(())
}

/// `<name attr*` without the closing marker.
fn generate_open(name: &str, attributes: &[Attribute], out: &mut String) -> Result<(), WriteError> {
    check_name(name, "tag")?;
    out.push('<');
    out.push_str(name);

    for attr in attributes {
        check_name(&attr.name, "attribute")?;
        out.push(' ');
        out.push_str(&attr.name);
        // Bare attributes carry an empty value
        if !attr.value.is_empty() {
            out.push_str("=\"");
            escape_value(&attr.value, out);
            out.push('"');
        }
    }

    Ok(())
}

fn escape_value(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
}

fn check_name(name: &str, what: &str) -> Result<(), WriteError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'))
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(WriteError::new(format!("invalid {what} name: '{name}'")))
    }
}

fn check_text(text: &str) -> Result<(), WriteError> {
    if text.is_empty() {
        return Err(WriteError::new("empty text run"));
    }
    if text.contains('<') {
        return Err(WriteError::new(format!("text run contains '<': '{text}'")));
    }
    if text.trim() != text {
        return Err(WriteError::new(format!(
            "text run has surrounding whitespace: '{text}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use llxml_parser::ast::{SingleTag, Text};
    use llxml_parser::Parser;
    use pretty_assertions::assert_eq;

    fn parse(source: &str) -> Node {
        Parser::parse(source).unwrap()
    }

    fn compact(source: &str) -> String {
        render(&parse(source)).unwrap()
    }

    /// Parse, write, parse again: both trees must agree.
    fn assert_agrees(source: &str) {
        let original = parse(source);
        let written = render(&original).unwrap();
        assert_eq!(parse(&written), original, "compact: {written}");
        let pretty = render_pretty(&original, 2).unwrap();
        assert_eq!(parse(&pretty), original, "pretty: {pretty}");
    }

    // =========================================================================
    // Compact output
    // =========================================================================

    #[test]
    fn test_single_tag() {
        assert_eq!(compact("<a />"), "<a/>");
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(compact("<a>  </a>"), "<a></a>");
    }

    #[test]
    fn test_attributes() {
        assert_eq!(
            compact("<a k1='v1'   k2 k3=\"\"></a>"),
            "<a k1=\"v1\" k2 k3></a>"
        );
    }

    #[test]
    fn test_mixed_children() {
        assert_eq!(
            compact("<a>\n hello\n <b/>\n world\n</a>"),
            "<a>hello<b/>world</a>"
        );
    }

    #[test]
    fn test_value_escaping() {
        let node = Node::Single(SingleTag::new(
            "a",
            vec![Attribute::new("k", "say \"hi\"\\\n")],
        ));
        assert_eq!(render(&node).unwrap(), r#"<a k="say \"hi\"\\\n"/>"#);
    }

    // =========================================================================
    // Pretty output
    // =========================================================================

    #[test]
    fn test_pretty_nesting() {
        let node = parse("<a k=\"v\">hello<b><c/></b><d></d></a>");
        assert_eq!(
            render_pretty(&node, 2).unwrap(),
            "<a k=\"v\">\n  hello\n  <b>\n    <c/>\n  </b>\n  <d></d>\n</a>\n"
        );
    }

    #[test]
    fn test_pretty_single_root() {
        assert_eq!(render_pretty(&parse("<a/>"), 4).unwrap(), "<a/>\n");
    }

    #[test]
    fn test_pretty_zero_indent() {
        let node = parse("<a><b/></a>");
        assert_eq!(render_pretty(&node, 0).unwrap(), "<a>\n<b/>\n</a>\n");
    }

    // =========================================================================
    // Write/parse agreement
    // =========================================================================

    #[test]
    fn test_agreement_simple() {
        assert_agrees("<a><b></b></a>");
        assert_agrees("<a/>");
        assert_agrees("<a k1=\"v1\" k2></a>");
    }

    #[test]
    fn test_agreement_document() {
        assert_agrees(
            r#"<catalog version="2" draft>
                 <book id="b1" title='Tom\'s "Guide"'>
                   First edition
                   <note lang="en">Out of print</note>
                   <isbn/>
                 </book>
                 <book id="b2" path="C:\\books\\b2" empty="">reprint</book>
               </catalog>"#,
        );
    }

    #[test]
    fn test_agreement_keeps_duplicates_and_order() {
        assert_agrees("<a z=\"1\" a=\"2\" z=\"3\" m/>");
    }

    #[test]
    fn test_agreement_multiline_value() {
        assert_agrees("<a k=\"line one\nline two\tend\"/>");
    }

    // =========================================================================
    // Unwritable trees
    // =========================================================================

    fn block_with(children: Vec<Child>) -> Node {
        let mut block = TagBlock::new("a", vec![]);
        block.children = children;
        Node::Block(block)
    }

    #[test]
    fn test_invalid_tag_name() {
        let node = Node::Single(SingleTag::new("1a", vec![]));
        let err = render(&node).unwrap_err();
        assert_eq!(err.message, "invalid tag name: '1a'");
    }

    #[test]
    fn test_invalid_attribute_name() {
        let node = Node::Single(SingleTag::new("a", vec![Attribute::bare("")]));
        assert!(render(&node).unwrap_err().message.contains("attribute name"));
    }

    #[test]
    fn test_text_with_markup() {
        let node = block_with(vec![Child::Text(Text::new("a < b"))]);
        assert!(render(&node).unwrap_err().message.contains("'<'"));
    }

    #[test]
    fn test_empty_and_padded_text() {
        let node = block_with(vec![Child::Text(Text::new(""))]);
        assert_eq!(render(&node).unwrap_err().message, "empty text run");

        let node = block_with(vec![Child::Text(Text::new(" x"))]);
        assert!(render(&node).unwrap_err().message.contains("whitespace"));
    }

    #[test]
    fn test_adjacent_text_runs() {
        let node = block_with(vec![
            Child::Text(Text::new("one")),
            Child::Text(Text::new("two")),
        ]);
        assert!(render(&node).unwrap_err().message.contains("would merge"));
    }

    #[test]
    fn test_error_display() {
        let err = WriteError::new("empty text run");
        assert_eq!(err.to_string(), "Write error: empty text run");
    }
}

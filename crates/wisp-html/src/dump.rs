use std::fmt::Write;

use wisp_dom::{DomTree, NodeId, NodeType};

/// Render the subtree at `id` as an indented outline, one node per line.
///
/// Elements print as `<tag attr="value">` (attributes sorted by name),
/// text as a quoted string with newlines escaped.
#[must_use]
pub fn format_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, 0, &mut out);
    out
}

/// Print the subtree at `id` to stdout.
pub fn print_tree(tree: &DomTree, id: NodeId) {
    print!("{}", format_tree(tree, id));
}

fn write_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let Some(node) = tree.get(id) else { return };
    let prefix = "  ".repeat(indent);

    match &node.node_type {
        NodeType::Element(data) => {
            let mut attrs: Vec<(&String, &String)> = data.attrs.iter().collect();
            attrs.sort();
            let _ = write!(out, "{prefix}<{}", data.tag_name);
            for (key, value) in attrs {
                if value.is_empty() {
                    let _ = write!(out, " {key}");
                } else {
                    let _ = write!(out, " {key}=\"{value}\"");
                }
            }
            out.push_str(">\n");
        }
        NodeType::Text(data) => {
            let _ = writeln!(out, "{prefix}\"{}\"", data.replace('\n', "\\n"));
        }
    }

    for &child_id in tree.children(id) {
        write_node(tree, child_id, indent + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_outline() {
        let tree = parse("<p class=x hidden>hi</p>");
        assert_eq!(
            format_tree(&tree, tree.root()),
            "<html>\n  <body>\n    <p class=\"x\" hidden>\n      \"hi\"\n"
        );
    }
}

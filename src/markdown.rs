//! Adapter from markdown text to the typed block model.
//!
//! Report bodies arrive as GitHub-flavored markdown; this walks the comrak
//! AST and flattens each top-level element into one `Block`. Nested markup
//! beyond what the block model expresses (tables inside lists, nested lists)
//! is flattened into the owning item's text.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};

use crate::model::Block;

fn parse_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.table = true;
    options.extension.strikethrough = true;
    options
}

/// Inline text of a node subtree, with soft/hard breaks collapsed to spaces.
fn collect_inline_text<'a>(node: &'a AstNode<'a>) -> String {
    fn walk<'a>(node: &'a AstNode<'a>, buffer: &mut String) {
        {
            let data = node.data.borrow();
            match &data.value {
                NodeValue::Text(text) => buffer.push_str(text),
                NodeValue::Code(code) => buffer.push_str(&code.literal),
                NodeValue::LineBreak | NodeValue::SoftBreak => buffer.push(' '),
                _ => {}
            }
        }
        for child in node.children() {
            walk(child, buffer);
        }
    }

    let mut text = String::new();
    for child in node.children() {
        walk(child, &mut text);
    }
    text
}

fn list_items<'a>(list: &'a AstNode<'a>) -> Vec<String> {
    list.children()
        .filter(|item| matches!(item.data.borrow().value, NodeValue::Item(_)))
        .map(collect_inline_text)
        .map(|s| s.trim().to_string())
        .collect()
}

fn table_block<'a>(table: &'a AstNode<'a>) -> Block {
    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<Vec<String>> = Vec::new();

    for row in table.children() {
        let is_header = match row.data.borrow().value {
            NodeValue::TableRow(header) => header,
            _ => continue,
        };
        let cells: Vec<String> = row
            .children()
            .map(|cell| collect_inline_text(cell).trim().to_string())
            .collect();
        if is_header && headers.is_empty() {
            headers = cells;
        } else {
            rows.push(cells);
        }
    }

    Block::Table { headers, rows }
}

/// Parse a markdown report body into its ordered block sequence.
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let arena = Arena::new();
    let options = parse_options();
    let root = parse_document(&arena, markdown, &options);

    let mut blocks = Vec::new();
    for node in root.children() {
        let value = &node.data.borrow().value;
        match value {
            NodeValue::Heading(heading) => {
                // Levels beyond 3 have no dedicated style and render as h3.
                blocks.push(Block::Heading {
                    level: heading.level.min(3),
                    text: collect_inline_text(node).trim().to_string(),
                });
            }
            NodeValue::Paragraph | NodeValue::BlockQuote => {
                blocks.push(Block::Paragraph(collect_inline_text(node).trim().to_string()));
            }
            NodeValue::CodeBlock(code) => {
                blocks.push(Block::Paragraph(code.literal.trim_end().to_string()));
            }
            NodeValue::List(list) => {
                blocks.push(Block::List {
                    ordered: list.list_type == ListType::Ordered,
                    items: list_items(node),
                });
            }
            NodeValue::Table(_) => blocks.push(table_block(node)),
            NodeValue::ThematicBreak => {}
            _ => {
                let text = collect_inline_text(node).trim().to_string();
                if !text.is_empty() {
                    blocks.push(Block::Paragraph(text));
                }
            }
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_and_paragraphs() {
        let blocks = parse_blocks("# Title\n\nFirst para.\n\n### Deep\n\n##### Deeper");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "Title".into()
                },
                Block::Paragraph("First para.".into()),
                Block::Heading {
                    level: 3,
                    text: "Deep".into()
                },
                Block::Heading {
                    level: 3,
                    text: "Deeper".into()
                },
            ]
        );
    }

    #[test]
    fn lists_keep_order_and_kind() {
        let blocks = parse_blocks("- alpha\n- beta\n\n1. one\n2. two\n");
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    ordered: false,
                    items: vec!["alpha".into(), "beta".into()]
                },
                Block::List {
                    ordered: true,
                    items: vec!["one".into(), "two".into()]
                },
            ]
        );
    }

    #[test]
    fn pipe_tables_split_header_and_rows() {
        let md = "| Vendor | Price |\n|---|---|\n| Acme | $10 |\n| Zenith | $12 |\n";
        let blocks = parse_blocks(md);
        assert_eq!(
            blocks,
            vec![Block::Table {
                headers: vec!["Vendor".into(), "Price".into()],
                rows: vec![
                    vec!["Acme".into(), "$10".into()],
                    vec!["Zenith".into(), "$12".into()],
                ],
            }]
        );
    }

    #[test]
    fn inline_markup_is_flattened() {
        let blocks = parse_blocks("Some **bold** and `code`\nwrapped line.");
        assert_eq!(
            blocks,
            vec![Block::Paragraph("Some bold and code wrapped line.".into())]
        );
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(parse_blocks("").is_empty());
        assert!(parse_blocks("\n\n   \n").is_empty());
    }
}

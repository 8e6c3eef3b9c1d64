//! Markup stripping: parsed tree to plain narratable text plus offset map.

use super::offset::OffsetMapping;
use super::{MarkupNode, NodeKind, SourceSpan, StrippedMarkup};

/// Two-character synthetic separator narrated as a paragraph pause.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Strip markup from a parsed tree, producing plain text and the offset
/// map from plain-text characters back to source characters.
///
/// Literal text is appended verbatim with one mapping entry per spanned
/// leaf. Synthetic text (paragraph separators, hard-break spaces) gets no
/// entry: it came from no source range. Code, images, and embedded foreign
/// content are never narrated.
pub fn strip(root: &MarkupNode, source: &str) -> StrippedMarkup {
    let mut state = StripState {
        plain: String::new(),
        plain_chars: 0,
        offset_map: Vec::new(),
        break_pending: false,
        source_chars: source.chars().count(),
    };

    walk(root, &mut state);

    StrippedMarkup {
        plain_text: state.plain,
        offset_map: state.offset_map,
    }
}

struct StripState {
    plain: String,
    /// Length of `plain` in characters (plain offsets are char offsets).
    plain_chars: usize,
    offset_map: Vec<OffsetMapping>,
    /// A block boundary was crossed; the separator is emitted only
    /// immediately before the next real text.
    break_pending: bool,
    source_chars: usize,
}

impl StripState {
    fn push_text(&mut self, content: &str, span: Option<&SourceSpan>) {
        if content.is_empty() {
            return;
        }

        if self.break_pending && self.plain_chars > 0 {
            self.plain.push_str(PARAGRAPH_SEPARATOR);
            self.plain_chars += PARAGRAPH_SEPARATOR.len();
        }
        self.break_pending = false;

        let char_len = content.chars().count();
        if let Some(span) = span {
            // Malformed spans are clamped rather than trusted.
            let source_start = span.start.min(self.source_chars);
            let source_end = span.end.clamp(source_start, self.source_chars);
            self.offset_map.push(OffsetMapping::new(
                self.plain_chars,
                self.plain_chars + char_len,
                source_start,
                source_end,
            ));
        }

        self.plain.push_str(content);
        self.plain_chars += char_len;
    }

    fn push_break_space(&mut self) {
        // Synthetic; suppressed at the document start and across block
        // boundaries, where the separator already provides the pause.
        if self.plain_chars == 0 || self.break_pending {
            return;
        }
        self.plain.push(' ');
        self.plain_chars += 1;
    }

    fn mark_block_boundary(&mut self) {
        if self.plain_chars > 0 {
            self.break_pending = true;
        }
    }
}

fn walk(node: &MarkupNode, state: &mut StripState) {
    match &node.kind {
        NodeKind::Text(content) => state.push_text(content, node.span.as_ref()),
        NodeKind::HardBreak => state.push_break_space(),
        NodeKind::Image
        | NodeKind::InlineCode(_)
        | NodeKind::CodeBlock(_)
        | NodeKind::ForeignBlock(_) => {}
        NodeKind::Document
        | NodeKind::Paragraph
        | NodeKind::Heading
        | NodeKind::ListItem
        | NodeKind::BlockQuote
        | NodeKind::TableRow
        | NodeKind::TableCell
        | NodeKind::ThematicBreak
        | NodeKind::List
        | NodeKind::Table
        | NodeKind::Emphasis
        | NodeKind::Strong
        | NodeKind::Strikethrough
        | NodeKind::Link => {
            let block = node.kind.is_block_level();
            if block {
                state.mark_block_boundary();
            }
            for child in &node.children {
                walk(child, state);
            }
            if block {
                state.mark_block_boundary();
            }
        }
    }
}

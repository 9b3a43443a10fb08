#![forbid(unsafe_code)]

//! Fixed-width text rendering of a node tree.
//!
//! Each grid unit becomes `unit_width` character cells, so a full row is
//! `24 * unit_width` cells wide. Columns wrap exactly as the grid would;
//! hidden columns are skipped; dividers take a full line. Widths are
//! measured with `unicode-width`, so CJK labels line up.

use crate::{Node, fit_text};
use formgrid_layout::GRID_COLUMNS;

const DEFAULT_UNIT_WIDTH: usize = 4;

/// Text preview of rendered nodes.
#[derive(Debug, Clone, Copy)]
pub struct TextPreview<'a> {
    nodes: &'a [Node],
    unit_width: usize,
}

impl<'a> TextPreview<'a> {
    #[must_use]
    pub fn new(nodes: &'a [Node]) -> Self {
        Self {
            nodes,
            unit_width: DEFAULT_UNIT_WIDTH,
        }
    }

    /// Character cells per grid unit (minimum 1).
    #[must_use]
    pub fn unit_width(mut self, unit_width: usize) -> Self {
        self.unit_width = unit_width.max(1);
        self
    }

    /// Total line width in cells.
    #[must_use]
    pub fn line_width(&self) -> usize {
        usize::from(GRID_COLUMNS) * self.unit_width
    }

    /// One string per output line, each exactly [`line_width`](Self::line_width) cells.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for node in self.nodes {
            self.render_block(node, &mut out);
        }
        out
    }

    /// Lines joined with `\n`, trailing spaces trimmed.
    #[must_use]
    pub fn render(&self) -> String {
        self.lines()
            .iter()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_block(&self, node: &Node, out: &mut Vec<String>) {
        match node {
            Node::Row { children, .. } => self.render_row(children, out),
            Node::Divider(divider) => out.push(divider.to_line(self.line_width())),
            Node::Fragment(children) => {
                for child in children {
                    self.render_block(child, out);
                }
            }
            other => out.push(fit_text(&inline_text(other), self.line_width())),
        }
    }

    fn render_row(&self, children: &[Node], out: &mut Vec<String>) {
        let full = usize::from(GRID_COLUMNS);
        let mut line = String::new();
        let mut used = 0usize;
        let uw = self.unit_width;

        for child in children {
            match child {
                Node::Col { hidden: true, .. } => {}
                Node::Col {
                    span,
                    offset,
                    children,
                    align_end,
                    ..
                } => {
                    let span = usize::from(*span).clamp(1, full);
                    let offset = usize::from(*offset).min(full - span);
                    if used + offset + span > full {
                        flush_line(&mut line, &mut used, uw, out);
                    }
                    line.extend(std::iter::repeat_n(' ', offset * self.unit_width));
                    let text = children
                        .iter()
                        .map(inline_text)
                        .collect::<Vec<_>>()
                        .join(" ");
                    line.push_str(&cell_text(&text, span * self.unit_width, *align_end));
                    used += offset + span;
                    if used == full {
                        flush_line(&mut line, &mut used, uw, out);
                    }
                }
                Node::Divider(divider) => {
                    flush_line(&mut line, &mut used, uw, out);
                    out.push(divider.to_line(self.line_width()));
                }
                other => {
                    flush_line(&mut line, &mut used, uw, out);
                    out.push(fit_text(&inline_text(other), self.line_width()));
                }
            }
        }
        flush_line(&mut line, &mut used, uw, out);
    }
}

/// Pad the pending line to full width and emit it. No-op when empty.
fn flush_line(line: &mut String, used: &mut usize, unit_width: usize, out: &mut Vec<String>) {
    if *used == 0 {
        return;
    }
    let pad = (usize::from(GRID_COLUMNS) - *used) * unit_width;
    line.extend(std::iter::repeat_n(' ', pad));
    out.push(std::mem::take(line));
    *used = 0;
}

/// Fit `text` into `width` cells with one trailing cell of spacing, left or
/// right aligned.
fn cell_text(text: &str, width: usize, align_end: bool) -> String {
    let inner = width.saturating_sub(1);
    let fitted = fit_text(text, inner);
    if !align_end {
        return format!("{fitted} ");
    }
    let content = fitted.trim_end();
    let content_width = unicode_width::UnicodeWidthStr::width(content);
    let mut out = String::with_capacity(width);
    out.extend(std::iter::repeat_n(' ', inner - content_width));
    out.push_str(content);
    out.push(' ');
    out
}

/// Single-line text for a leaf-ish node.
fn inline_text(node: &Node) -> String {
    match node {
        Node::Field { key, label, .. } => {
            format!("{}: ____", label.as_deref().unwrap_or(key))
        }
        Node::Group {
            title, children, ..
        } => {
            let inner: Vec<String> = children.iter().map(inline_text).collect();
            format!("{title} [{}]", inner.join(", "))
        }
        Node::Button { label, primary, .. } => {
            if *primary {
                format!("<{label}>")
            } else {
                format!("[{label}]")
            }
        }
        Node::Toggle { label, collapsed } => {
            format!("{label} {}", if *collapsed { 'v' } else { '^' })
        }
        Node::Text(text) => text.clone(),
        Node::Divider(_) => String::new(),
        Node::Row { children, .. } | Node::Col { children, .. } | Node::Fragment(children) => {
            children
                .iter()
                .map(inline_text)
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

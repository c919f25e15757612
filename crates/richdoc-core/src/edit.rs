//! Structural edits addressed by index path.
//!
//! A path lists child indices from the root: `[]` is the root itself, `[2, 0]`
//! is the first child of the root's third child. Every edit leaves its input
//! untouched and returns the edited copy.

use std::ops::Range;

use richdoc_color::ColorResolver;

use crate::ast::{Mark, Node};
use crate::{Result, RichDocError};

/// Borrow the node at `path`
pub fn node_at<'a>(root: &'a Node, path: &[usize]) -> Result<&'a Node> {
    path.iter().try_fold(root, |node, &index| {
        node.children()
            .get(index)
            .ok_or_else(|| invalid_path(path))
    })
}

fn node_at_mut<'a>(root: &'a mut Node, path: &[usize]) -> Result<&'a mut Node> {
    let mut node = root;
    for &index in path {
        node = node
            .children_mut()
            .and_then(|children| children.get_mut(index))
            .ok_or_else(|| invalid_path(path))?;
    }
    Ok(node)
}

fn invalid_path(path: &[usize]) -> RichDocError {
    RichDocError::InvalidPath(format!("{path:?}"))
}

fn unexpected(expected: &str, found: &Node) -> RichDocError {
    RichDocError::UnexpectedNode {
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}

fn empty_cell(header: bool) -> Node {
    let content = vec![Node::Paragraph(Vec::new())];
    if header {
        Node::TableHeader(content)
    } else {
        Node::TableCell(content)
    }
}

/// Insert an empty data row after `row_index`, with as many cells as that row
pub fn insert_row_after(root: &Node, table_path: &[usize], row_index: usize) -> Result<Node> {
    let mut doc = root.clone();
    let table = node_at_mut(&mut doc, table_path)?;

    let rows = match table {
        Node::Table(rows) => rows,
        other => return Err(unexpected("table", other)),
    };

    let width = rows
        .get(row_index)
        .map(|row| row.children().len())
        .ok_or(RichDocError::IndexOutOfRange {
            index: row_index,
            len: rows.len(),
        })?;

    let row = Node::TableRow((0..width).map(|_| empty_cell(false)).collect());
    rows.insert(row_index + 1, row);
    Ok(doc)
}

/// Insert an empty column after `column_index` in every row. Each new cell
/// copies the header/data kind of its left neighbour.
pub fn insert_column_after(root: &Node, table_path: &[usize], column_index: usize) -> Result<Node> {
    let mut doc = root.clone();
    let table = node_at_mut(&mut doc, table_path)?;

    let rows = match table {
        Node::Table(rows) => rows,
        other => return Err(unexpected("table", other)),
    };

    let widest = rows.iter().map(|row| row.children().len()).max().unwrap_or(0);
    if column_index >= widest {
        return Err(RichDocError::IndexOutOfRange {
            index: column_index,
            len: widest,
        });
    }

    for row in rows.iter_mut() {
        let Some(cells) = row.children_mut() else {
            continue;
        };
        let at = (column_index + 1).min(cells.len());
        let header = matches!(cells.get(at.saturating_sub(1)), Some(Node::TableHeader(_)));
        cells.insert(at, empty_cell(header));
    }

    Ok(doc)
}

/// Add `mark` to a text leaf, or remove it if a mark of the same type is
/// already present
pub fn toggle_mark(root: &Node, text_path: &[usize], mark: Mark) -> Result<Node> {
    let mut doc = root.clone();
    let node = node_at_mut(&mut doc, text_path)?;

    let marks = match node {
        Node::Text { marks, .. } => marks,
        other => return Err(unexpected("text", other)),
    };

    let before = marks.len();
    marks.retain(|existing| existing.type_name() != mark.type_name());
    if marks.len() == before {
        marks.push(mark);
    }
    Ok(doc)
}

/// Apply `mark` to the characters in `range` of a text leaf, splitting the
/// leaf so text outside the range keeps its original marks.
pub fn wrap_range(
    root: &Node,
    text_path: &[usize],
    range: Range<usize>,
    mark: Mark,
) -> Result<Node> {
    let (&index, parent_path) = text_path.split_last().ok_or_else(|| invalid_path(text_path))?;

    let mut doc = root.clone();
    let parent = node_at_mut(&mut doc, parent_path)?;
    let siblings = parent.children_mut().ok_or_else(|| invalid_path(text_path))?;
    let target = siblings.get(index).ok_or_else(|| invalid_path(text_path))?;

    let Node::Text { text, marks } = target else {
        return Err(unexpected("text", target));
    };

    let chars: Vec<char> = text.chars().collect();
    if range.start >= range.end || range.end > chars.len() {
        return Err(RichDocError::IndexOutOfRange {
            index: range.end,
            len: chars.len(),
        });
    }

    let slice = |r: Range<usize>| chars[r].iter().collect::<String>();
    let mut wrapped_marks = marks.clone();
    wrapped_marks.retain(|existing| existing.type_name() != mark.type_name());
    wrapped_marks.push(mark);

    let mut pieces = Vec::with_capacity(3);
    if range.start > 0 {
        pieces.push(Node::marked_text(&slice(0..range.start), marks.clone()));
    }
    pieces.push(Node::marked_text(&slice(range.clone()), wrapped_marks));
    if range.end < chars.len() {
        pieces.push(Node::marked_text(&slice(range.end..chars.len()), marks.clone()));
    }

    siblings.splice(index..=index, pieces);
    Ok(doc)
}

/// Set the foreground color of a text leaf. The color is made legible on both
/// reading themes before it is stored.
pub fn set_text_color(
    root: &Node,
    text_path: &[usize],
    color: &str,
    resolver: &ColorResolver,
) -> Result<Node> {
    replace_mark(
        root,
        text_path,
        Mark::TextStyle {
            color: Some(resolver.resolve(color)),
        },
    )
}

/// Set the highlight color of a text leaf, resolved like [`set_text_color`]
pub fn set_highlight(
    root: &Node,
    text_path: &[usize],
    color: &str,
    resolver: &ColorResolver,
) -> Result<Node> {
    replace_mark(
        root,
        text_path,
        Mark::Highlight {
            color: Some(resolver.resolve(color)),
        },
    )
}

fn replace_mark(root: &Node, text_path: &[usize], mark: Mark) -> Result<Node> {
    let mut doc = root.clone();
    let node = node_at_mut(&mut doc, text_path)?;

    let marks = match node {
        Node::Text { marks, .. } => marks,
        other => return Err(unexpected("text", other)),
    };

    match marks
        .iter_mut()
        .find(|existing| existing.type_name() == mark.type_name())
    {
        Some(existing) => *existing = mark,
        None => marks.push(mark),
    }
    Ok(doc)
}

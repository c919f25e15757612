//! Mark nesting order shared by every renderer.
//!
//! Marks are applied one at a time, each wrapping the result of the ones
//! before it: the first mark applied is the innermost wrapper. Both the view
//! and the Markdown serializer go through [`apply_marks`], so overlapping
//! marks nest the same way in every output.

use crate::ast::Mark;

/// How the marks of a text leaf are ordered before wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkOrder {
    /// Array order as authored; the first mark is innermost
    #[default]
    Authored,
    /// Fixed precedence regardless of authoring order
    Canonical,
}

/// Canonical precedence, innermost first
fn precedence(mark: &Mark) -> u8 {
    match mark {
        Mark::Code => 0,
        Mark::Bold => 1,
        Mark::Italic => 2,
        Mark::Strike => 3,
        Mark::Underline => 4,
        Mark::Subscript => 5,
        Mark::Superscript => 6,
        Mark::Highlight { .. } => 7,
        Mark::TextStyle { .. } => 8,
        Mark::Unknown { .. } => 9,
        Mark::Link { .. } => 10,
    }
}

/// Marks in wrapping order, innermost first
pub fn ordered_marks(marks: &[Mark], order: MarkOrder) -> Vec<&Mark> {
    let mut ordered: Vec<&Mark> = marks.iter().collect();
    if order == MarkOrder::Canonical {
        ordered.sort_by_key(|mark| precedence(mark));
    }
    ordered
}

/// Wrap `inner` with every mark, innermost first
pub fn apply_marks<T, F>(inner: T, marks: &[Mark], order: MarkOrder, mut wrap: F) -> T
where
    F: FnMut(&Mark, T) -> T,
{
    ordered_marks(marks, order)
        .into_iter()
        .fold(inner, |acc, mark| wrap(mark, acc))
}

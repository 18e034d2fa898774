// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{OMITTED_LINES_MARKER, WriterOutput};

/// Shortest run of unchanged rows worth compressing. Below this, the placeholder row
/// would hide at most one row, which isn't worth the lost context.
pub const MIN_COMPRESS_RUN: usize = 3;

/// Rendered rows, each with the 1-based number of the row it came from. A row that
/// stands in for omitted rows has no number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberedRows {
    pub rows: WriterOutput,
    pub line_numbers: Vec<Option<usize>>,
}

impl From<WriterOutput> for NumberedRows {
    fn from(rows: WriterOutput) -> Self {
        let line_numbers = (1..=rows.actual_lines.len()).map(Some).collect();
        Self { rows, line_numbers }
    }
}

impl NumberedRows {
    #[must_use]
    pub fn len(&self) -> usize { self.line_numbers.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.line_numbers.is_empty() }

    /// Row `index` is the same on both sides, and the middle row (if any) marks nothing.
    #[must_use]
    pub fn is_unchanged(&self, index: usize) -> bool {
        let WriterOutput {
            actual_lines,
            middle_lines,
            expected_lines,
        } = &self.rows;
        actual_lines.get(index) == expected_lines.get(index)
            && middle_lines.get(index).is_none_or(String::is_empty)
    }

    /// Collapse every maximal run of at least `min_run` unchanged rows (never less than
    /// [`MIN_COMPRESS_RUN`]) to its first row, one [`OMITTED_LINES_MARKER`] row, and its
    /// last row. The rows that are kept keep their line numbers.
    #[must_use]
    pub fn compress(self, min_run: usize) -> Self {
        let min_run = min_run.max(MIN_COMPRESS_RUN);
        let has_middle = !self.rows.middle_lines.is_empty();

        let mut acc = Self::default();
        let mut index = 0;
        while index < self.len() {
            if !self.is_unchanged(index) {
                acc.push_row_from(&self, index);
                index += 1;
                continue;
            }

            let start = index;
            while index < self.len() && self.is_unchanged(index) {
                index += 1;
            }
            let end = index;

            if end - start >= min_run {
                acc.push_row_from(&self, start);
                acc.push_placeholder(has_middle);
                acc.push_row_from(&self, end - 1);
            } else {
                for it in start..end {
                    acc.push_row_from(&self, it);
                }
            }
        }

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Compressed unchanged rows",
            before = %self.len(),
            after = %acc.len()
        );

        acc
    }

    fn push_row_from(&mut self, source: &Self, index: usize) {
        let WriterOutput {
            actual_lines,
            middle_lines,
            expected_lines,
        } = &source.rows;
        self.rows.actual_lines.push(actual_lines[index].clone());
        self.rows.expected_lines.push(expected_lines[index].clone());
        if let Some(middle) = middle_lines.get(index) {
            self.rows.middle_lines.push(middle.clone());
        }
        self.line_numbers.push(source.line_numbers[index]);
    }

    fn push_placeholder(&mut self, has_middle: bool) {
        self.rows.actual_lines.push(OMITTED_LINES_MARKER.to_string());
        self.rows.expected_lines.push(OMITTED_LINES_MARKER.to_string());
        if has_middle {
            self.rows.middle_lines.push(OMITTED_LINES_MARKER.to_string());
        }
        self.line_numbers.push(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(actual: &[&str], expected: &[&str]) -> NumberedRows {
        let to_vec = |it: &[&str]| it.iter().map(ToString::to_string).collect::<Vec<_>>();
        NumberedRows::from(WriterOutput {
            actual_lines: to_vec(actual),
            middle_lines: vec![],
            expected_lines: to_vec(expected),
        })
    }

    #[test]
    fn numbers_start_at_one() {
        let it = rows(&["a", "b"], &["a", "c"]);
        assert_eq!(it.line_numbers, vec![Some(1), Some(2)]);
        assert!(it.is_unchanged(0));
        assert!(!it.is_unchanged(1));
    }

    #[test]
    fn five_unchanged_rows_between_changes() {
        let it = rows(
            &["x", "1", "2", "3", "4", "5", "y"],
            &["X", "1", "2", "3", "4", "5", "Y"],
        )
        .compress(MIN_COMPRESS_RUN);

        assert_eq!(it.rows.actual_lines, vec!["x", "1", "[...]", "5", "y"]);
        assert_eq!(it.rows.expected_lines, vec!["X", "1", "[...]", "5", "Y"]);
        assert_eq!(
            it.line_numbers,
            vec![Some(1), Some(2), None, Some(6), Some(7)]
        );
    }

    #[test]
    fn short_runs_are_untouched() {
        let before = rows(&["1", "2", "x", "4", "5"], &["1", "2", "y", "4", "5"]);
        let after = before.clone().compress(MIN_COMPRESS_RUN);
        assert_eq!(after, before);
    }

    #[test]
    fn run_of_exactly_three_hides_one_row() {
        let it = rows(&["1", "2", "3"], &["1", "2", "3"]).compress(3);
        assert_eq!(it.rows.actual_lines, vec!["1", "[...]", "3"]);
        assert_eq!(it.line_numbers, vec![Some(1), None, Some(3)]);
    }

    #[test]
    fn min_run_is_never_below_three() {
        let before = rows(&["1", "2"], &["1", "2"]);
        assert_eq!(before.clone().compress(0), before);
    }

    #[test]
    fn larger_min_run() {
        let before = rows(&["1", "2", "3", "4"], &["1", "2", "3", "4"]);
        assert_eq!(before.clone().compress(5), before);
        assert_eq!(before.compress(4).len(), 3);
    }

    #[test]
    fn middle_rows_follow_along() {
        let it = NumberedRows::from(WriterOutput {
            actual_lines: vec!["a".into(), "b".into(), "c".into(), "d/".into()],
            middle_lines: vec![String::new(), String::new(), String::new(), " +".into()],
            expected_lines: vec!["a".into(), "b".into(), "c".into(), "d/e".into()],
        })
        .compress(3);

        assert_eq!(it.rows.middle_lines, vec!["", "[...]", "", " +"]);
        assert_eq!(it.line_numbers, vec![Some(1), None, Some(3), Some(4)]);
    }

    #[test]
    fn marked_middle_row_is_a_change() {
        let it = NumberedRows::from(WriterOutput {
            actual_lines: vec!["a".into()],
            middle_lines: vec!["-".into()],
            expected_lines: vec!["a".into()],
        });
        assert!(!it.is_unchanged(0));
    }
}

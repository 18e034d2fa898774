// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{NumberedRows, OMITTED_LINES_MARKER, WriterOutput};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// The rendered difference between an actual and an expected value. Immutable once
/// built.
///
/// - [`Self::actual_lines`] and [`Self::expected_lines`] have the same length, and at
///   every index their visible (decoration stripped) widths are equal.
/// - [`Self::middle_lines`] is either empty (color encodings) or just as long, marking
///   deleted columns with `-` and inserted ones with `+`.
/// - [`Self::line_numbers`] holds the 1-based row number of each row, or [`None`] for a
///   row that stands in for omitted unchanged rows.
///
/// The [`Display`] impl lays the rows out for an assertion failure message:
///
/// ```text
/// Actual@1  : a/\n
/// Diff@1    :  +
/// Expected@1: ab\n
/// [...]
/// Actual@9  : z\0
/// Expected@9: z\0
/// ```
///
/// A single row result drops the `@N` suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    actual_lines: Vec<String>,
    middle_lines: Vec<String>,
    expected_lines: Vec<String>,
    line_numbers: Vec<Option<usize>>,
    padding_marker: String,
}

impl DiffResult {
    pub(crate) fn new(numbered_rows: NumberedRows, padding_marker: char) -> Self {
        let NumberedRows {
            rows:
                WriterOutput {
                    actual_lines,
                    middle_lines,
                    expected_lines,
                },
            line_numbers,
        } = numbered_rows;

        Self {
            actual_lines,
            middle_lines,
            expected_lines,
            line_numbers,
            padding_marker: padding_marker.to_string(),
        }
    }

    #[must_use]
    pub fn actual_lines(&self) -> &[String] { &self.actual_lines }

    #[must_use]
    pub fn middle_lines(&self) -> &[String] { &self.middle_lines }

    #[must_use]
    pub fn expected_lines(&self) -> &[String] { &self.expected_lines }

    #[must_use]
    pub fn line_numbers(&self) -> &[Option<usize>] { &self.line_numbers }

    /// The character that fills the columns of text missing on one side.
    #[must_use]
    pub fn padding_marker(&self) -> &str { &self.padding_marker }

    /// Number of rows, including placeholder rows.
    #[must_use]
    pub fn len(&self) -> usize { self.actual_lines.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.actual_lines.is_empty() }

    /// `true` if no row differs between the two sides.
    #[must_use]
    pub fn is_identical(&self) -> bool {
        let same_rows = self.actual_lines == self.expected_lines;
        let nothing_marked = self
            .middle_lines
            .iter()
            .all(|it| it.is_empty() || it == OMITTED_LINES_MARKER);
        same_rows && nothing_marked
    }
}

impl Display for DiffResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let single_row = self.len() == 1;

        for (index, line_number) in self.line_numbers.iter().enumerate() {
            let Some(line_number) = line_number else {
                writeln!(f, "{OMITTED_LINES_MARKER}")?;
                continue;
            };

            let suffix = if single_row {
                String::new()
            } else {
                format!("@{line_number}")
            };
            let actual_label = format!("Actual{suffix}");
            let diff_label = format!("Diff{suffix}");
            let expected_label = format!("Expected{suffix}");
            let width = expected_label.len();

            writeln!(f, "{actual_label:<width$}: {}", self.actual_lines[index])?;
            if let Some(middle) = self.middle_lines.get(index)
                && !middle.is_empty()
            {
                writeln!(f, "{diff_label:<width$}: {middle}")?;
            }
            writeln!(f, "{expected_label:<width$}: {}", self.expected_lines[index])?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn result(
        actual: &[&str],
        middle: &[&str],
        expected: &[&str],
        line_numbers: &[Option<usize>],
    ) -> DiffResult {
        let to_vec = |it: &[&str]| it.iter().map(ToString::to_string).collect::<Vec<_>>();
        DiffResult::new(
            NumberedRows {
                rows: WriterOutput {
                    actual_lines: to_vec(actual),
                    middle_lines: to_vec(middle),
                    expected_lines: to_vec(expected),
                },
                line_numbers: line_numbers.to_vec(),
            },
            ' ',
        )
    }

    #[test]
    fn single_row_layout() {
        let it = result(&["int[6 ]"], &["    -+"], &["int[ 5]"], &[Some(1)]);
        assert_eq!(
            it.to_string(),
            "Actual  : int[6 ]\nDiff    :     -+\nExpected: int[ 5]\n"
        );
        assert!(!it.is_identical());
        assert_eq!(it.padding_marker(), " ");
    }

    #[test]
    fn numbered_rows_and_placeholder() {
        let it = result(
            &["a\\n", "[...]", "z"],
            &["", "[...]", ""],
            &["a\\n", "[...]", "z"],
            &[Some(1), None, Some(9)],
        );
        assert_eq!(
            it.to_string(),
            "Actual@1  : a\\n\nExpected@1: a\\n\n[...]\nActual@9  : z\nExpected@9: z\n"
        );
        assert!(it.is_identical());
        assert_eq!(it.len(), 3);
        assert_eq!(it.line_numbers(), [Some(1), None, Some(9)]);
    }

    #[test]
    fn colored_result_has_no_diff_row() {
        let it = result(&["x"], &[], &["y"], &[Some(1)]);
        assert_eq!(it.to_string(), "Actual  : x\nExpected: y\n");
        assert!(!it.is_identical());
        assert!(it.middle_lines().is_empty());
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DecoratorSet, DiffError, DiffRenderResult, NEWLINE_MARKER, TextRole,
            display_width, make_visible, validate_padding_marker};
use std::mem;

/// Marks deleted columns in the middle row.
pub const MIDDLE_DELETED: char = '-';
/// Marks inserted columns in the middle row.
pub const MIDDLE_INSERTED: char = '+';

/// The row being assembled. Emptied (keeping the allocation) every time a row is
/// flushed.
#[derive(Debug, Default)]
pub struct LineBuffers {
    pub actual: String,
    pub expected: String,
    /// Only filled in when the decorator set is plain.
    pub middle: String,
}

impl LineBuffers {
    pub fn clear(&mut self) {
        self.actual.clear();
        self.expected.clear();
        self.middle.clear();
    }
}

/// Rows produced by a closed [`LineWriter`]. `middle_lines` is either empty or exactly
/// as long as `actual_lines`, and `actual_lines` is as long as `expected_lines`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterOutput {
    pub actual_lines: Vec<String>,
    pub middle_lines: Vec<String>,
    pub expected_lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Both,
    ExpectedOnly,
    ActualOnly,
}

/// Turns a stream of keep / insert / delete calls into parallel rows of actual and
/// expected text that stay column aligned.
///
/// - Text only present on one side is matched by the same number of columns of the
///   padding marker on the other side.
/// - A `\n` in the text is written as the visible [`NEWLINE_MARKER`] and then ends the
///   row.
/// - With a plain decorator set, a middle row marks deleted columns with `-` and
///   inserted columns with `+`.
///
/// The writer is `Open` until [`LineWriter::close`], after which every call returns
/// [`DiffError::WriterClosed`].
///
/// ```
/// use r3bl_diff_render::{DecoratorSet, LineWriter, TerminalEncoding};
///
/// let mut writer =
///     LineWriter::new(DecoratorSet::for_encoding(TerminalEncoding::NoColor), '/').unwrap();
/// writer.keep("int[").unwrap();
/// writer.delete("6").unwrap();
/// writer.insert("5").unwrap();
/// writer.keep("]").unwrap();
///
/// let output = writer.close().unwrap();
/// assert_eq!(output.actual_lines, ["int[6/]"]);
/// assert_eq!(output.middle_lines, ["    -+"]);
/// assert_eq!(output.expected_lines, ["int[/5]"]);
/// ```
#[derive(Debug)]
pub struct LineWriter {
    decorators: DecoratorSet,
    padding_marker: char,
    state: WriterState,
    buffers: LineBuffers,
    /// Scratch space for runs of the padding marker.
    padding: String,
    output: WriterOutput,
}

impl LineWriter {
    /// # Errors
    ///
    /// Returns [`DiffError::InvalidPaddingMarker`] if `padding_marker` isn't a printable
    /// character one column wide.
    pub fn new(decorators: DecoratorSet, padding_marker: char) -> DiffRenderResult<Self> {
        Ok(Self {
            decorators,
            padding_marker: validate_padding_marker(padding_marker)?,
            state: WriterState::Open,
            buffers: LineBuffers::default(),
            padding: String::new(),
            output: WriterOutput::default(),
        })
    }

    #[must_use]
    pub fn is_closed(&self) -> bool { self.state == WriterState::Closed }

    /// Text present in both values.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::WriterClosed`] if the writer has been closed.
    pub fn keep(&mut self, text: &str) -> DiffRenderResult<()> {
        self.write(Side::Both, text)
    }

    /// Text only present in the expected value.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::WriterClosed`] if the writer has been closed.
    pub fn insert(&mut self, text: &str) -> DiffRenderResult<()> {
        self.write(Side::ExpectedOnly, text)
    }

    /// Text only present in the actual value.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::WriterClosed`] if the writer has been closed.
    pub fn delete(&mut self, text: &str) -> DiffRenderResult<()> {
        self.write(Side::ActualOnly, text)
    }

    /// Flush the last row and hand over everything that was written. Closing a writer
    /// that was never written to yields one empty row.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::WriterClosed`] if the writer has already been closed.
    pub fn close(&mut self) -> DiffRenderResult<WriterOutput> {
        self.ensure_open()?;
        self.flush_line();
        self.state = WriterState::Closed;
        Ok(mem::take(&mut self.output))
    }

    fn ensure_open(&self) -> DiffRenderResult<()> {
        match self.state {
            WriterState::Open => Ok(()),
            WriterState::Closed => Err(DiffError::WriterClosed),
        }
    }

    fn write(&mut self, side: Side, text: &str) -> DiffRenderResult<()> {
        self.ensure_open()?;

        let mut segments = text.split('\n').peekable();
        while let Some(segment) = segments.next() {
            let visible = make_visible(segment);
            if segments.peek().is_none() {
                self.append(side, &visible);
            } else {
                let mut line = visible.into_owned();
                line.push_str(NEWLINE_MARKER);
                self.append(side, &line);
                self.flush_line();
            }
        }

        Ok(())
    }

    /// `text` has no control characters at this point.
    fn append(&mut self, side: Side, text: &str) {
        if text.is_empty() {
            return;
        }

        let width = display_width(text);
        let track_middle = self.decorators.is_plain();

        match side {
            Side::Both => {
                let it = &self.decorators;
                it.decorate_into(TextRole::Unchanged, text, &mut self.buffers.actual);
                it.decorate_into(TextRole::Unchanged, text, &mut self.buffers.expected);
                if track_middle {
                    push_repeated(&mut self.buffers.middle, ' ', width);
                }
            }
            Side::ExpectedOnly => {
                self.fill_padding(width);
                let it = &self.decorators;
                it.decorate_into(TextRole::Inserted, text, &mut self.buffers.expected);
                it.decorate_into(TextRole::Padding, &self.padding, &mut self.buffers.actual);
                if track_middle {
                    push_repeated(&mut self.buffers.middle, MIDDLE_INSERTED, width);
                }
            }
            Side::ActualOnly => {
                self.fill_padding(width);
                let it = &self.decorators;
                it.decorate_into(TextRole::Deleted, text, &mut self.buffers.actual);
                it.decorate_into(TextRole::Padding, &self.padding, &mut self.buffers.expected);
                if track_middle {
                    push_repeated(&mut self.buffers.middle, MIDDLE_DELETED, width);
                }
            }
        }
    }

    fn fill_padding(&mut self, width: usize) {
        self.padding.clear();
        push_repeated(&mut self.padding, self.padding_marker, width);
    }

    /// Push the buffers as the next row, then clear them.
    fn flush_line(&mut self) {
        self.output.actual_lines.push(self.buffers.actual.clone());
        self.output.expected_lines.push(self.buffers.expected.clone());
        if self.decorators.is_plain() {
            self.output
                .middle_lines
                .push(self.buffers.middle.trim_end().to_string());
        }
        self.buffers.clear();
    }
}

fn push_repeated(acc: &mut String, ch: char, count: usize) {
    acc.extend(std::iter::repeat_n(ch, count));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TerminalEncoding;
    use pretty_assertions::assert_eq;

    fn plain_writer(padding_marker: char) -> LineWriter {
        LineWriter::new(
            DecoratorSet::for_encoding(TerminalEncoding::NoColor),
            padding_marker,
        )
        .unwrap()
    }

    #[test]
    fn single_char_substitution() {
        let mut writer = plain_writer(' ');
        writer.keep("int[").unwrap();
        writer.delete("6").unwrap();
        writer.insert("5").unwrap();
        writer.keep("]").unwrap();
        let output = writer.close().unwrap();

        assert_eq!(output.actual_lines, vec!["int[6 ]"]);
        assert_eq!(output.middle_lines, vec!["    -+"]);
        assert_eq!(output.expected_lines, vec!["int[ 5]"]);
    }

    #[test]
    fn newline_ends_the_row() {
        let mut writer = plain_writer('/');
        writer.keep("a\nb").unwrap();
        writer.insert("c\n").unwrap();
        writer.keep("d").unwrap();
        let output = writer.close().unwrap();

        assert_eq!(output.actual_lines, vec!["a\\n", "b///", "d"]);
        assert_eq!(output.expected_lines, vec!["a\\n", "bc\\n", "d"]);
        assert_eq!(output.middle_lines, vec!["", " +++", ""]);
    }

    #[test]
    fn trailing_newline_leaves_an_empty_last_segment() {
        let mut writer = plain_writer(' ');
        writer.keep("x\n").unwrap();
        let output = writer.close().unwrap();
        assert_eq!(output.actual_lines, vec!["x\\n", ""]);
        assert_eq!(output.expected_lines, vec!["x\\n", ""]);
    }

    #[test]
    fn close_without_writes_yields_one_empty_row() {
        let mut writer = plain_writer(' ');
        let output = writer.close().unwrap();
        assert_eq!(output.actual_lines, vec![""]);
        assert_eq!(output.expected_lines, vec![""]);
        assert_eq!(output.middle_lines, vec![""]);
    }

    #[test]
    fn write_after_close_is_an_error() {
        let mut writer = plain_writer(' ');
        writer.keep("a").unwrap();
        writer.close().unwrap();
        assert!(writer.is_closed());
        assert_eq!(writer.keep("b"), Err(DiffError::WriterClosed));
        assert_eq!(writer.insert("b"), Err(DiffError::WriterClosed));
        assert_eq!(writer.delete("b"), Err(DiffError::WriterClosed));
    }

    #[test]
    fn second_close_is_an_error() {
        let mut writer = plain_writer(' ');
        writer.close().unwrap();
        assert_eq!(writer.close(), Err(DiffError::WriterClosed));
    }

    #[test]
    fn invalid_padding_marker_is_rejected() {
        let result = LineWriter::new(
            DecoratorSet::for_encoding(TerminalEncoding::NoColor),
            '\t',
        );
        assert!(matches!(
            result,
            Err(DiffError::InvalidPaddingMarker { marker: '\t' })
        ));
    }

    #[test]
    fn control_chars_are_padded_by_their_visible_width() {
        let mut writer = plain_writer('/');
        writer.delete("\t").unwrap();
        let output = writer.close().unwrap();
        assert_eq!(output.actual_lines, vec!["\\t"]);
        assert_eq!(output.expected_lines, vec!["//"]);
    }

    #[test]
    fn wide_chars_are_padded_by_columns() {
        let mut writer = plain_writer('/');
        writer.insert("日本").unwrap();
        let output = writer.close().unwrap();
        assert_eq!(output.actual_lines, vec!["////"]);
        assert_eq!(output.expected_lines, vec!["日本"]);
        assert_eq!(output.middle_lines, vec!["++++"]);
    }

    #[test]
    fn colored_rows_have_no_middle_and_stay_aligned() {
        let mut writer = LineWriter::new(
            DecoratorSet::for_encoding(TerminalEncoding::TrueColor),
            ' ',
        )
        .unwrap();
        writer.keep("int[").unwrap();
        writer.delete("6").unwrap();
        writer.insert("5").unwrap();
        writer.keep("]").unwrap();
        let output = writer.close().unwrap();

        assert!(output.middle_lines.is_empty());
        assert_eq!(
            strip_ansi_escapes::strip_str(&output.actual_lines[0]),
            "int[6 ]"
        );
        assert_eq!(
            strip_ansi_escapes::strip_str(&output.expected_lines[0]),
            "int[ 5]"
        );
        assert_ne!(output.actual_lines[0], "int[6 ]");
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DecoratorSet, DiffError, DiffOperation, DiffRenderResult, DiffResult,
            EOS_MARKER, EditScript, LineWriter, MIN_COMPRESS_RUN, NumberedRows,
            SimilarEditScript, TerminalEncoding, global_terminal_encoding,
            validate_padding_marker};
use std::{borrow::Cow, time::Duration};

/// Knobs for a [`DiffGenerator`]. Build it fluently from [`DiffConfig::default`].
///
/// ```
/// use r3bl_diff_render::DiffConfig;
///
/// let config = DiffConfig::default().padding_marker('/').compress_unchanged(false);
/// assert_eq!(config.get_padding_marker(), '/');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffConfig {
    padding_marker: char,
    compress_unchanged: bool,
    min_compress_run: usize,
    edit_script_timeout: Option<Duration>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            padding_marker: ' ',
            compress_unchanged: true,
            min_compress_run: MIN_COMPRESS_RUN,
            edit_script_timeout: None,
        }
    }
}

impl DiffConfig {
    /// Fills the columns of text that only one side has. Must be printable and one
    /// column wide.
    #[must_use]
    pub fn padding_marker(mut self, marker: char) -> Self {
        self.padding_marker = marker;
        self
    }

    /// Collapse long runs of unchanged rows to `[...]`.
    #[must_use]
    pub fn compress_unchanged(mut self, enabled: bool) -> Self {
        self.compress_unchanged = enabled;
        self
    }

    /// Shortest run of unchanged rows that gets collapsed. Values below 3 count as 3.
    #[must_use]
    pub fn min_compress_run(mut self, min_run: usize) -> Self {
        self.min_compress_run = min_run;
        self
    }

    /// Bound the time spent looking for the tidiest edit script.
    #[must_use]
    pub fn edit_script_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.edit_script_timeout = timeout;
        self
    }

    #[must_use]
    pub fn get_padding_marker(&self) -> char { self.padding_marker }

    #[must_use]
    pub fn get_compress_unchanged(&self) -> bool { self.compress_unchanged }

    #[must_use]
    pub fn get_min_compress_run(&self) -> usize { self.min_compress_run }

    #[must_use]
    pub fn get_edit_script_timeout(&self) -> Option<Duration> { self.edit_script_timeout }
}

/// Renders [`DiffResult`]s for one [`TerminalEncoding`]. The encoding is passed in
/// rather than looked up, so this has no hidden dependency on process wide state; use
/// [`diff()`] for that.
///
/// ```
/// use r3bl_diff_render::{DiffGenerator, TerminalEncoding};
///
/// let result = DiffGenerator::new(TerminalEncoding::NoColor)
///     .diff("1\n2\n3\n4\n5", "1\n2\n9\n4\n5")
///     .unwrap();
/// assert_eq!(result.actual_lines(), ["1\\n", "2\\n", "3 \\n", "4\\n", "5\\0"]);
/// assert_eq!(result.expected_lines(), ["1\\n", "2\\n", " 9\\n", "4\\n", "5\\0"]);
/// ```
#[derive(Debug, Clone)]
pub struct DiffGenerator<S: EditScript = SimilarEditScript> {
    encoding: TerminalEncoding,
    config: DiffConfig,
    edit_script: S,
}

impl DiffGenerator<SimilarEditScript> {
    #[must_use]
    pub fn new(encoding: TerminalEncoding) -> Self {
        Self::with_config(encoding, DiffConfig::default())
    }

    #[must_use]
    pub fn with_config(encoding: TerminalEncoding, config: DiffConfig) -> Self {
        Self {
            encoding,
            config,
            edit_script: SimilarEditScript::with_timeout(config.edit_script_timeout),
        }
    }
}

impl<S: EditScript> DiffGenerator<S> {
    /// Swap in a different diff algorithm.
    #[must_use]
    pub fn with_edit_script<T: EditScript>(self, edit_script: T) -> DiffGenerator<T> {
        DiffGenerator {
            encoding: self.encoding,
            config: self.config,
            edit_script,
        }
    }

    #[must_use]
    pub fn encoding(&self) -> TerminalEncoding { self.encoding }

    #[must_use]
    pub fn config(&self) -> &DiffConfig { &self.config }

    /// Render the difference between `actual` and `expected`.
    ///
    /// 1. If either value contains a `\n`, [`EOS_MARKER`] is appended to both, so the
    ///    end of each value is visible.
    /// 2. The edit script is computed.
    /// 3. It is replayed into a [`LineWriter`] decorated for the encoding.
    /// 4. Long unchanged runs are compressed (unless disabled).
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::InvalidPaddingMarker`] if the configured padding marker
    /// can't be used. Nothing is rendered in that case.
    pub fn diff(&self, actual: &str, expected: &str) -> DiffRenderResult<DiffResult> {
        let padding_marker = validate_padding_marker(self.config.padding_marker)?;

        let (actual, expected) = append_eos_marker(actual, expected);
        let operations = self.edit_script.compute(&actual, &expected);

        let mut writer =
            LineWriter::new(DecoratorSet::for_encoding(self.encoding), padding_marker)?;
        for operation in &operations {
            match operation {
                DiffOperation::Keep(text) => writer.keep(text)?,
                DiffOperation::Insert(text) => writer.insert(text)?,
                DiffOperation::Delete(text) => writer.delete(text)?,
            }
        }
        let numbered_rows = NumberedRows::from(writer.close()?);

        let numbered_rows = if self.config.compress_unchanged {
            numbered_rows.compress(self.config.min_compress_run)
        } else {
            numbered_rows
        };

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Rendered diff",
            encoding = %self.encoding,
            operations = %operations.len(),
            rows = %numbered_rows.len()
        );

        Ok(DiffResult::new(numbered_rows, padding_marker))
    }

    /// Same as [`Self::diff`], for callers whose values may be missing.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::NullArgument`] naming the missing value, before anything
    /// else is done.
    pub fn diff_optional(
        &self,
        actual: Option<&str>,
        expected: Option<&str>,
    ) -> DiffRenderResult<DiffResult> {
        let actual = actual.ok_or(DiffError::NullArgument { name: "actual" })?;
        let expected = expected.ok_or(DiffError::NullArgument { name: "expected" })?;
        self.diff(actual, expected)
    }
}

/// Render the difference between `actual` and `expected` with the process wide
/// encoding (see [`global_terminal_encoding::resolve`]) and the default
/// [`DiffConfig`].
///
/// # Errors
///
/// Propagates capability detection errors from the first resolution of the encoding.
pub fn diff(actual: &str, expected: &str) -> DiffRenderResult<DiffResult> {
    let encoding = global_terminal_encoding::resolve()?;
    DiffGenerator::new(encoding).diff(actual, expected)
}

fn append_eos_marker<'a>(actual: &'a str, expected: &'a str) -> (Cow<'a, str>, Cow<'a, str>) {
    if actual.contains('\n') || expected.contains('\n') {
        (
            Cow::Owned(format!("{actual}{EOS_MARKER}")),
            Cow::Owned(format!("{expected}{EOS_MARKER}")),
        )
    } else {
        (Cow::Borrowed(actual), Cow::Borrowed(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    #[test]
    fn single_line_substitution() {
        let result = DiffGenerator::new(TerminalEncoding::NoColor)
            .diff("int[6]", "int[5]")
            .unwrap();
        assert_eq!(result.actual_lines(), ["int[6 ]"]);
        assert_eq!(result.middle_lines(), ["    -+"]);
        assert_eq!(result.expected_lines(), ["int[ 5]"]);
        assert_eq!(result.line_numbers(), [Some(1)]);
    }

    #[test]
    fn eos_marker_only_for_multi_line_values() {
        let it = append_eos_marker("a", "b");
        assert_eq!(it, (Cow::Borrowed("a"), Cow::Borrowed("b")));

        let it = append_eos_marker("a\n", "b");
        assert_eq!(it.0, "a\n\\0");
        assert_eq!(it.1, "b\\0");
    }

    #[test]
    fn trailing_newline_difference_is_visible() {
        let result = DiffGenerator::new(TerminalEncoding::NoColor)
            .diff("a\n", "a")
            .unwrap();
        assert!(!result.is_identical());
        assert_eq!(result.actual_lines(), ["a\\n", "\\0"]);
        assert_eq!(result.expected_lines(), ["a  ", "\\0"]);
    }

    #[test]
    fn compression_can_be_turned_off() {
        let actual = "x\n1\n2\n3\n4\n5\ny";
        let expected = "X\n1\n2\n3\n4\n5\nY";

        let compressed = DiffGenerator::new(TerminalEncoding::NoColor)
            .diff(actual, expected)
            .unwrap();
        assert_eq!(compressed.len(), 5);

        let config = DiffConfig::default().compress_unchanged(false);
        let uncompressed = DiffGenerator::with_config(TerminalEncoding::NoColor, config)
            .diff(actual, expected)
            .unwrap();
        assert_eq!(uncompressed.len(), 7);
        assert!(uncompressed.line_numbers().iter().all(Option::is_some));
    }

    #[test]
    fn combining_accent_is_marked_as_a_change() {
        let result = DiffGenerator::new(TerminalEncoding::NoColor)
            .diff("e", "e\u{301}")
            .unwrap();
        assert_eq!(result.actual_lines(), ["e "]);
        assert_eq!(result.expected_lines(), [" e\u{301}"]);
        assert_eq!(result.middle_lines(), ["-+"]);
    }

    #[test]
    fn emoji_sequences_stay_aligned() {
        let generator = DiffGenerator::new(TerminalEncoding::NoColor);
        for (actual, expected) in [
            ("\u{2764}", "\u{2764}\u{FE0F}"),
            ("\u{1F468}", "\u{1F468}\u{200D}\u{1F469}"),
        ] {
            let result = generator.diff(actual, expected).unwrap();
            let actual_line = &result.actual_lines()[0];
            let expected_line = &result.expected_lines()[0];
            assert_eq!(
                crate::display_width(actual_line),
                crate::display_width(expected_line)
            );
            assert!(result.middle_lines()[0].starts_with('-'));
            assert!(result.middle_lines()[0].ends_with('+'));
        }
    }

    #[test]
    fn null_arguments_are_rejected() {
        let generator = DiffGenerator::new(TerminalEncoding::NoColor);
        assert_eq!(
            generator.diff_optional(None, Some("x")),
            Err(DiffError::NullArgument { name: "actual" })
        );
        assert_eq!(
            generator.diff_optional(Some("x"), None),
            Err(DiffError::NullArgument { name: "expected" })
        );
        assert!(generator.diff_optional(Some("x"), Some("x")).is_ok());
    }

    #[test]
    fn invalid_padding_marker_is_rejected() {
        let config = DiffConfig::default().padding_marker('\n');
        assert_eq!(
            DiffGenerator::with_config(TerminalEncoding::NoColor, config).diff("a", "b"),
            Err(DiffError::InvalidPaddingMarker { marker: '\n' })
        );
    }

    #[test]
    fn custom_edit_script() {
        struct ReplaceEverything;
        impl EditScript for ReplaceEverything {
            fn compute(&self, actual: &str, expected: &str) -> Vec<DiffOperation> {
                vec![
                    DiffOperation::Delete(actual.to_string()),
                    DiffOperation::Insert(expected.to_string()),
                ]
            }
        }

        let result = DiffGenerator::new(TerminalEncoding::NoColor)
            .with_edit_script(ReplaceEverything)
            .diff("ab", "ac")
            .unwrap();
        assert_eq!(result.actual_lines(), ["ab  "]);
        assert_eq!(result.expected_lines(), ["  ac"]);
        assert_eq!(result.middle_lines(), ["--++"]);
    }

    #[test]
    fn colors_follow_the_encoding() {
        let result = DiffGenerator::new(TerminalEncoding::FullColor)
            .diff("int[6]", "int[5]")
            .unwrap();
        assert!(result.middle_lines().is_empty());
        assert!(result.actual_lines()[0].contains("\x1b[48;5;124m6\x1b[0m"));
        assert!(result.expected_lines()[0].contains("\x1b[48;5;28m5\x1b[0m"));
    }

    #[test]
    #[serial]
    fn free_function_uses_the_global_encoding() {
        global_terminal_encoding::set_encoding(TerminalEncoding::NoColor, true).unwrap();
        let result = diff("int[6]", "int[5]").unwrap();
        assert_eq!(result.actual_lines(), ["int[6 ]"]);
        assert_eq!(result.middle_lines(), ["    -+"]);
        global_terminal_encoding::clear();
    }
}

// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The edit script: the ordered keep / insert / delete operations that turn the actual
//! value into the expected one. The diff algorithm itself lives behind the
//! [`EditScript`] trait; [`SimilarEditScript`] is the default.

use similar::{Algorithm, ChangeTag, TextDiff};
use std::time::Duration;
use unicode_segmentation::UnicodeSegmentation;

/// One step of an edit script. Text may span several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOperation {
    /// Present in both values.
    Keep(String),
    /// Only present in the expected value.
    Insert(String),
    /// Only present in the actual value.
    Delete(String),
}

impl DiffOperation {
    #[must_use]
    pub fn is_keep(&self) -> bool { matches!(self, DiffOperation::Keep(_)) }
}

/// Computes the edit script from `actual` to `expected`. Applying the `Keep` and
/// `Delete` texts in order must reproduce `actual`, and the `Keep` and `Insert` texts
/// must reproduce `expected`.
pub trait EditScript {
    fn compute(&self, actual: &str, expected: &str) -> Vec<DiffOperation>;
}

/// Grapheme cluster level Myers diff from the [`similar`] crate, followed by
/// [`cleanup_semantic`]. A cluster (`e` plus a combining accent, an emoji joined with
/// `U+200D`) is never split across operations, so every operation's text can be measured
/// on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimilarEditScript {
    /// Give up looking for the minimal diff after this long. The result is still a
    /// correct edit script, just a less tidy one.
    pub timeout: Option<Duration>,
}

impl SimilarEditScript {
    #[must_use]
    pub fn with_timeout(timeout: Option<Duration>) -> Self { Self { timeout } }
}

impl EditScript for SimilarEditScript {
    fn compute(&self, actual: &str, expected: &str) -> Vec<DiffOperation> {
        let mut config = TextDiff::configure();
        config.algorithm(Algorithm::Myers);
        if let Some(timeout) = self.timeout {
            config.timeout(timeout);
        }
        let actual = split_graphemes(actual);
        let expected = split_graphemes(expected);
        let diff = config.diff_slices(actual.as_slice(), expected.as_slice());

        let mut acc: Vec<DiffOperation> = vec![];
        for change in diff.iter_all_changes() {
            let value = change.value();
            match (change.tag(), acc.last_mut()) {
                (ChangeTag::Equal, Some(DiffOperation::Keep(it)))
                | (ChangeTag::Delete, Some(DiffOperation::Delete(it)))
                | (ChangeTag::Insert, Some(DiffOperation::Insert(it))) => it.push_str(value),
                (ChangeTag::Equal, _) => acc.push(DiffOperation::Keep(value.to_string())),
                (ChangeTag::Delete, _) => acc.push(DiffOperation::Delete(value.to_string())),
                (ChangeTag::Insert, _) => acc.push(DiffOperation::Insert(value.to_string())),
            }
        }

        cleanup_semantic(acc)
    }
}

fn split_graphemes(text: &str) -> Vec<&str> { text.graphemes(true).collect() }

fn grapheme_count(text: &str) -> usize { text.graphemes(true).count() }

/// Alternating runs of unchanged and changed text.
#[derive(Debug)]
enum Block {
    Equal(String),
    Change { deleted: String, inserted: String },
}

impl Block {
    fn change_width(&self) -> Option<usize> {
        match self {
            Block::Equal(_) => None,
            Block::Change { deleted, inserted } => {
                Some(grapheme_count(deleted).max(grapheme_count(inserted)))
            }
        }
    }
}

/// Make an edit script easier to read.
/// 1. Neighbors of the same kind are merged, and inside each block of changes the
///    deletion comes before the insertion.
/// 2. An unchanged stretch sitting between two changes, that is no longer than either
///    change, is folded into them. So `abc` -> `xbz` reads as "replace `abc` with
///    `xbz`" instead of two single character edits around a `b`. Repeats until nothing
///    more folds.
#[must_use]
pub fn cleanup_semantic(operations: Vec<DiffOperation>) -> Vec<DiffOperation> {
    let mut blocks: Vec<Block> = vec![];
    for operation in operations {
        match (operation, blocks.last_mut()) {
            (DiffOperation::Keep(text), _) if text.is_empty() => {}
            (DiffOperation::Insert(text) | DiffOperation::Delete(text), _)
                if text.is_empty() => {}
            (DiffOperation::Keep(text), Some(Block::Equal(it))) => it.push_str(&text),
            (DiffOperation::Keep(text), _) => blocks.push(Block::Equal(text)),
            (DiffOperation::Delete(text), Some(Block::Change { deleted, .. })) => {
                deleted.push_str(&text);
            }
            (DiffOperation::Insert(text), Some(Block::Change { inserted, .. })) => {
                inserted.push_str(&text);
            }
            (DiffOperation::Delete(text), _) => blocks.push(Block::Change {
                deleted: text,
                inserted: String::new(),
            }),
            (DiffOperation::Insert(text), _) => blocks.push(Block::Change {
                deleted: String::new(),
                inserted: text,
            }),
        }
    }

    while let Some(index) = find_foldable_equality(&blocks) {
        let right = blocks.remove(index + 1);
        let middle = blocks.remove(index);
        if let (
            Block::Equal(equal),
            Block::Change {
                deleted: right_deleted,
                inserted: right_inserted,
            },
            Some(Block::Change { deleted, inserted }),
        ) = (middle, right, blocks.get_mut(index - 1))
        {
            deleted.push_str(&equal);
            deleted.push_str(&right_deleted);
            inserted.push_str(&equal);
            inserted.push_str(&right_inserted);
        }
    }

    let mut acc = Vec::with_capacity(blocks.len() * 2);
    for block in blocks {
        match block {
            Block::Equal(text) => acc.push(DiffOperation::Keep(text)),
            Block::Change { deleted, inserted } => {
                if !deleted.is_empty() {
                    acc.push(DiffOperation::Delete(deleted));
                }
                if !inserted.is_empty() {
                    acc.push(DiffOperation::Insert(inserted));
                }
            }
        }
    }
    acc
}

/// Index of an [`Block::Equal`] with a change on both sides that is no wider than
/// either of them.
fn find_foldable_equality(blocks: &[Block]) -> Option<usize> {
    (1..blocks.len().saturating_sub(1)).find(|&index| {
        let Block::Equal(equal) = &blocks[index] else {
            return false;
        };
        match (
            blocks[index - 1].change_width(),
            blocks[index + 1].change_width(),
        ) {
            (Some(left), Some(right)) => {
                let width = grapheme_count(equal);
                width <= left && width <= right
            }
            _ => false,
        }
    })
}

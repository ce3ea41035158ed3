//! Line-level edit script and its grouping into hunks.
//!
//! Uses the `similar` crate (Myers diff algorithm) for the edit script, then
//! coalesces changes and pads them with context the way `git diff` does.

use std::ops::Range;

use similar::algorithms::{myers, Capture, Replace};
use similar::DiffTag;
use tracing::trace;

use crate::config::DiffConfig;
use crate::content::strip_terminator;

/// A single line of a hunk, without its terminator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineEdit {
    /// A line present on both sides.
    Context(Vec<u8>),
    /// A line only present in the new content.
    Insertion(Vec<u8>),
    /// A line only present in the old content.
    Deletion(Vec<u8>),
}

impl LineEdit {
    /// The unified-diff prefix for this kind of line.
    pub fn origin(&self) -> u8 {
        match self {
            Self::Context(_) => b' ',
            Self::Insertion(_) => b'+',
            Self::Deletion(_) => b'-',
        }
    }

    /// The line's bytes, without the terminator.
    pub fn content(&self) -> &[u8] {
        match self {
            Self::Context(c) | Self::Insertion(c) | Self::Deletion(c) => c,
        }
    }
}

/// A line of a hunk together with its end-of-line state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HunkLine {
    /// What the line is and its bytes.
    pub edit: LineEdit,
    /// `false` only for a final line that had no trailing `\n`.
    pub has_newline: bool,
}

/// A contiguous region of changes plus surrounding context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hunk {
    /// Line number in the old content where this hunk starts (1-based).
    pub old_start: usize,
    /// Number of old lines covered by this hunk.
    pub old_count: usize,
    /// Line number in the new content where this hunk starts (1-based).
    pub new_start: usize,
    /// Number of new lines covered by this hunk.
    pub new_count: usize,
    /// Context, deleted and inserted lines in output order.
    pub lines: Vec<HunkLine>,
}

impl Hunk {
    /// The `@@ -a,b +c,d @@` header, formatted like `git diff`.
    ///
    /// A count of 1 is omitted and an empty range names the line before it.
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            format_range(self.old_start, self.old_count),
            format_range(self.new_start, self.new_count)
        )
    }
}

fn format_range(start: usize, count: usize) -> String {
    match count {
        0 => format!("{},0", start - 1),
        1 => start.to_string(),
        _ => format!("{start},{count}"),
    }
}

/// A run of non-equal ops: the old lines it removes and the new lines it adds.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Change {
    old: Range<usize>,
    new: Range<usize>,
}

/// Collect the changed regions of a Myers edit script, merging adjacent
/// delete/insert/replace ops into one region.
///
/// The script comes straight from `myers::diff`, which reports ops in
/// increasing old/new order.
fn changes(old: &[&[u8]], new: &[&[u8]]) -> Vec<Change> {
    let mut hook = Replace::new(Capture::new());
    match myers::diff(&mut hook, old, 0..old.len(), new, 0..new.len()) {
        Ok(()) => {}
        Err(never) => match never {},
    }

    let mut changes: Vec<Change> = Vec::new();
    let (mut old_pos, mut new_pos) = (0, 0);
    for op in hook.into_inner().into_ops() {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        debug_assert!(
            old_range.start == old_pos && new_range.start == new_pos,
            "edit script out of order: expected {old_pos}/{new_pos}, got {old_range:?}/{new_range:?}"
        );
        old_pos = old_range.end;
        new_pos = new_range.end;

        if tag == DiffTag::Equal {
            continue;
        }
        match changes.last_mut() {
            Some(last) if last.old.end == old_range.start && last.new.end == new_range.start => {
                last.old.end = old_range.end;
                last.new.end = new_range.end;
            }
            _ => changes.push(Change {
                old: old_range,
                new: new_range,
            }),
        }
    }
    debug_assert!(old_pos == old.len() && new_pos == new.len());

    changes
}

/// Compute the hunks turning `old` into `new`.
///
/// Both inputs are lines as produced by splitting on `\n` with terminators
/// kept. Two changes share a hunk when fewer than
/// [`DiffConfig::merge_distance`] unchanged lines separate them.
pub(crate) fn build_hunks(old: &[&[u8]], new: &[&[u8]], config: &DiffConfig) -> Vec<Hunk> {
    let context = config.context_lines as usize;
    let merge_distance = config.merge_distance();

    let mut groups: Vec<Vec<Change>> = Vec::new();
    for change in changes(old, new) {
        if let Some(prev) = groups.last().and_then(|group| group.last()) {
            debug_assert!(prev.old.end <= change.old.start && prev.new.end <= change.new.start);
        }
        match groups.last_mut() {
            Some(group)
                if group
                    .last()
                    .is_some_and(|prev| change.old.start - prev.old.end < merge_distance) =>
            {
                group.push(change);
            }
            _ => groups.push(vec![change]),
        }
    }

    groups
        .iter()
        .map(|group| assemble(group, old, new, context))
        .collect()
}

fn assemble(group: &[Change], old: &[&[u8]], new: &[&[u8]], context: usize) -> Hunk {
    // Groups are created with one change and only ever grow.
    let first = &group[0];
    let last = &group[group.len() - 1];

    // Unchanged runs have the same length on both sides, so leading and
    // trailing context shift both ranges equally.
    let lead = context.min(first.old.start);
    let trail = context.min(old.len() - last.old.end);

    let old_range = first.old.start - lead..last.old.end + trail;
    let new_range = first.new.start - lead..last.new.end + trail;

    let mut lines = Vec::with_capacity(old_range.len() + new_range.len());
    let mut cursor = old_range.start;
    for change in group {
        push_lines(&mut lines, &old[cursor..change.old.start], LineEdit::Context);
        push_lines(&mut lines, &old[change.old.clone()], LineEdit::Deletion);
        push_lines(&mut lines, &new[change.new.clone()], LineEdit::Insertion);
        cursor = change.old.end;
    }
    push_lines(&mut lines, &old[cursor..old_range.end], LineEdit::Context);

    trace!(
        old_start = old_range.start + 1,
        old_count = old_range.len(),
        new_start = new_range.start + 1,
        new_count = new_range.len(),
        changes = group.len(),
        "assembled hunk"
    );

    Hunk {
        old_start: old_range.start + 1,
        old_count: old_range.len(),
        new_start: new_range.start + 1,
        new_count: new_range.len(),
        lines,
    }
}

fn push_lines(out: &mut Vec<HunkLine>, src: &[&[u8]], make: fn(Vec<u8>) -> LineEdit) {
    out.extend(src.iter().map(|line| {
        let (content, has_newline) = strip_terminator(line);
        HunkLine {
            edit: make(content.to_vec()),
            has_newline,
        }
    }));
}

// ── Line diff ──
//
// Myers diff over lines, rendered either unified (whole-file context, no
// hunks) or as two columns. Memory stays linear in the input size.

use std::fmt::Write;

use similar::{Algorithm, DiffTag, capture_diff_slices};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange<'a> {
    Equal(&'a str),
    Removed(&'a str),
    Added(&'a str),
}

/// Compute the line edits that turn `old` into `new`. Within each changed
/// run, removals are listed before additions.
pub fn diff_lines<'a>(old: &'a str, new: &'a str) -> Vec<LineChange<'a>> {
    let a: Vec<&str> = old.lines().collect();
    let b: Vec<&str> = new.lines().collect();

    let mut changes = Vec::with_capacity(a.len().max(b.len()));
    let mut removed = Vec::new();
    let mut added = Vec::new();
    for op in capture_diff_slices(Algorithm::Myers, &a, &b) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        if tag == DiffTag::Equal {
            flush_run(&mut changes, &mut removed, &mut added);
            changes.extend(a[old_range].iter().copied().map(LineChange::Equal));
        } else {
            removed.extend_from_slice(&a[old_range]);
            added.extend_from_slice(&b[new_range]);
        }
    }
    flush_run(&mut changes, &mut removed, &mut added);
    changes
}

fn flush_run<'a>(
    changes: &mut Vec<LineChange<'a>>,
    removed: &mut Vec<&'a str>,
    added: &mut Vec<&'a str>,
) {
    changes.extend(removed.drain(..).map(LineChange::Removed));
    changes.extend(added.drain(..).map(LineChange::Added));
}

pub fn unified(old: &str, new: &str) -> String {
    let mut out = String::from("--- source\n+++ candidate\n");
    for change in diff_lines(old, new) {
        let _ = match change {
            LineChange::Equal(line) => writeln!(out, " {line}"),
            LineChange::Removed(line) => writeln!(out, "-{line}"),
            LineChange::Added(line) => writeln!(out, "+{line}"),
        };
    }
    out
}

/// Source on the left, candidate on the right. The gutter shows `|` for
/// unchanged lines, `<` for removals and `>` for additions.
pub fn side_by_side(old: &str, new: &str) -> String {
    let width = old.lines().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for change in diff_lines(old, new) {
        let row = match change {
            LineChange::Equal(line) => format!("{line:<width$} | {line}"),
            LineChange::Removed(line) => format!("{line:<width$} <"),
            LineChange::Added(line) => format!("{:<width$} > {line}", ""),
        };
        let _ = writeln!(out, "{}", row.trim_end());
    }
    out
}

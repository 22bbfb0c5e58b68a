use std::fmt::Write as _;
use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

use similar::{Algorithm, DiffOp, TextDiff};

#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// In-process line diff between two snapshot files.
///
/// Defaults to Myers, whose cost grows with the number of edits rather than
/// with the product of both file lengths. No deadline is set, so the same pair
/// of files always yields the same text.
///
/// Output is in the classic "normal" diff format (`2c2`, `< old`, `---`, `> new`)
/// and is empty exactly when both files have the same content. Differences are
/// data, never an error.
#[derive(Debug, Clone, Copy)]
pub struct DiffEngine {
    algorithm: Algorithm,
}

impl Default for DiffEngine {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Myers,
        }
    }
}

impl DiffEngine {
    pub fn new(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    pub fn diff_files(&self, baseline: &Path, candidate: &Path) -> Result<String, DiffError> {
        let old = read_lossy(baseline)?;
        let new = read_lossy(candidate)?;
        Ok(self.diff_text(&old, &new))
    }

    pub fn diff_text(&self, old: &str, new: &str) -> String {
        let diff = TextDiff::configure()
            .algorithm(self.algorithm)
            .diff_lines(old, new);
        render_normal(diff.ops(), diff.old_slices(), diff.new_slices())
    }
}

/// Normal-format diff of two texts using the default engine.
pub fn normal_diff(old: &str, new: &str) -> String {
    DiffEngine::default().diff_text(old, new)
}

fn read_lossy(path: &Path) -> Result<String, DiffError> {
    let bytes = fs::read(path).map_err(|source| DiffError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn render_normal(ops: &[DiffOp], old_lines: &[&str], new_lines: &[&str]) -> String {
    let mut out = String::new();
    let mut i = 0;
    while i < ops.len() {
        if matches!(ops[i], DiffOp::Equal { .. }) {
            i += 1;
            continue;
        }
        // Adjacent delete/insert/replace ops form one hunk.
        let start = i;
        while i < ops.len() && !matches!(ops[i], DiffOp::Equal { .. }) {
            i += 1;
        }
        let group = &ops[start..i];
        let old_range = group[0].old_range().start..group[group.len() - 1].old_range().end;
        let new_range = group[0].new_range().start..group[group.len() - 1].new_range().end;
        write_hunk(&mut out, old_range, new_range, old_lines, new_lines);
    }
    out
}

fn write_hunk(
    out: &mut String,
    old: Range<usize>,
    new: Range<usize>,
    old_lines: &[&str],
    new_lines: &[&str],
) {
    let _ = match (old.is_empty(), new.is_empty()) {
        (true, _) => writeln!(out, "{}a{}", old.start, line_range(&new)),
        (_, true) => writeln!(out, "{}d{}", line_range(&old), new.start),
        _ => writeln!(out, "{}c{}", line_range(&old), line_range(&new)),
    };
    for line in &old_lines[old.clone()] {
        push_line(out, "< ", line);
    }
    if !old.is_empty() && !new.is_empty() {
        out.push_str("---\n");
    }
    for line in &new_lines[new] {
        push_line(out, "> ", line);
    }
}

/// 1-based inclusive line numbers: `3` or `3,5`.
fn line_range(range: &Range<usize>) -> String {
    if range.len() == 1 {
        format!("{}", range.start + 1)
    } else {
        format!("{},{}", range.start + 1, range.end)
    }
}

fn push_line(out: &mut String, marker: &str, line: &str) {
    out.push_str(marker);
    out.push_str(line);
    if !line.ends_with('\n') {
        out.push_str("\n\\ No newline at end of file\n");
    }
}

#[cfg(test)]
mod tests {
    use super::normal_diff;

    #[test]
    fn identical_texts_have_empty_diff() {
        assert_eq!(normal_diff("A\nB\n", "A\nB\n"), "");
        assert_eq!(normal_diff("", ""), "");
    }

    #[test]
    fn changed_line_is_a_change_hunk() {
        assert_eq!(normal_diff("A\nB\n", "A\nC\n"), "2c2\n< B\n---\n> C\n");
    }

    #[test]
    fn appended_lines_are_an_add_hunk() {
        assert_eq!(normal_diff("A\n", "A\nB\nC\n"), "1a2,3\n> B\n> C\n");
    }

    #[test]
    fn removed_lines_are_a_delete_hunk() {
        assert_eq!(normal_diff("A\nB\nC\n", "C\n"), "1,2d0\n< A\n< B\n");
    }

    #[test]
    fn missing_trailing_newline_is_marked() {
        assert_eq!(
            normal_diff("<p>a</p>", "<p>b</p>"),
            "1c1\n< <p>a</p>\n\\ No newline at end of file\n---\n> <p>b</p>\n\\ No newline at end of file\n"
        );
    }

    #[test]
    fn separate_changes_get_separate_hunks() {
        let old = "1\n2\n3\n4\n5\n";
        let new = "1\nX\n3\n4\nY\n";
        assert_eq!(normal_diff(old, new), "2c2\n< 2\n---\n> X\n5c5\n< 5\n---\n> Y\n");
    }
}

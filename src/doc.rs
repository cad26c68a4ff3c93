//! Document store: whole-text loading, block splicing and atomic saves.
//!
//! The core parser and serializer never touch storage; this module owns the
//! file content on their behalf. Edits are whole-block splices against line
//! ranges obtained from a parse of this exact text — after any splice the
//! caller must save and re-parse before trusting further ranges.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// In-memory text of one note file, held as lines.
#[derive(Debug, Default)]
pub struct Document {
    path: PathBuf,
    lines: Vec<String>,
}

impl Document {
    /// Load a document from disk. A missing file yields an empty document so
    /// that a first `add` can create it.
    pub fn load(path: &Path) -> Result<Self> {
        let lines = if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            text.lines().map(str::to_string).collect()
        } else {
            Vec::new()
        };
        Ok(Document {
            path: path.to_path_buf(),
            lines,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Full text, for handing to the parser.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Replace the inclusive line span `[start, end]` with the given block,
    /// which may have a different number of lines. Out-of-range spans are
    /// clamped rather than panicking.
    pub fn replace_block(&mut self, start: usize, end: usize, block: &str) {
        if self.lines.is_empty() {
            self.append_block(block);
            return;
        }
        let (start, end) = self.clamp(start, end);
        let replacement: Vec<String> = block.lines().map(str::to_string).collect();
        self.lines.splice(start..=end, replacement);
    }

    /// Remove the inclusive line span `[start, end]`.
    pub fn delete_block(&mut self, start: usize, end: usize) {
        if self.lines.is_empty() {
            return;
        }
        let (start, end) = self.clamp(start, end);
        self.lines.drain(start..=end);
    }

    /// Append a block at the end of the document.
    pub fn append_block(&mut self, block: &str) {
        self.lines.extend(block.lines().map(str::to_string));
    }

    fn clamp(&self, start: usize, end: usize) -> (usize, usize) {
        let last = self.lines.len().saturating_sub(1);
        let start = start.min(last);
        let end = end.clamp(start, last);
        (start, end)
    }

    /// Save to disk using an atomic write (temp file + rename). Non-empty
    /// files always end with a newline.
    pub fn save(&self) -> Result<()> {
        let tmp = self.path.with_extension("md.tmp");
        let mut out = self.lines.join("\n");
        if !out.is_empty() {
            out.push('\n');
        }
        let mut f = File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
        f.write_all(out.as_bytes())?;
        f.flush()?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("replacing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(text: &str) -> Document {
        Document {
            path: PathBuf::from("test.md"),
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    #[test]
    fn test_replace_block_with_longer_block() {
        let mut doc = doc_with("a\nb\nc");
        doc.replace_block(1, 1, "x\ny");
        assert_eq!(doc.text(), "a\nx\ny\nc");
    }

    #[test]
    fn test_replace_block_with_shorter_block() {
        let mut doc = doc_with("a\nb\nc\nd");
        doc.replace_block(1, 2, "x");
        assert_eq!(doc.text(), "a\nx\nd");
    }

    #[test]
    fn test_delete_block() {
        let mut doc = doc_with("a\nb\nc\nd");
        doc.delete_block(1, 2);
        assert_eq!(doc.text(), "a\nd");
    }

    #[test]
    fn test_delete_block_on_empty_document_is_a_noop() {
        let mut doc = doc_with("");
        doc.delete_block(0, 3);
        assert_eq!(doc.line_count(), 0);
    }

    #[test]
    fn test_append_block() {
        let mut doc = doc_with("a");
        doc.append_block("- [ ] New task\n  due:: 2026-01-01");
        assert_eq!(doc.text(), "a\n- [ ] New task\n  due:: 2026-01-01");
    }

    #[test]
    fn test_out_of_range_spans_are_clamped() {
        let mut doc = doc_with("a\nb");
        doc.replace_block(5, 9, "x");
        assert_eq!(doc.text(), "a\nx");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = std::env::temp_dir().join("taskdown-doc-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("notes.md");

        let mut doc = Document::load(&path).unwrap();
        assert_eq!(doc.line_count(), 0);
        doc.append_block("- [ ] One\n- [x] Two");
        doc.save().unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "- [ ] One\n- [x] Two\n");

        let reloaded = Document::load(&path).unwrap();
        assert_eq!(reloaded.text(), "- [ ] One\n- [x] Two");

        std::fs::remove_file(&path).ok();
    }
}

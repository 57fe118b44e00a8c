use std::sync::OnceLock;

use regex::Regex;

use super::matcher::apply_filter;
use crate::error::{DlidxError, Result};
use crate::models::FileDescriptor;

/// A rendered list row. `index` is the entry's position in the full listing
/// and is what lookups use; `text` is display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleRow {
    pub index: usize,
    pub text: String,
}

/// Digits needed for the largest index of a listing with `total` entries.
pub fn index_width(total: usize) -> usize {
    match total.checked_sub(1) {
        None | Some(0) => 1,
        Some(max) => max.ilog10() as usize + 1,
    }
}

/// `"[007] name"`
pub fn render_row(index: usize, width: usize, name: &str) -> String {
    format!("[{:0width$}] {}", index, name, width = width)
}

fn row_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\[(\d+)\] ").expect("static regex"))
}

/// The full listing plus the subset currently shown.
///
/// The listing itself is never reordered or mutated; filtering only changes
/// which original indices are visible.
#[derive(Debug, Clone, Default)]
pub struct FilteredList {
    files: Vec<FileDescriptor>,
    filter: String,
    visible: Vec<usize>,
    width: usize,
}

impl FilteredList {
    pub fn new(files: Vec<FileDescriptor>) -> Self {
        let visible = (0..files.len()).collect();
        let width = index_width(files.len());
        Self {
            files,
            filter: String::new(),
            visible,
            width,
        }
    }

    pub fn files(&self) -> &[FileDescriptor] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// Replace the filter and rescan the whole listing once.
    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
        self.visible = apply_filter(&self.filter, &self.files);
    }

    pub fn clear_filter(&mut self) {
        self.set_filter("");
    }

    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        self.visible
            .iter()
            .map(|&index| self.make_row(index))
            .collect()
    }

    /// Row at a position in the visible list.
    pub fn row_at(&self, position: usize) -> Option<VisibleRow> {
        self.visible.get(position).map(|&index| self.make_row(index))
    }

    fn make_row(&self, index: usize) -> VisibleRow {
        VisibleRow {
            index,
            text: render_row(index, self.width, &self.files[index].name),
        }
    }

    pub fn resolve(&self, row: &VisibleRow) -> Result<&FileDescriptor> {
        self.files.get(row.index).ok_or_else(|| DlidxError::Resolution {
            row: row.text.clone(),
        })
    }

    /// Lookup by rendered text, for callers that only kept the string.
    pub fn resolve_text(&self, text: &str) -> Result<&FileDescriptor> {
        let err = || DlidxError::Resolution {
            row: text.to_string(),
        };
        let caps = row_prefix().captures(text).ok_or_else(err)?;
        let index: usize = caps[1].parse().map_err(|_| err())?;
        self.files.get(index).ok_or_else(err)
    }
}

/// Cursor over the visible rows. Never refers to the full listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    position: usize,
}

impl Selection {
    /// `None` when nothing is visible.
    pub fn get(&self, visible_len: usize) -> Option<usize> {
        (visible_len > 0).then(|| self.position.min(visible_len - 1))
    }

    pub fn clamp(&mut self, visible_len: usize) {
        self.position = self.get(visible_len).unwrap_or(0);
    }

    pub fn up(&mut self, by: usize) {
        self.position = self.position.saturating_sub(by);
    }

    pub fn down(&mut self, by: usize, visible_len: usize) {
        self.position = self.position.saturating_add(by);
        self.clamp(visible_len);
    }

    pub fn first(&mut self) {
        self.position = 0;
    }

    pub fn last(&mut self, visible_len: usize) {
        self.position = visible_len.saturating_sub(1);
    }
}

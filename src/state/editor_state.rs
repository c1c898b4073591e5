//! The editor's in-memory state.
//!
//! [`EditorState`] is read-only to the outside world. Every change goes through
//! the mutators on [`EditorContext`](super::EditorContext), which keep the
//! history and both storage tiers in step with it.

use serde::{Deserialize, Serialize};

use crate::history::TextHistory;

pub const DEFAULT_THEME_COLOR: &str = "Default";
pub const DEFAULT_TEXT_COLOR: &str = "gainsboro";
pub const DEFAULT_FONT_SIZE: f32 = 1.0;

/// Last-known cursor selection as offsets into the document.
///
/// Advisory only: offsets are not checked against the document length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A collapsed selection, i.e. a plain caret
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub(crate) document: String,
    pub(crate) selection: Selection,
    pub(crate) wrap_enabled: bool,
    pub(crate) font_size: f32,
    pub(crate) footer_visible: bool,
    pub(crate) theme_color: String,
    pub(crate) text_color: String,
    pub(crate) history: TextHistory,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            document: String::new(),
            selection: Selection::default(),
            wrap_enabled: true,
            font_size: DEFAULT_FONT_SIZE,
            footer_visible: true,
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            history: TextHistory::new(),
        }
    }
}

impl EditorState {
    /// Default state whose history keeps at most `limit` snapshots
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history: TextHistory::with_limit(limit),
            ..Self::default()
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn wrap_enabled(&self) -> bool {
        self.wrap_enabled
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn footer_visible(&self) -> bool {
        self.footer_visible
    }

    pub fn theme_color(&self) -> &str {
        &self.theme_color
    }

    pub fn text_color(&self) -> &str {
        &self.text_color
    }

    pub fn history(&self) -> &TextHistory {
        &self.history
    }

    pub fn history_cursor(&self) -> usize {
        self.history.cursor()
    }
}

/// Font size a text view applies when it is first shown at `viewport_width`
/// pixels. `None` means keep the stored size.
pub fn font_size_for_viewport(viewport_width: f32) -> Option<f32> {
    if viewport_width > 800.0 {
        Some(1.7)
    } else if viewport_width > 500.0 {
        Some(1.5)
    } else {
        None
    }
}

use crate::state::Selection;

/// Direction of a history move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Undo,
    Redo,
}

/// One event is emitted per mutator call on the editor context, including
/// assignments that leave the value unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    DocumentChanged {
        /// Whether a new history snapshot was recorded
        recorded: bool,
        history_cursor: usize,
    },
    SelectionChanged(Selection),
    WrapChanged(bool),
    FontSizeChanged(f32),
    FooterChanged(bool),
    ThemeColorChanged {
        old: String,
        new: String,
    },
    TextColorChanged {
        old: String,
        new: String,
    },
    HistoryMoved {
        direction: HistoryDirection,
        history_cursor: usize,
    },
}

impl EditorEvent {
    /// Returns true if the event touched a field mirrored to durable storage
    pub fn touches_durable_fields(&self) -> bool {
        !matches!(
            self,
            EditorEvent::ThemeColorChanged { .. } | EditorEvent::TextColorChanged { .. }
        )
    }
}

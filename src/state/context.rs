//! The state container of the editor.
//!
//! `EditorContext` owns the [`EditorState`] and is the only way to change it.
//! Each mutator updates memory first, then
//!
//! 1. records a history snapshot (document text only),
//! 2. mirrors the durable fields to durable storage when the mutation touched
//!    them,
//! 3. emits one [`EditorEvent`] on the bus. The session-colors channel is a
//!    subscriber and writes only when theme or text color actually changed.
//!
//! Storage failures are absorbed by the channels; mutators never fail.
//!
//! # Example
//!
//! ```
//! use notepad_core::state::EditorContext;
//!
//! let mut ctx = EditorContext::in_memory();
//! ctx.set_document("a");
//! ctx.set_document("ab");
//! ctx.undo();
//! assert_eq!(ctx.state().document(), "a");
//! ctx.redo();
//! assert_eq!(ctx.state().document(), "ab");
//! ```

use super::{DurableChannel, EditorState, EphemeralChannel, Selection};
use crate::config::StoreConfig;
use crate::event::{EditorEvent, EventBus, HistoryDirection};
use crate::storage::{MemoryStorage, Storage};

#[derive(Debug)]
pub struct EditorContext {
    /// The current state of the editor
    state: EditorState,
    /// Mirrors document, layout and history to durable storage
    durable: DurableChannel,
    /// The event bus for broadcasting editor events
    event_bus: EventBus,
}

impl EditorContext {
    /// Creates a context, restoring whatever the two storage tiers hold.
    ///
    /// Durable fields come from `durable`, theme and text color from
    /// `ephemeral`. Anything missing or unreadable takes its default.
    pub fn open(
        config: &StoreConfig,
        durable: Box<dyn Storage>,
        ephemeral: Box<dyn Storage>,
    ) -> Self {
        let mut state = EditorState::with_history_limit(config.history_limit);

        let durable = DurableChannel::new(durable, config.durable_key.as_str());
        durable.load().apply(&mut state);

        let session = EphemeralChannel::open(ephemeral, config.ephemeral_key.as_str());
        session.colors().clone().apply(&mut state);

        let event_bus = EventBus::new();
        event_bus.subscribe(Box::new(session));

        log::debug!(
            "Opened editor context: {} bytes, {} history entries",
            state.document.len(),
            state.history.len()
        );

        Self {
            state,
            durable,
            event_bus,
        }
    }

    /// A context backed by fresh in-memory storage for both tiers
    pub fn in_memory() -> Self {
        Self::open(
            &StoreConfig::default(),
            Box::new(MemoryStorage::new()),
            Box::new(MemoryStorage::new()),
        )
    }

    /// Flushes both storage tiers and returns the final state
    pub fn close(mut self) -> EditorState {
        self.durable.flush();
        self.event_bus.shutdown();
        self.state
    }

    /// Gets a reference to the current state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// The bus on which every mutation is announced
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Replaces the document text, recording a history snapshot if it changed
    pub fn set_document(&mut self, text: impl Into<String>) {
        let text = text.into();
        let recorded = text != self.state.document && self.state.history.record(&text);
        self.state.document = text;
        self.commit(EditorEvent::DocumentChanged {
            recorded,
            history_cursor: self.state.history.cursor(),
        });
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.state.selection = selection;
        self.commit(EditorEvent::SelectionChanged(selection));
    }

    pub fn set_wrap_enabled(&mut self, wrap_enabled: bool) {
        self.state.wrap_enabled = wrap_enabled;
        self.commit(EditorEvent::WrapChanged(wrap_enabled));
    }

    pub fn set_font_size(&mut self, font_size: f32) {
        self.state.font_size = font_size;
        self.commit(EditorEvent::FontSizeChanged(font_size));
    }

    pub fn set_footer_visible(&mut self, footer_visible: bool) {
        self.state.footer_visible = footer_visible;
        self.commit(EditorEvent::FooterChanged(footer_visible));
    }

    pub fn set_theme_color(&mut self, theme_color: impl Into<String>) {
        let new = theme_color.into();
        let old = std::mem::replace(&mut self.state.theme_color, new.clone());
        self.commit(EditorEvent::ThemeColorChanged { old, new });
    }

    /// Any string is accepted; pickers offer [`crate::palette::TEXT_COLORS`]
    pub fn set_text_color(&mut self, text_color: impl Into<String>) {
        let new = text_color.into();
        let old = std::mem::replace(&mut self.state.text_color, new.clone());
        self.commit(EditorEvent::TextColorChanged { old, new });
    }

    /// Steps back one snapshot. Returns false at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        self.move_in_history(HistoryDirection::Undo)
    }

    /// Steps forward one snapshot. Returns false at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        self.move_in_history(HistoryDirection::Redo)
    }

    pub fn can_undo(&self) -> bool {
        self.state.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.state.history.can_redo()
    }

    /// Removes the durable record. In-memory state is left alone, so the next
    /// durable mutation writes a fresh record.
    pub fn clear_persisted(&mut self) {
        self.durable.clear();
    }

    fn move_in_history(&mut self, direction: HistoryDirection) -> bool {
        let history = &mut self.state.history;
        let snapshot = match direction {
            HistoryDirection::Undo => history.undo(),
            HistoryDirection::Redo => history.redo(),
        };
        let Some(snapshot) = snapshot.map(str::to_owned) else {
            return false;
        };

        self.state.document = snapshot;
        self.commit(EditorEvent::HistoryMoved {
            direction,
            history_cursor: self.state.history.cursor(),
        });
        true
    }

    fn commit(&mut self, event: EditorEvent) {
        if event.touches_durable_fields() {
            self.durable.persist(&self.state);
        }
        self.event_bus.emit(&event, &self.state);
    }
}

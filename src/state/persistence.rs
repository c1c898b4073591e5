use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::editor_state::{DEFAULT_TEXT_COLOR, DEFAULT_THEME_COLOR};
use super::{EditorState, Selection};
use crate::event::{EditorEvent, EventHandler};
use crate::history::TextHistory;
use crate::storage::{Storage, StorageError};

/// Errors that can occur during state persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize state: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid state data: {0}")]
    InvalidState(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Persistence failures never reach editor callers; they are only reported in
/// debug builds.
fn report(context: &str, err: &PersistenceError) {
    if cfg!(debug_assertions) {
        log::warn!("{}: {}", context, err);
    }
}

/// Reads one field of a persisted record, or `None` if it is missing or has
/// the wrong shape.
fn field<T: DeserializeOwned>(fields: &Map<String, Value>, name: &str) -> Option<T> {
    let value = fields.get(name)?;
    match T::deserialize(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            log::debug!("Ignoring persisted field `{}`: {}", name, err);
            None
        }
    }
}

fn parse_object(json: &str) -> PersistenceResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(fields) => Ok(fields),
        other => Err(PersistenceError::InvalidState(format!(
            "expected a JSON object, found {}",
            other
        ))),
    }
}

/// The part of the editor state that survives restarts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurableRecord {
    pub document: String,
    pub font_size: f32,
    pub footer_visible: bool,
    pub wrap_enabled: bool,
    pub selection: Selection,
    pub history: Vec<String>,
    pub history_cursor: usize,
}

impl Default for DurableRecord {
    fn default() -> Self {
        Self::capture(&EditorState::default())
    }
}

impl DurableRecord {
    /// Copy the durable fields out of `state`
    pub fn capture(state: &EditorState) -> Self {
        Self {
            document: state.document.clone(),
            font_size: state.font_size,
            footer_visible: state.footer_visible,
            wrap_enabled: state.wrap_enabled,
            selection: state.selection,
            history: state.history.entries().to_vec(),
            history_cursor: state.history.cursor(),
        }
    }

    /// Parse a stored record field by field.
    ///
    /// Each missing or ill-typed field takes its default on its own. Only
    /// input that is not a JSON object at all is an error.
    pub fn parse(json: &str) -> PersistenceResult<Self> {
        let fields = parse_object(json)?;
        let defaults = Self::default();
        Ok(Self {
            document: field(&fields, "document").unwrap_or(defaults.document),
            font_size: field(&fields, "fontSize").unwrap_or(defaults.font_size),
            footer_visible: field(&fields, "footerVisible").unwrap_or(defaults.footer_visible),
            wrap_enabled: field(&fields, "wrapEnabled").unwrap_or(defaults.wrap_enabled),
            selection: field(&fields, "selection").unwrap_or(defaults.selection),
            history: field(&fields, "history").unwrap_or(defaults.history),
            history_cursor: field(&fields, "historyCursor").unwrap_or(defaults.history_cursor),
        })
    }

    /// Restore this record into `state`, keeping its history limit
    pub fn apply(self, state: &mut EditorState) {
        let limit = state.history.limit();
        state.document = self.document;
        state.font_size = self.font_size;
        state.footer_visible = self.footer_visible;
        state.wrap_enabled = self.wrap_enabled;
        state.selection = self.selection;
        state.history = TextHistory::from_parts(self.history, self.history_cursor, limit);
    }
}

/// Cosmetic preferences that only live for the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionColors {
    pub theme_color: String,
    pub text_color: String,
}

impl Default for SessionColors {
    fn default() -> Self {
        Self {
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
        }
    }
}

impl SessionColors {
    pub fn capture(state: &EditorState) -> Self {
        Self {
            theme_color: state.theme_color.clone(),
            text_color: state.text_color.clone(),
        }
    }

    /// Parse a stored record. Missing, empty or non-string colors take
    /// their defaults.
    pub fn parse(json: &str) -> PersistenceResult<Self> {
        let fields = parse_object(json)?;
        let color = |name: &str, default: &str| {
            field::<String>(&fields, name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Ok(Self {
            theme_color: color("themeColor", DEFAULT_THEME_COLOR),
            text_color: color("textColor", DEFAULT_TEXT_COLOR),
        })
    }

    /// Returns true if `state` carries exactly these colors
    pub fn matches(&self, state: &EditorState) -> bool {
        self.theme_color == state.theme_color && self.text_color == state.text_color
    }

    pub fn apply(self, state: &mut EditorState) {
        state.theme_color = self.theme_color;
        state.text_color = self.text_color;
    }
}

/// Mirrors the durable fields to long-lived storage on every change
pub struct DurableChannel {
    storage: Box<dyn Storage>,
    key: String,
}

impl std::fmt::Debug for DurableChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DurableChannel").field("key", &self.key).finish()
    }
}

impl DurableChannel {
    pub fn new(storage: Box<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored record, `None` if nothing was stored yet
    pub fn try_load(&self) -> PersistenceResult<Option<DurableRecord>> {
        match self.storage.get_string(&self.key)? {
            Some(json) => DurableRecord::parse(&json).map(Some),
            None => Ok(None),
        }
    }

    /// Read the stored record, falling back to defaults on any failure
    pub fn load(&self) -> DurableRecord {
        match self.try_load() {
            Ok(Some(record)) => {
                log::debug!("Restored editor state from `{}`", self.key);
                record
            }
            Ok(None) => DurableRecord::default(),
            Err(err) => {
                report("Failed to restore editor state", &err);
                DurableRecord::default()
            }
        }
    }

    pub fn try_persist(&mut self, state: &EditorState) -> PersistenceResult<()> {
        let json = serde_json::to_string(&DurableRecord::capture(state))?;
        self.storage.set_string(&self.key, json)?;
        Ok(())
    }

    /// Write the durable fields of `state`, swallowing failures
    pub fn persist(&mut self, state: &EditorState) {
        if let Err(err) = self.try_persist(state) {
            report("Failed to save editor state", &err);
        }
    }

    pub fn try_clear(&mut self) -> PersistenceResult<()> {
        self.storage.remove(&self.key)?;
        Ok(())
    }

    /// Remove the stored record, swallowing failures
    pub fn clear(&mut self) {
        match self.try_clear() {
            Ok(()) => log::info!("Cleared saved editor state `{}`", self.key),
            Err(err) => report("Failed to clear editor state", &err),
        }
    }

    pub fn flush(&mut self) {
        if let Err(err) = self.storage.flush() {
            report("Failed to flush editor state", &PersistenceError::from(err));
        }
    }
}

/// Mirrors theme and text color to session storage.
///
/// Subscribed to the event bus; writes only when the colors differ from
/// what it last wrote (or loaded).
pub struct EphemeralChannel {
    storage: Box<dyn Storage>,
    key: String,
    last_written: SessionColors,
}

impl std::fmt::Debug for EphemeralChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EphemeralChannel")
            .field("key", &self.key)
            .field("last_written", &self.last_written)
            .finish()
    }
}

impl EphemeralChannel {
    /// Open the channel and load the session's colors, defaulting on any
    /// failure
    pub fn open(storage: Box<dyn Storage>, key: impl Into<String>) -> Self {
        let mut channel = Self {
            storage,
            key: key.into(),
            last_written: SessionColors::default(),
        };
        match channel.try_load() {
            Ok(Some(colors)) => channel.last_written = colors,
            Ok(None) => {}
            Err(err) => report("Failed to restore session colors", &err),
        }
        channel
    }

    pub fn try_load(&self) -> PersistenceResult<Option<SessionColors>> {
        match self.storage.get_string(&self.key)? {
            Some(json) => SessionColors::parse(&json).map(Some),
            None => Ok(None),
        }
    }

    /// The colors last written or loaded
    pub fn colors(&self) -> &SessionColors {
        &self.last_written
    }

    fn try_write(&mut self) -> PersistenceResult<()> {
        let json = serde_json::to_string(&self.last_written)?;
        self.storage.set_string(&self.key, json)?;
        Ok(())
    }
}

impl EventHandler for EphemeralChannel {
    fn handle_event(&mut self, _event: &EditorEvent, state: &EditorState) {
        if self.last_written.matches(state) {
            return;
        }
        // The snapshot moves even if the write fails; the next delta retries.
        self.last_written = SessionColors::capture(state);
        if let Err(err) = self.try_write() {
            report("Failed to save session colors", &err);
        }
    }

    fn shutdown(&mut self) {
        if let Err(err) = self.storage.flush() {
            report("Failed to flush session colors", &PersistenceError::from(err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_durable_record_uses_camel_case_keys() {
        let mut state = EditorState::default();
        state.document = "hi".to_string();
        let json = serde_json::to_value(DurableRecord::capture(&state)).unwrap();
        for key in [
            "document",
            "fontSize",
            "footerVisible",
            "wrapEnabled",
            "selection",
            "history",
            "historyCursor",
        ] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert!(json.get("themeColor").is_none());
        assert!(json.get("textColor").is_none());
    }

    #[test]
    fn test_parse_falls_back_per_field() {
        let record = DurableRecord::parse(
            r#"{"document":"kept","fontSize":"big","wrapEnabled":false,"selection":{"start":-1,"end":2},"extra":1}"#,
        )
        .unwrap();
        assert_eq!(record.document, "kept");
        assert_eq!(record.font_size, 1.0);
        assert!(!record.wrap_enabled);
        assert!(record.footer_visible);
        assert_eq!(record.selection, Selection::default());
        assert_eq!(record.history, vec![String::new()]);
        assert_eq!(record.history_cursor, 0);
    }

    #[test]
    fn test_parse_rejects_non_objects() {
        assert!(matches!(
            DurableRecord::parse("{not json"),
            Err(PersistenceError::SerializationError(_))
        ));
        assert!(matches!(
            DurableRecord::parse("[1,2]"),
            Err(PersistenceError::InvalidState(_))
        ));
    }

    #[test]
    fn test_session_colors_ignore_empty_values() {
        let colors = SessionColors::parse(r#"{"themeColor":"","textColor":"gray"}"#).unwrap();
        assert_eq!(colors.theme_color, "Default");
        assert_eq!(colors.text_color, "gray");

        let colors = SessionColors::parse(r#"{"themeColor":3}"#).unwrap();
        assert_eq!(colors, SessionColors::default());
    }

    #[test]
    fn test_durable_channel_survives_unavailable_storage() {
        let storage = MemoryStorage::new();
        storage.set_unavailable(true);
        let mut channel = DurableChannel::new(Box::new(storage.clone()), "store");

        assert!(channel.try_load().is_err());
        assert_eq!(channel.load(), DurableRecord::default());
        assert!(channel.try_persist(&EditorState::default()).is_err());
        channel.persist(&EditorState::default());
        assert_eq!(storage.write_count(), 0);
    }

    #[test]
    fn test_ephemeral_channel_writes_only_on_delta() {
        let storage = MemoryStorage::new();
        let mut channel = EphemeralChannel::open(Box::new(storage.clone()), "sessionColors");
        let mut state = EditorState::default();

        channel.handle_event(&EditorEvent::WrapChanged(false), &state);
        assert_eq!(storage.write_count(), 0);

        state.text_color = "black".to_string();
        let event = EditorEvent::TextColorChanged {
            old: "gainsboro".to_string(),
            new: "black".to_string(),
        };
        channel.handle_event(&event, &state);
        channel.handle_event(&event, &state);
        assert_eq!(storage.write_count(), 1);
        assert_eq!(channel.colors().text_color, "black");

        let stored = storage.get_string("sessionColors").unwrap().unwrap();
        assert_eq!(stored, r#"{"themeColor":"Default","textColor":"black"}"#);
    }
}

mod editor_state;
pub mod context;
mod persistence;

pub use editor_state::{
    font_size_for_viewport,
    EditorState,
    Selection,
    DEFAULT_FONT_SIZE,
    DEFAULT_TEXT_COLOR,
    DEFAULT_THEME_COLOR,
};
pub use context::EditorContext;
pub use persistence::{
    DurableChannel,
    DurableRecord,
    EphemeralChannel,
    PersistenceError,
    PersistenceResult,
    SessionColors,
};

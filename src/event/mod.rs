mod bus;
mod events;

pub use bus::{EventBus, HandlerId};
pub use events::{EditorEvent, HistoryDirection};

use crate::state::EditorState;

/// Observer of editor state changes.
///
/// Handlers see the event and the state as it is right after the mutation.
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &EditorEvent, state: &EditorState);

    /// Called once when the owning context is closed
    fn shutdown(&mut self) {}
}

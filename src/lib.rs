#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod event;
pub mod history;
pub mod palette;
pub mod state;
pub mod storage;

pub use config::StoreConfig;
pub use event::{EditorEvent, EventBus, EventHandler};
pub use history::{TextHistory, HISTORY_LIMIT};
pub use palette::{TextColorOption, TEXT_COLORS};
pub use state::{EditorContext, EditorState, Selection};
pub use storage::{FileStorage, MemoryStorage, Storage};

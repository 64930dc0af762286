//! Dialog state machine: static screens, the snapshot reducer and command planning.

pub mod actions;
pub mod config;
pub mod state;

pub use actions::{plan_command, DialogCommand, DialogError, DialogView};
pub use config::DialogStateId;
pub use state::{reduce_all, DialogEvent, DialogState};

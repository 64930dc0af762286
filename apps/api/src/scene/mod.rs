//! Scene playback: phase tracking, idle clip selection and the dialog bridge.

pub mod bridge;
pub mod controller;
pub mod idle;
pub mod models;

pub use controller::SceneController;
pub use idle::IdleSchedule;
pub use models::{ScenePhase, SceneState};

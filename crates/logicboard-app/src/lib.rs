//! LogicBoard Application
//!
//! Headless session runner: replays scripted input against a whiteboard,
//! talks to the recognition service, and writes the resulting image and
//! annotations.

pub mod runner;
pub mod script;

pub use runner::{AppError, SessionReport, board_config, run, write_png, write_report};
pub use script::{Script, ScriptError, Step};

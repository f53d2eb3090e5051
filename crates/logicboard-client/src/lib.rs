//! LogicBoard recognition client
//!
//! Sends surface snapshots to the `/calculate` endpoint of the recognition
//! service.

pub mod config;
pub mod http;

pub use config::ClientConfig;
pub use http::{ClientError, HttpRecognizer};

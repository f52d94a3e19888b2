#![forbid(unsafe_code)]

pub mod error;
pub mod gate;
pub mod grading;
pub mod judgment;
pub mod model;
pub mod panel;
pub mod parser;
pub mod protocol;
pub mod session;
pub mod time;

pub use error::{CollaboratorFailure, PanelError};
pub use time::Clock;

//! Core types for oktakey.

mod account;
mod backend;
mod credential;
mod telemetry;

pub use account::*;
pub use backend::*;
pub use credential::*;
pub use telemetry::*;

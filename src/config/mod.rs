//! Configuration and shared types
//!
//! Process profile loading, validation and the types every layer shares.

pub mod profile;
pub mod types;
pub mod validator;

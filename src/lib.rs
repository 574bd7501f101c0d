//! posixkit: named access to POSIX process-identity, resource-limit and
//! syslog primitives
//!
//! Callers speak in names ("nofile", "daemon", "mask_err", "nobody") and
//! get back structured records and flag sets. Name resolution, argument
//! checking and error classification happen before the first system call.
//!
//! # Architecture
//!
//! ## Constant Tables ([`constants`])
//! - Per-domain name/value tables built from the target's libc
//! - [`constants::assemble`] / [`constants::decode`]: flag sets to bitmasks and back
//!
//! ## OS Primitives ([`kernel`])
//! - [`kernel::credentials`]: uid/gid getters and setters, passwd/group lookup
//! - [`kernel::process`]: pid, process group and session control
//! - [`kernel::rlimit`]: resource limits with unbounded handling
//! - [`kernel::syslog`]: openlog/syslog/setlogmask/closelog
//! - [`kernel::host`]: hostname, chroot and (Linux) swap areas
//!
//! ## Call Surface ([`facade`])
//! - Typed operations re-exported at the crate root
//! - [`facade::call`]: name plus JSON arguments, checked before dispatch
//!
//! ## Configuration ([`config`])
//! - [`config::types`]: shared records, limit values and [`PosixError`]
//! - [`config::profile`]: JSON process profiles applied in a fixed order
//! - [`config::validator`]: side-effect free profile checks

pub mod config;
pub mod constants;
pub mod facade;
pub mod kernel;

pub use config::profile::{IdentityProfile, ProcessProfile, SyslogProfile};
pub use config::types::*;
pub use facade::*;

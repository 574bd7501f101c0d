//! Thin wrappers around the OS primitives.
//!
//! All `unsafe` code is concentrated here with explicit SAFETY comments.
//! Every wrapper validates and resolves its arguments before the first
//! system call, so a rejected call has no side effects.

pub mod credentials;
pub mod host;
pub mod process;
pub mod rlimit;
pub mod syslog;

use crate::config::types::{PosixError, Result};
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// NUL-terminated copy of `value`, or `TypeMismatch` at `position` of `op`
/// if it has an interior NUL.
pub(crate) fn c_string(op: &str, position: usize, value: &str, expected: &'static str) -> Result<CString> {
    CString::new(value).map_err(|_| PosixError::type_mismatch(op, position, expected))
}

/// Non-empty path without interior NUL bytes, ready for a C call.
pub(crate) fn c_path(op: &str, path: &Path) -> Result<CString> {
    if path.as_os_str().is_empty() {
        return Err(PosixError::MissingArgument("path"));
    }
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| PosixError::type_mismatch(op, 0, "a path without NUL bytes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_string_rejects_interior_nul() {
        assert_eq!(c_string("log", 1, "plain", "x").unwrap().as_bytes(), b"plain");
        assert!(matches!(
            c_string("log", 1, "a\0b", "x"),
            Err(PosixError::TypeMismatch { position: 1, .. })
        ));
    }

    #[test]
    fn c_path_rejects_empty_and_nul() {
        assert!(matches!(c_path("swap_on", Path::new("")), Err(PosixError::MissingArgument(_))));
        assert!(matches!(
            c_path("swap_on", Path::new("/tmp/a\0b")),
            Err(PosixError::TypeMismatch { position: 0, .. })
        ));
        assert!(c_path("swap_on", Path::new("/swapfile")).is_ok());
    }
}

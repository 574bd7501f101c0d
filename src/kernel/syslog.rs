//! The process-wide syslog channel.
//!
//! openlog(3) keeps the identifier pointer rather than copying the string, so
//! the current identifier lives in [`IDENT`] until the next `open_log`
//! replaces it. Opening and closing are independent calls; pairing them is
//! the caller's job.

use crate::config::types::{FlagSet, PosixError, Result};
use crate::constants::{self, ConstValue, Domain};
use crate::kernel::c_string;
use std::ffi::CString;
use std::sync::Mutex;

/// Prefix that maps priority names onto the mask table.
pub const MASK_PREFIX: &str = "mask_";

static IDENT: Mutex<Option<CString>> = Mutex::new(None);

/// openlog(3) with named options and facility.
pub fn open_log(ident: &str, options: &FlagSet, facility: &str) -> Result<()> {
    let facility_value = lookup_named(Domain::SyslogFacility, facility, "syslog facility")?;
    let option_bits = constants::assemble(Domain::SyslogOption, options, "")?;
    let c_ident = ident_c_string(ident)?;

    let mut slot = IDENT.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    // SAFETY: c_ident is moved into IDENT right after the call and stays
    // there until a later open_log has switched openlog to its replacement.
    unsafe { libc::openlog(c_ident.as_ptr(), option_bits, facility_value) };
    *slot = Some(c_ident);
    drop(slot);

    log::debug!(
        "openlog ident={:?} options={:#x} facility={}",
        ident,
        option_bits,
        facility
    );
    Ok(())
}

/// syslog(3) at a named priority. The message is never used as a format string.
pub fn log(priority: &str, message: &str) -> Result<()> {
    let priority_value = lookup_named(Domain::SyslogPriority, priority, "syslog priority")?;
    let c_message = c_string("log", 1, message, "a message without NUL bytes")?;

    // SAFETY: "%s" consumes exactly one C string argument, which c_message
    // provides for the duration of the call.
    unsafe { libc::syslog(priority_value, c"%s".as_ptr(), c_message.as_ptr()) };
    Ok(())
}

/// setlogmask(3) from a priority Flag Set.
///
/// Returns the mask read back from the OS after the update, decoded to
/// priority names, which is not necessarily what was requested: an empty
/// request leaves the mask untouched.
///
/// Aliases (`error`, `warn`, `panic`) are accepted on input, but the result
/// always uses the canonical names, so `mask_error` reads back as `err`.
pub fn set_log_mask(priorities: &FlagSet) -> Result<FlagSet> {
    let requested = constants::assemble(Domain::SyslogMask, priorities, MASK_PREFIX)?;

    // SAFETY: setlogmask only swaps an integer in libc's logging state.
    unsafe { libc::setlogmask(requested) };
    let active = current_log_mask();

    log::debug!("setlogmask requested={:#x} active={:#x}", requested, active);
    Ok(constants::decode(Domain::SyslogMask, active, MASK_PREFIX))
}

/// Active log mask as priority names, without changing it.
pub fn get_log_mask() -> FlagSet {
    constants::decode(Domain::SyslogMask, current_log_mask(), MASK_PREFIX)
}

/// closelog(3)
pub fn close_log() {
    // SAFETY: closelog has no preconditions.
    unsafe { libc::closelog() };
    log::debug!("closelog");
}

fn current_log_mask() -> ConstValue {
    // SAFETY: setlogmask(0) reports the mask without modifying it.
    unsafe { libc::setlogmask(0) }
}

/// The identifier openlog will hold on to.
pub(crate) fn ident_c_string(ident: &str) -> Result<CString> {
    c_string("open_log", 0, ident, "an identifier without NUL bytes")
}

fn lookup_named(domain: Domain, name: &str, what: &'static str) -> Result<ConstValue> {
    if name.is_empty() {
        return Err(PosixError::MissingArgument(what));
    }
    constants::lookup(domain, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_facility_fails_before_openlog() {
        let err = open_log("posixkit-test", &FlagSet::new(), "nosuchfacility").unwrap_err();
        assert!(matches!(err, PosixError::UnknownConstant { .. }));
    }

    #[test]
    fn unknown_option_fails_before_openlog() {
        let options: FlagSet = [("pid".to_string(), true), ("loud".to_string(), true)]
            .into_iter()
            .collect();
        let err = open_log("posixkit-test", &options, "user").unwrap_err();
        assert!(matches!(err, PosixError::UnknownConstant { ref name, .. } if name == "loud"));
    }

    #[test]
    fn empty_facility_is_missing_argument() {
        assert!(matches!(
            open_log("posixkit-test", &FlagSet::new(), ""),
            Err(PosixError::MissingArgument(_))
        ));
    }

    #[test]
    fn unknown_priority_fails_before_syslog() {
        assert!(matches!(
            log("loud", "message"),
            Err(PosixError::UnknownConstant { .. })
        ));
    }

    #[test]
    fn nul_in_message_is_type_mismatch() {
        assert!(matches!(
            log("debug", "a\0b"),
            Err(PosixError::TypeMismatch { position: 1, .. })
        ));
    }

    #[test]
    fn nul_in_ident_fails_before_openlog() {
        assert!(matches!(
            open_log("bad\0ident", &FlagSet::new(), "user"),
            Err(PosixError::TypeMismatch { position: 0, .. })
        ));
    }

    #[test]
    fn unknown_mask_priority_leaves_mask_alone() {
        let before = get_log_mask();
        let request: FlagSet = [("loud".to_string(), true)].into_iter().collect();
        assert!(set_log_mask(&request).is_err());
        assert_eq!(get_log_mask(), before);
    }
}

//! Hostname, chroot jail and swap areas.

use super::c_path;
use crate::config::types::{PosixError, Result};
use nix::unistd;
use std::path::Path;

#[cfg(target_os = "linux")]
use crate::config::types::FlagSet;
#[cfg(target_os = "linux")]
use crate::constants::{self, Domain};

/// gethostname(2)
pub fn get_hostname() -> Result<String> {
    let name = unistd::gethostname().map_err(|e| PosixError::os("gethostname", e))?;
    Ok(name.to_string_lossy().into_owned())
}

/// sethostname(2)
pub fn set_hostname(name: &str) -> Result<()> {
    check_hostname(name)?;
    unistd::sethostname(name).map_err(|e| PosixError::os("sethostname", e))?;
    log::info!("Set hostname to {}", name);
    Ok(())
}

/// Rejections `set_hostname` makes before calling the OS.
pub(crate) fn check_hostname(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PosixError::MissingArgument("hostname"));
    }
    if name.contains('\0') {
        return Err(PosixError::type_mismatch("set_hostname", 0, "a hostname without NUL bytes"));
    }
    Ok(())
}

/// chdir(2) into `path`, then chroot(2) to it. Nothing else: open file
/// descriptors, credentials and the environment are untouched.
pub fn chroot(path: &Path) -> Result<()> {
    c_path("chroot", path)?;
    unistd::chdir(path).map_err(|e| PosixError::os("chdir", e))?;
    unistd::chroot(path).map_err(|e| PosixError::os("chroot", e))?;
    log::info!("Changed root to {}", path.display());
    Ok(())
}

/// swapon(2) with named flags (`prefer`, `discard`).
#[cfg(target_os = "linux")]
pub fn swap_on(path: &Path, flags: &FlagSet) -> Result<()> {
    let bits = constants::assemble(Domain::SwapFlag, flags, "")?;
    let c_path = c_path("swap_on", path)?;

    // SAFETY: c_path is a valid NUL-terminated path that outlives the call.
    let rc = unsafe { libc::swapon(c_path.as_ptr(), bits) };
    if rc != 0 {
        return Err(PosixError::last_os("swapon"));
    }
    log::info!("Enabled swap on {} (flags {:#x})", path.display(), bits);
    Ok(())
}

/// swapoff(2)
#[cfg(target_os = "linux")]
pub fn swap_off(path: &Path) -> Result<()> {
    let c_path = c_path("swap_off", path)?;

    // SAFETY: c_path is a valid NUL-terminated path that outlives the call.
    let rc = unsafe { libc::swapoff(c_path.as_ptr()) };
    if rc != 0 {
        return Err(PosixError::last_os("swapoff"));
    }
    log::info!("Disabled swap on {}", path.display());
    Ok(())
}

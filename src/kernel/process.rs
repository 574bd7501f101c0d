//! Process, process-group and session identity.

use crate::config::types::{PosixError, Result};
use nix::unistd::{self, Pid};

pub fn get_pid() -> i32 {
    unistd::getpid().as_raw()
}

pub fn get_parent_pid() -> i32 {
    unistd::getppid().as_raw()
}

/// getpgid(2). `pid == 0` means the calling process.
pub fn get_process_group(pid: i32) -> Result<i32> {
    unistd::getpgid(Some(Pid::from_raw(pid)))
        .map(Pid::as_raw)
        .map_err(|e| PosixError::os("getpgid", e))
}

/// getpgrp(2)
pub fn get_current_process_group() -> i32 {
    unistd::getpgrp().as_raw()
}

/// setpgid(2). Zero for either argument means the calling process.
pub fn set_process_group(pid: i32, pgid: i32) -> Result<()> {
    unistd::setpgid(Pid::from_raw(pid), Pid::from_raw(pgid))
        .map_err(|e| PosixError::os("setpgid", e))?;
    log::info!("Moved process {} into process group {}", pid, pgid);
    Ok(())
}

/// setsid(2). Returns the new session id.
pub fn new_session() -> Result<i32> {
    let sid = unistd::setsid().map_err(|e| PosixError::os("setsid", e))?;
    log::info!("Started new session {}", sid);
    Ok(sid.as_raw())
}

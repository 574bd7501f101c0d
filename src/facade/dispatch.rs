//! Dynamic call surface: operation name plus JSON arguments.
//!
//! Argument count is checked first, then each argument's shape, and only
//! then is the typed operation invoked.

use super::args::Args;
use crate::config::types::{PosixError, Result};
use crate::kernel::{credentials, host, process, rlimit, syslog};
use serde_json::{json, Value};
use std::path::Path;

/// Every operation name [`call`] accepts.
pub const OPERATIONS: &[&str] = &[
    "get_uid",
    "get_gid",
    "set_uid",
    "set_gid",
    "get_effective_uid",
    "get_effective_gid",
    "set_effective_uid",
    "set_effective_gid",
    "set_real_and_effective_uid",
    "set_real_and_effective_gid",
    "init_supplementary_groups",
    "lookup_user",
    "lookup_group",
    "get_pid",
    "get_parent_pid",
    "get_process_group",
    "get_current_process_group",
    "set_process_group",
    "new_session",
    "get_limit",
    "set_limit",
    "open_log",
    "log",
    "set_log_mask",
    "close_log",
    "get_hostname",
    "set_hostname",
    "chroot",
    #[cfg(target_os = "linux")]
    "swap_on",
    #[cfg(target_os = "linux")]
    "swap_off",
];

/// Invoke `op` with positional JSON arguments.
///
/// Operations without a result return `Value::Null`.
pub fn call(op: &str, values: &[Value]) -> Result<Value> {
    let args = Args::new(op, values);
    log::debug!("call {} with {} argument(s)", op, values.len());

    match op {
        "get_uid" => {
            args.expect(0)?;
            Ok(json!(credentials::get_uid()))
        }
        "get_gid" => {
            args.expect(0)?;
            Ok(json!(credentials::get_gid()))
        }
        "get_effective_uid" => {
            args.expect(0)?;
            Ok(json!(credentials::get_effective_uid()))
        }
        "get_effective_gid" => {
            args.expect(0)?;
            Ok(json!(credentials::get_effective_gid()))
        }
        "set_uid" => {
            let user = args.expect(1)?.identity(0)?;
            credentials::set_uid(&user).map(unit)
        }
        "set_gid" => {
            let group = args.expect(1)?.identity(0)?;
            credentials::set_gid(&group).map(unit)
        }
        "set_effective_uid" => {
            let user = args.expect(1)?.identity(0)?;
            credentials::set_effective_uid(&user).map(unit)
        }
        "set_effective_gid" => {
            let group = args.expect(1)?.identity(0)?;
            credentials::set_effective_gid(&group).map(unit)
        }
        "set_real_and_effective_uid" => {
            args.expect(2)?;
            let (real, effective) = (args.identity(0)?, args.identity(1)?);
            credentials::set_real_and_effective_uid(&real, &effective).map(unit)
        }
        "set_real_and_effective_gid" => {
            args.expect(2)?;
            let (real, effective) = (args.identity(0)?, args.identity(1)?);
            credentials::set_real_and_effective_gid(&real, &effective).map(unit)
        }
        "init_supplementary_groups" => {
            args.expect(2)?;
            let (user, group) = (args.identity(0)?, args.identity(1)?);
            credentials::init_supplementary_groups(&user, &group).map(unit)
        }
        "lookup_user" => {
            let user = args.expect(1)?.identity(0)?;
            credentials::lookup_user(&user).map(|record| json!(record))
        }
        "lookup_group" => {
            let group = args.expect(1)?.identity(0)?;
            credentials::lookup_group(&group).map(|record| json!(record))
        }
        "get_pid" => {
            args.expect(0)?;
            Ok(json!(process::get_pid()))
        }
        "get_parent_pid" => {
            args.expect(0)?;
            Ok(json!(process::get_parent_pid()))
        }
        "get_process_group" => {
            let pid = args.expect(1)?.pid(0)?;
            process::get_process_group(pid).map(|pgid| json!(pgid))
        }
        "get_current_process_group" => {
            args.expect(0)?;
            Ok(json!(process::get_current_process_group()))
        }
        "set_process_group" => {
            args.expect(2)?;
            let (pid, pgid) = (args.pid(0)?, args.pid(1)?);
            process::set_process_group(pid, pgid).map(unit)
        }
        "new_session" => {
            args.expect(0)?;
            process::new_session().map(|sid| json!(sid))
        }
        "get_limit" => {
            let name = args.expect(1)?.string(0)?;
            rlimit::get_limit(name).map(|limit| json!(limit))
        }
        "set_limit" => {
            args.expect(2)?;
            let (name, update) = (args.string(0)?, args.limit_update(1)?);
            rlimit::set_limit(name, update).map(unit)
        }
        "open_log" => {
            args.expect(3)?;
            let (ident, options, facility) = (args.string(0)?, args.flag_set(1)?, args.string(2)?);
            syslog::open_log(ident, &options, facility).map(unit)
        }
        "log" => {
            args.expect(2)?;
            let (priority, message) = (args.string(0)?, args.string(1)?);
            syslog::log(priority, message).map(unit)
        }
        "set_log_mask" => {
            let priorities = args.expect(1)?.flag_set(0)?;
            syslog::set_log_mask(&priorities).map(|mask| json!(mask))
        }
        "close_log" => {
            args.expect(0)?;
            syslog::close_log();
            Ok(Value::Null)
        }
        "get_hostname" => {
            args.expect(0)?;
            host::get_hostname().map(Value::String)
        }
        "set_hostname" => {
            let name = args.expect(1)?.string(0)?;
            host::set_hostname(name).map(unit)
        }
        "chroot" => {
            let path = args.expect(1)?.string(0)?;
            host::chroot(Path::new(path)).map(unit)
        }
        #[cfg(target_os = "linux")]
        "swap_on" => {
            args.expect(2)?;
            let (path, flags) = (args.string(0)?, args.flag_set(1)?);
            host::swap_on(Path::new(path), &flags).map(unit)
        }
        #[cfg(target_os = "linux")]
        "swap_off" => {
            let path = args.expect(1)?.string(0)?;
            host::swap_off(Path::new(path)).map(unit)
        }
        _ => Err(PosixError::UnknownOperation(op.to_string())),
    }
}

fn unit(_: ()) -> Value {
    Value::Null
}

//! Public operation surface.
//!
//! Two ways in: the typed functions re-exported here, which take
//! [`IdentityRef`](crate::IdentityRef), [`FlagSet`](crate::FlagSet) and
//! [`LimitUpdate`](crate::LimitUpdate) directly, and [`call`], which takes an
//! operation name and JSON arguments and checks their count and shape before
//! dispatching to the same functions.

mod args;
mod dispatch;

pub use dispatch::{call, OPERATIONS};

pub use crate::kernel::credentials::{
    get_effective_gid, get_effective_uid, get_gid, get_uid, init_supplementary_groups,
    lookup_group, lookup_user, resolve_group, resolve_user, set_effective_gid, set_effective_uid,
    set_gid, set_real_and_effective_gid, set_real_and_effective_uid, set_uid,
};
pub use crate::kernel::host::{chroot, get_hostname, set_hostname};
#[cfg(target_os = "linux")]
pub use crate::kernel::host::{swap_off, swap_on};
pub use crate::kernel::process::{
    get_current_process_group, get_parent_pid, get_pid, get_process_group, new_session,
    set_process_group,
};
pub use crate::kernel::rlimit::{get_limit, set_limit, supported_limits};
pub use crate::kernel::syslog::{close_log, get_log_mask, log, open_log, set_log_mask, MASK_PREFIX};

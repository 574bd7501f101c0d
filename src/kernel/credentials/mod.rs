//! Process credentials: uid/gid reads and changes, supplementary groups,
//! and the passwd/group lookups that let callers name users and groups.
//!
//! Every user or group parameter is an [`IdentityRef`](crate::IdentityRef)
//! and is resolved before the OS primitive is called.

mod identity;
mod transition;

pub use identity::{lookup_group, lookup_user, resolve_group, resolve_user};
pub use transition::{
    get_effective_gid, get_effective_uid, get_gid, get_uid, init_supplementary_groups,
    set_effective_gid, set_effective_uid, set_gid, set_real_and_effective_gid,
    set_real_and_effective_uid, set_uid,
};

//! UID/GID reads and transitions.
//!
//! Each setter resolves its references first, then makes exactly one OS
//! call. Nothing is reordered or batched: callers that drop privilege must
//! resolve names and change the gid before the uid themselves.

use super::identity::{find_user, resolve_group, resolve_user};
use crate::config::types::{IdentityRef, PosixError, Result};
use crate::kernel::c_string;
use nix::unistd::{self, Gid, Uid};

pub fn get_uid() -> u32 {
    unistd::getuid().as_raw()
}

pub fn get_gid() -> u32 {
    unistd::getgid().as_raw()
}

pub fn get_effective_uid() -> u32 {
    unistd::geteuid().as_raw()
}

pub fn get_effective_gid() -> u32 {
    unistd::getegid().as_raw()
}

/// setuid(2)
pub fn set_uid(user: &IdentityRef) -> Result<()> {
    let uid = resolve_user(user)?;
    unistd::setuid(Uid::from_raw(uid)).map_err(|e| PosixError::os("setuid", e))?;
    log::info!("Set UID to {}", uid);
    Ok(())
}

/// setgid(2)
pub fn set_gid(group: &IdentityRef) -> Result<()> {
    let gid = resolve_group(group)?;
    unistd::setgid(Gid::from_raw(gid)).map_err(|e| PosixError::os("setgid", e))?;
    log::info!("Set GID to {}", gid);
    Ok(())
}

/// seteuid(2)
pub fn set_effective_uid(user: &IdentityRef) -> Result<()> {
    let euid = resolve_user(user)?;
    unistd::seteuid(Uid::from_raw(euid)).map_err(|e| PosixError::os("seteuid", e))?;
    log::info!("Set effective UID to {}", euid);
    Ok(())
}

/// setegid(2)
pub fn set_effective_gid(group: &IdentityRef) -> Result<()> {
    let egid = resolve_group(group)?;
    unistd::setegid(Gid::from_raw(egid)).map_err(|e| PosixError::os("setegid", e))?;
    log::info!("Set effective GID to {}", egid);
    Ok(())
}

/// setreuid(2). Both references are resolved before the call.
pub fn set_real_and_effective_uid(real: &IdentityRef, effective: &IdentityRef) -> Result<()> {
    let ruid = resolve_user(real)?;
    let euid = resolve_user(effective)?;

    // SAFETY: setreuid takes two plain integers and touches no memory.
    let rc = unsafe { libc::setreuid(ruid as libc::uid_t, euid as libc::uid_t) };
    if rc != 0 {
        return Err(PosixError::last_os("setreuid"));
    }

    log::info!("Set real UID to {}, effective UID to {}", ruid, euid);
    Ok(())
}

/// setregid(2). Both references are resolved before the call.
pub fn set_real_and_effective_gid(real: &IdentityRef, effective: &IdentityRef) -> Result<()> {
    let rgid = resolve_group(real)?;
    let egid = resolve_group(effective)?;

    // SAFETY: setregid takes two plain integers and touches no memory.
    let rc = unsafe { libc::setregid(rgid as libc::gid_t, egid as libc::gid_t) };
    if rc != 0 {
        return Err(PosixError::last_os("setregid"));
    }

    log::info!("Set real GID to {}, effective GID to {}", rgid, egid);
    Ok(())
}

/// initgroups(3): load `user`'s supplementary groups, plus `group`.
///
/// The user must have a passwd entry whichever way it is named; initgroups
/// itself would accept an unknown name and leave only `group`.
pub fn init_supplementary_groups(user: &IdentityRef, group: &IdentityRef) -> Result<()> {
    let name = find_user(user)?.name;
    let gid = resolve_group(group)?;
    let c_name = c_string("init_supplementary_groups", 0, &name, "a name without NUL bytes")?;

    // SAFETY: c_name is a valid NUL-terminated string that outlives the call.
    let rc = unsafe { libc::initgroups(c_name.as_ptr(), gid as _) };
    if rc != 0 {
        return Err(PosixError::last_os("initgroups"));
    }

    log::info!("Initialized supplementary groups for {} with GID {}", name, gid);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::IdentityKind;

    #[test]
    fn getters_match_nix() {
        assert_eq!(get_uid(), unistd::getuid().as_raw());
        assert_eq!(get_effective_gid(), unistd::getegid().as_raw());
    }

    #[test]
    fn setting_current_effective_uid_is_a_noop() {
        // seteuid to the current euid is always permitted.
        let euid = get_effective_uid();
        set_effective_uid(&IdentityRef::Numeric(euid)).unwrap();
        assert_eq!(get_effective_uid(), euid);
    }

    #[test]
    fn setting_current_real_and_effective_gid_is_a_noop() {
        let (rgid, egid) = (get_gid(), get_effective_gid());
        set_real_and_effective_gid(&rgid.into(), &egid.into()).unwrap();
        assert_eq!((get_gid(), get_effective_gid()), (rgid, egid));
    }

    #[test]
    fn unknown_names_fail_before_the_syscall() {
        let err = set_effective_uid(&"nonexistent-name-xyz".into()).unwrap_err();
        assert!(matches!(err, PosixError::NoSuchIdentity { kind: IdentityKind::User, .. }));

        let err = set_real_and_effective_gid(&"dummyzzz1234".into(), &IdentityRef::Numeric(0)).unwrap_err();
        assert!(matches!(err, PosixError::NoSuchIdentity { kind: IdentityKind::Group, .. }));
    }

    #[test]
    fn initgroups_rejects_unknown_group_before_the_syscall() {
        let err = init_supplementary_groups(&"root".into(), &"dummyzzz1234".into()).unwrap_err();
        assert!(matches!(err, PosixError::NoSuchIdentity { kind: IdentityKind::Group, .. }));
    }

    #[test]
    fn initgroups_rejects_unknown_user_name() {
        let err = init_supplementary_groups(&"nonexistent-name-xyz".into(), &IdentityRef::Numeric(0)).unwrap_err();
        assert!(matches!(err, PosixError::NoSuchIdentity { kind: IdentityKind::User, .. }));
    }

    #[test]
    fn initgroups_rejects_uid_without_passwd_entry() {
        let err = init_supplementary_groups(&IdentityRef::Numeric(4_000_000_000), &IdentityRef::Numeric(0)).unwrap_err();
        assert!(matches!(err, PosixError::NoSuchIdentity { kind: IdentityKind::User, .. }));
    }

    #[test]
    fn initgroups_rejects_empty_user_name() {
        assert!(matches!(
            init_supplementary_groups(&"".into(), &IdentityRef::Numeric(0)),
            Err(PosixError::MissingArgument(_))
        ));
    }
}

//! Name -> id resolution against the passwd and group databases.

use crate::config::types::{GroupRecord, IdentityKind, IdentityRef, PosixError, Result, UserRecord};
use nix::errno::Errno;
use nix::unistd::{Gid, Group, Uid, User};

/// Numeric refs pass through untouched; names go through getpwnam.
pub fn resolve_user(reference: &IdentityRef) -> Result<u32> {
    match reference {
        IdentityRef::Numeric(uid) => Ok(*uid),
        IdentityRef::Named(_) => find_user(reference).map(|user| user.uid.as_raw()),
    }
}

/// Numeric refs pass through untouched; names go through getgrnam.
pub fn resolve_group(reference: &IdentityRef) -> Result<u32> {
    match reference {
        IdentityRef::Numeric(gid) => Ok(*gid),
        IdentityRef::Named(_) => find_group(reference).map(|group| group.gid.as_raw()),
    }
}

/// Full passwd entry, by name or by uid.
pub fn lookup_user(reference: &IdentityRef) -> Result<UserRecord> {
    find_user(reference).map(user_record)
}

/// Full group entry, by name or by gid.
pub fn lookup_group(reference: &IdentityRef) -> Result<GroupRecord> {
    find_group(reference).map(group_record)
}

pub(crate) fn find_user(reference: &IdentityRef) -> Result<User> {
    let found = match reference {
        IdentityRef::Numeric(uid) => {
            absent_on_errno("getpwuid", User::from_uid(Uid::from_raw(*uid)))?
        }
        IdentityRef::Named(name) => {
            if name.is_empty() {
                return Err(PosixError::MissingArgument("user name"));
            }
            absent_on_errno("getpwnam", User::from_name(name))?
        }
    };

    log::debug!("passwd lookup for {}: found={}", reference, found.is_some());
    found.ok_or_else(|| no_such(IdentityKind::User, reference))
}

pub(crate) fn find_group(reference: &IdentityRef) -> Result<Group> {
    let found = match reference {
        IdentityRef::Numeric(gid) => {
            absent_on_errno("getgrgid", Group::from_gid(Gid::from_raw(*gid)))?
        }
        IdentityRef::Named(name) => {
            if name.is_empty() {
                return Err(PosixError::MissingArgument("group name"));
            }
            absent_on_errno("getgrnam", Group::from_name(name))?
        }
    };

    log::debug!("group lookup for {}: found={}", reference, found.is_some());
    found.ok_or_else(|| no_such(IdentityKind::Group, reference))
}

fn no_such(kind: IdentityKind, reference: &IdentityRef) -> PosixError {
    PosixError::NoSuchIdentity {
        kind,
        reference: reference.to_string(),
    }
}

/// Some libcs report a missing entry through errno instead of a null result.
fn absent_on_errno<T>(op: &'static str, found: nix::Result<Option<T>>) -> Result<Option<T>> {
    match found {
        Ok(entry) => Ok(entry),
        Err(Errno::ENOENT) | Err(Errno::ESRCH) => Ok(None),
        Err(errno) => Err(PosixError::os(op, errno)),
    }
}

fn user_record(user: User) -> UserRecord {
    UserRecord {
        uid: user.uid.as_raw(),
        gid: user.gid.as_raw(),
        passwd: user.passwd.to_string_lossy().into_owned(),
        #[cfg(not(target_os = "android"))]
        gecos: Some(user.gecos.to_string_lossy().into_owned()),
        #[cfg(target_os = "android")]
        gecos: None,
        shell: user.shell,
        dir: user.dir,
        name: user.name,
    }
}

fn group_record(group: Group) -> GroupRecord {
    GroupRecord {
        gid: group.gid.as_raw(),
        passwd: group.passwd.to_string_lossy().into_owned(),
        members: group.mem,
        name: group.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_user_ref_is_returned_unchanged() {
        for uid in [0u32, 1000, 65534, 4_000_000_000] {
            assert_eq!(resolve_user(&IdentityRef::Numeric(uid)).unwrap(), uid);
        }
    }

    #[test]
    fn numeric_group_ref_is_returned_unchanged() {
        assert_eq!(resolve_group(&IdentityRef::Numeric(4242)).unwrap(), 4242);
    }

    #[test]
    fn unknown_user_name_is_no_such_identity() {
        let err = resolve_user(&"nonexistent-name-xyz".into()).unwrap_err();
        assert!(matches!(
            err,
            PosixError::NoSuchIdentity {
                kind: IdentityKind::User,
                ..
            }
        ));
    }

    #[test]
    fn unknown_group_name_is_no_such_identity() {
        let err = resolve_group(&"dummyzzz1234".into()).unwrap_err();
        assert!(matches!(
            err,
            PosixError::NoSuchIdentity {
                kind: IdentityKind::Group,
                ..
            }
        ));
    }

    #[test]
    fn empty_name_is_missing_argument() {
        assert!(matches!(
            resolve_user(&"".into()),
            Err(PosixError::MissingArgument(_))
        ));
        assert!(matches!(
            resolve_group(&"".into()),
            Err(PosixError::MissingArgument(_))
        ));
    }

    #[test]
    fn root_resolves_by_name_and_id() {
        // Every passwd database we run on has uid 0.
        let by_id = lookup_user(&IdentityRef::Numeric(0)).unwrap();
        assert_eq!(by_id.uid, 0);
        let by_name = lookup_user(&IdentityRef::Named(by_id.name.clone())).unwrap();
        assert_eq!(by_name, by_id);
        assert_eq!(resolve_user(&IdentityRef::Named(by_id.name)).unwrap(), 0);
    }

    #[test]
    fn root_group_resolves_by_name_and_id() {
        let group = lookup_group(&IdentityRef::Numeric(0)).unwrap();
        assert_eq!(group.gid, 0);
        assert_eq!(resolve_group(&IdentityRef::Named(group.name.clone())).unwrap(), 0);
    }
}

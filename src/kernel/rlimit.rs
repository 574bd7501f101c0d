//! Resource limits by name.
//!
//! `RLIM_INFINITY` never crosses this boundary as an integer: reads map it to
//! [`LimitValue::Unbounded`] and writes reject a `Finite` value equal to it.
//! Soft/hard ordering is left to the kernel; values are never clamped.

use crate::config::types::{LimitUpdate, LimitValue, PosixError, ResourceLimit, Result};
use crate::constants::{self, ConstValue, Domain};

/// Current soft and hard bound of the named resource.
pub fn get_limit(name: &str) -> Result<ResourceLimit> {
    let resource = resolve_resource(name)?;
    let raw = read_raw(resource)?;
    let limit = ResourceLimit {
        soft: from_raw(raw.rlim_cur),
        hard: from_raw(raw.rlim_max),
    };
    log::debug!("getrlimit {}: soft={} hard={}", name, limit.soft, limit.hard);
    Ok(limit)
}

/// Apply `update` to the named resource. A side left as `None` keeps its
/// current value, read from the OS just before the write.
pub fn set_limit(name: &str, update: LimitUpdate) -> Result<()> {
    let resource = resolve_resource(name)?;
    let (soft, hard) = check_update(&update)?;

    let limit = match (soft, hard) {
        (Some(rlim_cur), Some(rlim_max)) => libc::rlimit { rlim_cur, rlim_max },
        (soft, hard) => {
            let current = read_raw(resource)?;
            libc::rlimit {
                rlim_cur: soft.unwrap_or(current.rlim_cur),
                rlim_max: hard.unwrap_or(current.rlim_max),
            }
        }
    };

    // SAFETY: setrlimit reads a fully initialized rlimit struct; resource
    // comes from the platform's own RLIMIT_* constants.
    let rc = unsafe { libc::setrlimit(resource as _, &limit) };
    if rc != 0 {
        return Err(PosixError::last_os("setrlimit"));
    }

    log::info!(
        "setrlimit {}: soft={} hard={}",
        name,
        from_raw(limit.rlim_cur),
        from_raw(limit.rlim_max)
    );
    Ok(())
}

/// Names of every resource limit this platform supports, in table order.
pub fn supported_limits() -> impl Iterator<Item = &'static str> {
    constants::entries(Domain::RlimitResource)
        .iter()
        .map(|(name, _)| *name)
}

/// Rejections `set_limit` makes before touching the OS: an update with
/// neither side, or a finite value the platform cannot represent.
pub(crate) fn check_update(update: &LimitUpdate) -> Result<(Option<libc::rlim_t>, Option<libc::rlim_t>)> {
    if update.is_empty() {
        return Err(PosixError::MissingArgument("soft or hard limit"));
    }
    let soft = update.soft.map(|v| to_raw("set_limit", v)).transpose()?;
    let hard = update.hard.map(|v| to_raw("set_limit", v)).transpose()?;
    Ok((soft, hard))
}

fn resolve_resource(name: &str) -> Result<ConstValue> {
    if name.is_empty() {
        return Err(PosixError::MissingArgument("resource name"));
    }
    constants::lookup(Domain::RlimitResource, name)
}

fn read_raw(resource: ConstValue) -> Result<libc::rlimit> {
    let mut limit = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    // SAFETY: getrlimit writes into the rlimit we own; resource is a platform
    // RLIMIT_* constant.
    let rc = unsafe { libc::getrlimit(resource as _, &mut limit) };
    if rc != 0 {
        return Err(PosixError::last_os("getrlimit"));
    }
    Ok(limit)
}

fn from_raw(value: libc::rlim_t) -> LimitValue {
    if value == libc::RLIM_INFINITY {
        LimitValue::Unbounded
    } else {
        LimitValue::Finite(value as u64)
    }
}

fn to_raw(op: &str, value: LimitValue) -> Result<libc::rlim_t> {
    match value {
        LimitValue::Unbounded => Ok(libc::RLIM_INFINITY),
        LimitValue::Finite(v) => match libc::rlim_t::try_from(v) {
            Ok(raw) if raw != libc::RLIM_INFINITY => Ok(raw),
            _ => Err(PosixError::type_mismatch(
                op,
                1,
                "a limit below RLIM_INFINITY, or null for unbounded",
            )),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_limit_is_readable() {
        for name in supported_limits() {
            let limit = get_limit(name).unwrap();
            if let (Some(soft), Some(hard)) = (limit.soft.finite(), limit.hard.finite()) {
                assert!(soft <= hard, "{}: soft {} > hard {}", name, soft, hard);
            }
        }
    }

    #[test]
    fn unknown_resource_is_rejected() {
        assert!(matches!(
            get_limit("foobar"),
            Err(PosixError::UnknownConstant { .. })
        ));
        assert!(matches!(
            set_limit("foobar", LimitUpdate::soft(LimitValue::Finite(100))),
            Err(PosixError::UnknownConstant { .. })
        ));
    }

    #[test]
    fn empty_resource_name_is_missing_argument() {
        assert!(matches!(get_limit(""), Err(PosixError::MissingArgument(_))));
    }

    #[test]
    fn set_limit_requires_one_side() {
        assert!(matches!(
            set_limit("nofile", LimitUpdate::default()),
            Err(PosixError::MissingArgument(_))
        ));
    }

    #[test]
    fn infinity_sentinel_is_not_a_finite_value() {
        let err = to_raw("set_limit", LimitValue::Finite(libc::RLIM_INFINITY as u64)).unwrap_err();
        assert!(matches!(err, PosixError::TypeMismatch { .. }));
        assert_eq!(to_raw("set_limit", LimitValue::Unbounded).unwrap(), libc::RLIM_INFINITY);
        assert_eq!(from_raw(libc::RLIM_INFINITY), LimitValue::Unbounded);
        assert_eq!(from_raw(7), LimitValue::Finite(7));
    }

    #[test]
    fn check_update_rejects_infinity_as_finite() {
        let update = LimitUpdate::soft(LimitValue::Finite(libc::RLIM_INFINITY as u64));
        assert!(matches!(check_update(&update), Err(PosixError::TypeMismatch { .. })));
        assert_eq!(
            check_update(&LimitUpdate::hard(LimitValue::Finite(64))).unwrap(),
            (None, Some(64))
        );
    }

    #[test]
    fn core_limit_write_back_is_a_noop() {
        let before = get_limit("core").unwrap();
        set_limit("core", before.into()).unwrap();
        assert_eq!(get_limit("core").unwrap(), before);
    }
}

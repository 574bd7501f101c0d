//! Symbolic constant tables.
//!
//! One table per domain, mapping the names callers use ("nofile", "daemon",
//! "mask_err", ...) to the integers the OS primitives take. Tables are built
//! on first use from the target's libc constants and never change afterwards,
//! so lookups need no locking.
//!
//! Some constants are legitimately zero (`LOG_KERN`, `LOG_EMERG`,
//! `RLIMIT_CPU` on Linux). Unknown names always fail.

mod flags;
mod tables;

pub use flags::{assemble, decode};

use crate::config::types::{PosixError, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Integer type every table value is expressed in
pub type ConstValue = libc::c_int;

/// Constant namespaces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Domain {
    RlimitResource,
    SyslogFacility,
    SyslogPriority,
    SyslogOption,
    /// `mask_<priority>` names, valued `LOG_MASK(priority)`
    SyslogMask,
    /// swapon(2) flags, Linux only
    SwapFlag,
}

impl Domain {
    pub const ALL: [Domain; 6] = [
        Domain::RlimitResource,
        Domain::SyslogFacility,
        Domain::SyslogPriority,
        Domain::SyslogOption,
        Domain::SyslogMask,
        Domain::SwapFlag,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Domain::RlimitResource => "rlimit resource",
            Domain::SyslogFacility => "syslog facility",
            Domain::SyslogPriority => "syslog priority",
            Domain::SyslogOption => "syslog option",
            Domain::SyslogMask => "syslog mask",
            Domain::SwapFlag => "swap flag",
        }
    }
}

struct Table {
    entries: &'static [(&'static str, ConstValue)],
    index: HashMap<&'static str, ConstValue>,
    aliases: &'static [(&'static str, &'static str)],
    elsewhere: &'static [&'static str],
}

impl Table {
    fn new(
        entries: &'static [(&'static str, ConstValue)],
        aliases: &'static [(&'static str, &'static str)],
        elsewhere: &'static [&'static str],
    ) -> Self {
        Self {
            entries,
            index: entries.iter().copied().collect(),
            aliases,
            elsewhere,
        }
    }

    fn canonical(&self, name: &str) -> Option<(&'static str, ConstValue)> {
        if let Some((key, value)) = self.index.get_key_value(name) {
            return Some((*key, *value));
        }
        self.aliases
            .iter()
            .find(|(alias, _)| *alias == name)
            .and_then(|(_, target)| self.index.get_key_value(*target))
            .map(|(key, value)| (*key, *value))
    }

    fn resolve(&self, domain: Domain, name: &str) -> Result<(&'static str, ConstValue)> {
        if let Some(found) = self.canonical(name) {
            return Ok(found);
        }
        let name = name.to_string();
        if self.elsewhere.iter().any(|known| *known == name) {
            return Err(PosixError::UnsupportedOnPlatform { domain: domain.name(), name });
        }
        Err(PosixError::UnknownConstant { domain: domain.name(), name })
    }
}

struct ConstantTables {
    rlimit: Table,
    facility: Table,
    priority: Table,
    option: Table,
    mask: Table,
    swap: Table,
}

impl ConstantTables {
    fn table(&self, domain: Domain) -> &Table {
        match domain {
            Domain::RlimitResource => &self.rlimit,
            Domain::SyslogFacility => &self.facility,
            Domain::SyslogPriority => &self.priority,
            Domain::SyslogOption => &self.option,
            Domain::SyslogMask => &self.mask,
            Domain::SwapFlag => &self.swap,
        }
    }
}

static TABLES: Lazy<ConstantTables> = Lazy::new(|| ConstantTables {
    rlimit: Table::new(tables::RLIMIT, &[], tables::RLIMIT_ELSEWHERE),
    facility: Table::new(tables::SYSLOG_FACILITY, &[], tables::SYSLOG_FACILITY_ELSEWHERE),
    priority: Table::new(tables::SYSLOG_PRIORITY, tables::SYSLOG_PRIORITY_ALIASES, &[]),
    option: Table::new(tables::SYSLOG_OPTION, &[], tables::SYSLOG_OPTION_ELSEWHERE),
    mask: Table::new(tables::SYSLOG_MASK, tables::SYSLOG_MASK_ALIASES, &[]),
    swap: Table::new(tables::SWAP_FLAG, &[], tables::SWAP_FLAG_ELSEWHERE),
});

/// Resolve `name` in `domain`.
///
/// Fails with `UnsupportedOnPlatform` for names that exist on other OS
/// families only, and `UnknownConstant` for everything else not in the table.
pub fn lookup(domain: Domain, name: &str) -> Result<ConstValue> {
    canonical(domain, name).map(|(_, value)| value)
}

/// Like [`lookup`], but also reports the canonical spelling (aliases resolved).
pub fn canonical(domain: Domain, name: &str) -> Result<(&'static str, ConstValue)> {
    TABLES.table(domain).resolve(domain, name)
}

pub fn contains(domain: Domain, name: &str) -> bool {
    TABLES.table(domain).canonical(name).is_some()
}

/// Canonical entries of `domain`, in table order. Aliases are not included.
pub fn entries(domain: Domain) -> &'static [(&'static str, ConstValue)] {
    TABLES.table(domain).entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_returns_libc_values() {
        assert_eq!(lookup(Domain::RlimitResource, "nofile").unwrap(), libc::RLIMIT_NOFILE as ConstValue);
        assert_eq!(lookup(Domain::SyslogFacility, "daemon").unwrap(), libc::LOG_DAEMON);
        assert_eq!(lookup(Domain::SyslogPriority, "debug").unwrap(), libc::LOG_DEBUG);
        assert_eq!(lookup(Domain::SyslogOption, "pid").unwrap(), libc::LOG_PID);
        assert_eq!(lookup(Domain::SyslogMask, "mask_err").unwrap(), 1 << libc::LOG_ERR);
    }

    #[test]
    fn documented_zero_constants_resolve() {
        assert_eq!(lookup(Domain::SyslogFacility, "kern").unwrap(), 0);
        assert_eq!(lookup(Domain::SyslogPriority, "emerg").unwrap(), 0);
    }

    #[test]
    fn unknown_name_fails_in_every_domain() {
        for domain in Domain::ALL {
            let err = lookup(domain, "foobar").unwrap_err();
            assert!(
                matches!(err, PosixError::UnknownConstant { ref name, .. } if name == "foobar"),
                "{:?} returned {:?}",
                domain,
                err
            );
        }
    }

    #[test]
    fn empty_name_is_unknown() {
        assert!(matches!(
            lookup(Domain::RlimitResource, ""),
            Err(PosixError::UnknownConstant { .. })
        ));
    }

    #[test]
    fn names_do_not_leak_across_domains() {
        assert!(lookup(Domain::SyslogFacility, "pid").is_err());
        assert!(lookup(Domain::SyslogOption, "daemon").is_err());
        assert!(lookup(Domain::SyslogPriority, "mask_err").is_err());
        assert!(lookup(Domain::SyslogMask, "err").is_err());
    }

    #[test]
    fn aliases_resolve_to_canonical_entries() {
        assert_eq!(
            canonical(Domain::SyslogPriority, "error").unwrap(),
            ("err", libc::LOG_ERR)
        );
        assert_eq!(
            canonical(Domain::SyslogMask, "mask_warn").unwrap(),
            ("mask_warning", 1 << libc::LOG_WARNING)
        );
        assert!(!entries(Domain::SyslogPriority).iter().any(|(n, _)| *n == "error"));
    }

    #[test]
    fn mask_table_mirrors_priority_table() {
        let priorities = entries(Domain::SyslogPriority);
        let masks = entries(Domain::SyslogMask);
        assert_eq!(priorities.len(), masks.len());
        for ((pname, pval), (mname, mval)) in priorities.iter().zip(masks) {
            assert_eq!(*mname, format!("mask_{}", pname));
            assert_eq!(*mval, 1 << pval);
        }
    }

    #[test]
    fn mask_bits_are_distinct() {
        let combined = entries(Domain::SyslogMask)
            .iter()
            .fold(0, |acc, (_, bit)| {
                assert_eq!(acc & bit, 0);
                acc | bit
            });
        assert_eq!(combined, 0xff);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_exposes_extended_rlimits() {
        for name in ["nproc", "as", "memlock", "rtprio", "rttime"] {
            assert!(contains(Domain::RlimitResource, name), "{} missing", name);
        }
    }

    #[cfg(not(any(
        target_os = "linux",
        target_os = "android",
        target_vendor = "apple",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    )))]
    #[test]
    fn nproc_is_unsupported_elsewhere() {
        assert!(matches!(
            lookup(Domain::RlimitResource, "nproc"),
            Err(PosixError::UnsupportedOnPlatform { .. })
        ));
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn linux_only_rlimits_are_unsupported() {
        assert!(matches!(
            lookup(Domain::RlimitResource, "rttime"),
            Err(PosixError::UnsupportedOnPlatform { .. })
        ));
    }

    #[test]
    fn names_known_elsewhere_are_unsupported_not_unknown() {
        static HERE: &[(&str, ConstValue)] = &[("here", 1)];
        let table = Table::new(HERE, &[], &["there"]);

        assert_eq!(table.resolve(Domain::RlimitResource, "here").unwrap(), ("here", 1));
        assert!(matches!(
            table.resolve(Domain::RlimitResource, "there"),
            Err(PosixError::UnsupportedOnPlatform { domain: "rlimit resource", ref name }) if name == "there"
        ));
        assert!(matches!(
            table.resolve(Domain::RlimitResource, "nowhere"),
            Err(PosixError::UnknownConstant { .. })
        ));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn swap_flags_match_kernel_abi() {
        assert_eq!(lookup(Domain::SwapFlag, "prefer").unwrap(), 0x8000);
        assert_eq!(lookup(Domain::SwapFlag, "discard").unwrap(), 0x10000);
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn swap_flags_are_unsupported_off_linux() {
        assert!(matches!(
            lookup(Domain::SwapFlag, "prefer"),
            Err(PosixError::UnsupportedOnPlatform { .. })
        ));
    }

    #[test]
    fn tables_are_readable_from_many_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| lookup(Domain::SyslogOption, "ndelay").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), libc::LOG_NDELAY);
        }
    }
}

// Profile validation
// Runs the same argument checks the kernel wrappers run, without touching
// process state, so apply can refuse a bad profile before its first side
// effect.

use crate::config::profile::{IdentityProfile, ProcessProfile, SyslogProfile};
use crate::config::types::{LimitUpdate, LimitValue};
use crate::constants::{self, Domain};
use crate::kernel::credentials::{lookup_user, resolve_group, resolve_user};
use crate::kernel::syslog::{ident_c_string, MASK_PREFIX};
use crate::kernel::{host, rlimit};

/// Validation result with detailed errors
#[derive(Debug)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Check every section of `profile`. Lookups only; nothing is applied.
pub fn validate_profile(profile: &ProcessProfile) -> ValidationResult {
    let mut result = ValidationResult::new();

    if let Some(hostname) = &profile.hostname {
        if let Err(e) = host::check_hostname(hostname) {
            result.add_error(format!("hostname: {}", e));
        }
    }

    for (name, update) in &profile.limits {
        validate_limit(name, update, &mut result);
    }

    if let Some(syslog) = &profile.syslog {
        validate_syslog(syslog, &mut result);
    }

    if let Some(identity) = &profile.identity {
        validate_identity(identity, &mut result);
    }

    result
}

fn validate_limit(name: &str, update: &LimitUpdate, result: &mut ValidationResult) {
    if let Err(e) = constants::lookup(Domain::RlimitResource, name) {
        result.add_error(format!("limits.{}: {}", name, e));
        return;
    }

    if let Err(e) = rlimit::check_update(update) {
        result.add_error(format!("limits.{}: {}", name, e));
    }

    if let (Some(LimitValue::Finite(soft)), Some(LimitValue::Finite(hard))) = (update.soft, update.hard) {
        if soft > hard {
            result.add_warning(format!(
                "limits.{}: soft {} exceeds hard {}, the kernel will reject it",
                name, soft, hard
            ));
        }
    }
}

fn validate_syslog(syslog: &SyslogProfile, result: &mut ValidationResult) {
    if let Err(e) = ident_c_string(&syslog.ident) {
        result.add_error(format!("syslog.ident: {}", e));
    }
    if let Err(e) = constants::lookup(Domain::SyslogFacility, &syslog.facility) {
        result.add_error(format!("syslog.facility: {}", e));
    }
    if let Err(e) = constants::assemble(Domain::SyslogOption, &syslog.options, "") {
        result.add_error(format!("syslog.options: {}", e));
    }
    if let Some(mask) = &syslog.mask {
        match constants::assemble(Domain::SyslogMask, mask, MASK_PREFIX) {
            Ok(0) => result.add_warning(
                "syslog.mask enables no priority; setlogmask(0) leaves the mask unchanged".to_string(),
            ),
            Ok(_) => {}
            Err(e) => result.add_error(format!("syslog.mask: {}", e)),
        }
    }
}

fn validate_identity(identity: &IdentityProfile, result: &mut ValidationResult) {
    if let Some(user) = &identity.user {
        // initgroups needs a passwd entry even for a numeric user.
        let uid = if identity.init_groups {
            lookup_user(user).map(|record| record.uid)
        } else {
            resolve_user(user)
        };
        match uid {
            Ok(0) => result.add_warning("identity.user resolves to root; privileges are kept".to_string()),
            Ok(_) => {}
            Err(e) => result.add_error(format!("identity.user: {}", e)),
        }
    }

    if let Some(group) = &identity.group {
        if let Err(e) = resolve_group(group) {
            result.add_error(format!("identity.group: {}", e));
        }
    }

    if identity.init_groups && identity.user.is_none() {
        result.add_error("identity.init_groups requires identity.user".to_string());
    }
}

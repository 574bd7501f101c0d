/// Process profile loading from JSON
use crate::config::types::{FlagSet, IdentityRef, LimitUpdate, PosixError, Result};
use crate::config::validator::validate_profile;
use crate::kernel::{credentials, host, rlimit, syslog};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Declarative process setup: hostname, limits, syslog and target identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessProfile {
    #[serde(default)]
    pub hostname: Option<String>,
    /// Resource name -> new bounds
    #[serde(default)]
    pub limits: BTreeMap<String, LimitUpdate>,
    #[serde(default)]
    pub syslog: Option<SyslogProfile>,
    #[serde(default)]
    pub identity: Option<IdentityProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyslogProfile {
    pub ident: String,
    pub facility: String,
    #[serde(default)]
    pub options: FlagSet,
    /// Priority names to let through; `None` leaves the mask alone
    #[serde(default)]
    pub mask: Option<FlagSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityProfile {
    #[serde(default)]
    pub user: Option<IdentityRef>,
    #[serde(default)]
    pub group: Option<IdentityRef>,
    /// Load the user's supplementary groups before switching
    #[serde(default)]
    pub init_groups: bool,
}

impl ProcessProfile {
    /// Load a profile from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            PosixError::Config(format!(
                "Failed to read profile {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| PosixError::Config(format!("Failed to parse profile JSON: {}", e)))
    }

    /// Validate, then apply in a fixed order: hostname, limits, syslog,
    /// supplementary groups, gid, uid.
    ///
    /// Root-only steps come before the identity switch, and the gid changes
    /// before the uid so the uid change cannot strand it.
    pub fn apply(&self) -> Result<()> {
        let validation = validate_profile(self);
        for warning in &validation.warnings {
            log::warn!("Profile: {}", warning);
        }
        if !validation.is_valid() {
            return Err(PosixError::Config(format!(
                "Profile validation failed:\n{}",
                validation.errors.join("\n")
            )));
        }

        if let Some(hostname) = &self.hostname {
            host::set_hostname(hostname)?;
        }

        for (name, update) in &self.limits {
            rlimit::set_limit(name, *update)?;
        }

        if let Some(log_setup) = &self.syslog {
            syslog::open_log(&log_setup.ident, &log_setup.options, &log_setup.facility)?;
            if let Some(mask) = &log_setup.mask {
                let active = syslog::set_log_mask(mask)?;
                log::info!("Profile: active log mask {:?}", active);
            }
        }

        if let Some(identity) = &self.identity {
            apply_identity(identity)?;
        }

        log::info!("Profile applied");
        Ok(())
    }
}

fn apply_identity(identity: &IdentityProfile) -> Result<()> {
    // Resolve everything while the passwd/group databases are still readable.
    let uid = identity.user.as_ref().map(credentials::resolve_user).transpose()?;
    let gid = match &identity.group {
        Some(group) => Some(credentials::resolve_group(group)?),
        None => match &identity.user {
            Some(user) if identity.init_groups => Some(credentials::lookup_user(user)?.gid),
            _ => None,
        },
    };

    if identity.init_groups {
        if let (Some(user), Some(gid)) = (&identity.user, gid) {
            credentials::init_supplementary_groups(user, &IdentityRef::Numeric(gid))?;
        }
    }
    if let Some(gid) = gid {
        credentials::set_gid(&IdentityRef::Numeric(gid))?;
    }
    if let Some(uid) = uid {
        credentials::set_uid(&IdentityRef::Numeric(uid))?;
    }
    Ok(())
}

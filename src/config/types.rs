/// Core types and structures shared across posixkit
use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Named boolean options, keyed by symbolic constant name.
///
/// Ordered so that decoded read-backs are deterministic.
pub type FlagSet = BTreeMap<String, bool>;

/// A user or group reference: either an id the OS understands directly,
/// or a name to be resolved through the passwd/group databases.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdentityRef {
    Numeric(u32),
    Named(String),
}

impl From<u32> for IdentityRef {
    fn from(id: u32) -> Self {
        IdentityRef::Numeric(id)
    }
}

impl From<&str> for IdentityRef {
    fn from(name: &str) -> Self {
        IdentityRef::Named(name.to_string())
    }
}

impl From<String> for IdentityRef {
    fn from(name: String) -> Self {
        IdentityRef::Named(name)
    }
}

impl fmt::Display for IdentityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityRef::Numeric(id) => write!(f, "{}", id),
            IdentityRef::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Which identity database a lookup went to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityKind {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "group")]
    Group,
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKind::User => f.write_str("user"),
            IdentityKind::Group => f.write_str("group"),
        }
    }
}

/// One side of a resource limit.
///
/// `Unbounded` is the only encoding of `RLIM_INFINITY`; it serializes as `null`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LimitValue {
    Finite(u64),
    Unbounded,
}

impl LimitValue {
    pub fn is_unbounded(self) -> bool {
        matches!(self, LimitValue::Unbounded)
    }

    pub fn finite(self) -> Option<u64> {
        match self {
            LimitValue::Finite(v) => Some(v),
            LimitValue::Unbounded => None,
        }
    }
}

impl fmt::Display for LimitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitValue::Finite(v) => write!(f, "{}", v),
            LimitValue::Unbounded => f.write_str("unlimited"),
        }
    }
}

/// Soft and hard bound of a resource limit, as read from the OS
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimit {
    pub soft: LimitValue,
    pub hard: LimitValue,
}

/// Requested change to a resource limit. A side left as `None` keeps its
/// current OS value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitUpdate {
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub soft: Option<LimitValue>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub hard: Option<LimitValue>,
}

/// A present key always yields `Some`, so `"hard": null` means unbounded
/// rather than "keep current".
fn deserialize_present<'de, D>(deserializer: D) -> std::result::Result<Option<LimitValue>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    LimitValue::deserialize(deserializer).map(Some)
}

impl LimitUpdate {
    pub fn soft(value: LimitValue) -> Self {
        Self {
            soft: Some(value),
            hard: None,
        }
    }

    pub fn hard(value: LimitValue) -> Self {
        Self {
            soft: None,
            hard: Some(value),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.soft.is_none() && self.hard.is_none()
    }
}

impl From<ResourceLimit> for LimitUpdate {
    fn from(limit: ResourceLimit) -> Self {
        Self {
            soft: Some(limit.soft),
            hard: Some(limit.hard),
        }
    }
}

/// passwd database entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    pub passwd: String,
    pub uid: u32,
    pub gid: u32,
    /// Absent on platforms whose passwd struct has no gecos field
    pub gecos: Option<String>,
    pub shell: PathBuf,
    pub dir: PathBuf,
}

/// group database entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub name: String,
    pub passwd: String,
    pub gid: u32,
    pub members: Vec<String>,
}

/// Custom error types for posixkit
#[derive(Error, Debug)]
pub enum PosixError {
    #[error("unknown {domain} constant: {name}")]
    UnknownConstant { domain: &'static str, name: String },

    #[error("{domain} constant {name} is not supported on this platform")]
    UnsupportedOnPlatform { domain: &'static str, name: String },

    #[error("{kind} {reference} does not exist")]
    NoSuchIdentity { kind: IdentityKind, reference: String },

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("{op}: takes {expected} argument(s), got {got}")]
    WrongArgumentCount {
        op: String,
        expected: String,
        got: usize,
    },

    #[error("{op}: argument {position} must be {expected}")]
    TypeMismatch {
        op: String,
        position: usize,
        expected: &'static str,
    },

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    #[error("{op}: operation not permitted ({errno})")]
    OperationNotPermitted { op: &'static str, errno: Errno },

    #[error("{op}: {errno}")]
    Os { op: &'static str, errno: Errno },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PosixError {
    /// Wrap an OS failure, keeping EPERM distinguishable from other errno values.
    pub fn os(op: &'static str, errno: Errno) -> Self {
        match errno {
            Errno::EPERM => PosixError::OperationNotPermitted { op, errno },
            _ => PosixError::Os { op, errno },
        }
    }

    /// Capture errno after a libc call reported failure.
    pub fn last_os(op: &'static str) -> Self {
        Self::os(op, Errno::last())
    }

    pub(crate) fn type_mismatch(op: &str, position: usize, expected: &'static str) -> Self {
        PosixError::TypeMismatch {
            op: op.to_string(),
            position,
            expected,
        }
    }

    /// The OS error code carried by this error, if it came from the OS
    pub fn errno(&self) -> Option<Errno> {
        match self {
            PosixError::OperationNotPermitted { errno, .. } | PosixError::Os { errno, .. } => {
                Some(*errno)
            }
            PosixError::Io(e) => e.raw_os_error().map(Errno::from_raw),
            _ => None,
        }
    }
}

/// Result type alias for posixkit operations
pub type Result<T> = std::result::Result<T, PosixError>;

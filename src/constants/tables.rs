//! Raw name/value pairs, taken from the target's libc definitions.
//!
//! Entries that only exist on some OS families are cfg-gated here and
//! listed again in the matching `*_ELSEWHERE` slice, so a lookup can tell
//! "not on this platform" apart from "never heard of it".

use libc::c_int;

pub(crate) static RLIMIT: &[(&str, c_int)] = &[
    ("core", libc::RLIMIT_CORE as c_int),
    ("cpu", libc::RLIMIT_CPU as c_int),
    ("data", libc::RLIMIT_DATA as c_int),
    ("fsize", libc::RLIMIT_FSIZE as c_int),
    ("nofile", libc::RLIMIT_NOFILE as c_int),
    ("stack", libc::RLIMIT_STACK as c_int),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_vendor = "apple",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "dragonfly"
    ))]
    ("as", libc::RLIMIT_AS as c_int),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_vendor = "apple",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    ("nproc", libc::RLIMIT_NPROC as c_int),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_vendor = "apple",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    ("memlock", libc::RLIMIT_MEMLOCK as c_int),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_vendor = "apple",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    ("rss", libc::RLIMIT_RSS as c_int),
    #[cfg(target_os = "linux")]
    ("locks", libc::RLIMIT_LOCKS as c_int),
    #[cfg(target_os = "linux")]
    ("sigpending", libc::RLIMIT_SIGPENDING as c_int),
    #[cfg(target_os = "linux")]
    ("msgqueue", libc::RLIMIT_MSGQUEUE as c_int),
    #[cfg(target_os = "linux")]
    ("nice", libc::RLIMIT_NICE as c_int),
    #[cfg(target_os = "linux")]
    ("rtprio", libc::RLIMIT_RTPRIO as c_int),
    #[cfg(target_os = "linux")]
    ("rttime", libc::RLIMIT_RTTIME as c_int),
];

pub(crate) static RLIMIT_ELSEWHERE: &[&str] = &[
    "as",
    "nproc",
    "memlock",
    "rss",
    "locks",
    "sigpending",
    "msgqueue",
    "nice",
    "rtprio",
    "rttime",
];

pub(crate) static SYSLOG_FACILITY: &[(&str, c_int)] = &[
    ("kern", libc::LOG_KERN),
    ("user", libc::LOG_USER),
    ("mail", libc::LOG_MAIL),
    ("daemon", libc::LOG_DAEMON),
    ("auth", libc::LOG_AUTH),
    ("syslog", libc::LOG_SYSLOG),
    ("lpr", libc::LOG_LPR),
    ("news", libc::LOG_NEWS),
    ("uucp", libc::LOG_UUCP),
    ("cron", libc::LOG_CRON),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_vendor = "apple",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    ("authpriv", libc::LOG_AUTHPRIV),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_vendor = "apple",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    ("ftp", libc::LOG_FTP),
    ("local0", libc::LOG_LOCAL0),
    ("local1", libc::LOG_LOCAL1),
    ("local2", libc::LOG_LOCAL2),
    ("local3", libc::LOG_LOCAL3),
    ("local4", libc::LOG_LOCAL4),
    ("local5", libc::LOG_LOCAL5),
    ("local6", libc::LOG_LOCAL6),
    ("local7", libc::LOG_LOCAL7),
];

pub(crate) static SYSLOG_FACILITY_ELSEWHERE: &[&str] = &["authpriv", "ftp"];

pub(crate) static SYSLOG_PRIORITY: &[(&str, c_int)] = &[
    ("emerg", libc::LOG_EMERG),
    ("alert", libc::LOG_ALERT),
    ("crit", libc::LOG_CRIT),
    ("err", libc::LOG_ERR),
    ("warning", libc::LOG_WARNING),
    ("notice", libc::LOG_NOTICE),
    ("info", libc::LOG_INFO),
    ("debug", libc::LOG_DEBUG),
];

/// Deprecated spellings still listed in `<syslog.h>`'s prioritynames.
pub(crate) static SYSLOG_PRIORITY_ALIASES: &[(&str, &str)] = &[
    ("error", "err"),
    ("warn", "warning"),
    ("panic", "emerg"),
];

/// `LOG_MASK(pri)`
const fn log_mask(priority: c_int) -> c_int {
    1 << priority
}

pub(crate) static SYSLOG_MASK: &[(&str, c_int)] = &[
    ("mask_emerg", log_mask(libc::LOG_EMERG)),
    ("mask_alert", log_mask(libc::LOG_ALERT)),
    ("mask_crit", log_mask(libc::LOG_CRIT)),
    ("mask_err", log_mask(libc::LOG_ERR)),
    ("mask_warning", log_mask(libc::LOG_WARNING)),
    ("mask_notice", log_mask(libc::LOG_NOTICE)),
    ("mask_info", log_mask(libc::LOG_INFO)),
    ("mask_debug", log_mask(libc::LOG_DEBUG)),
];

pub(crate) static SYSLOG_MASK_ALIASES: &[(&str, &str)] = &[
    ("mask_error", "mask_err"),
    ("mask_warn", "mask_warning"),
    ("mask_panic", "mask_emerg"),
];

pub(crate) static SYSLOG_OPTION: &[(&str, c_int)] = &[
    ("pid", libc::LOG_PID),
    ("cons", libc::LOG_CONS),
    ("odelay", libc::LOG_ODELAY),
    ("ndelay", libc::LOG_NDELAY),
    ("nowait", libc::LOG_NOWAIT),
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_vendor = "apple",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    ("perror", libc::LOG_PERROR),
];

pub(crate) static SYSLOG_OPTION_ELSEWHERE: &[&str] = &["perror"];

/// `SWAP_FLAG_*` from `<linux/swap.h>`; libc does not export them.
pub(crate) static SWAP_FLAG: &[(&str, c_int)] = &[
    #[cfg(target_os = "linux")]
    ("prefer", 0x8000),
    #[cfg(target_os = "linux")]
    ("discard", 0x10000),
];

pub(crate) static SWAP_FLAG_ELSEWHERE: &[&str] = &["prefer", "discard"];

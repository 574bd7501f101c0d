//! Flag Set <-> bitmask marshalling.

use super::{entries, lookup, ConstValue, Domain};
use crate::config::types::{FlagSet, Result};
use std::borrow::Cow;

/// Combine named booleans into one bitmask.
///
/// Every key is resolved as `prefix + key` before any bit is combined, so a
/// single unknown name fails the whole call. Keys that already start with
/// `prefix` are looked up as given.
pub fn assemble(domain: Domain, flags: &FlagSet, prefix: &str) -> Result<ConstValue> {
    let resolved = flags
        .iter()
        .map(|(name, &enabled)| lookup(domain, &prefixed(name, prefix)).map(|bit| (bit, enabled)))
        .collect::<Result<Vec<_>>>()?;

    let mask = resolved
        .into_iter()
        .filter(|(_, enabled)| *enabled)
        .fold(0, |mask, (bit, _)| mask | bit);

    log::debug!("Assembled {} flags {:?} -> {:#x}", domain.name(), flags, mask);
    Ok(mask)
}

/// Report every `prefix`-named entry of `domain` as set or unset in `bitmask`,
/// with the prefix stripped from the returned names.
pub fn decode(domain: Domain, bitmask: ConstValue, prefix: &str) -> FlagSet {
    entries(domain)
        .iter()
        .filter_map(|(name, bit)| {
            name.strip_prefix(prefix)
                .map(|short| (short.to_string(), bitmask & bit != 0))
        })
        .collect()
}

fn prefixed<'a>(name: &'a str, prefix: &str) -> Cow<'a, str> {
    if prefix.is_empty() || name.starts_with(prefix) {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{}{}", prefix, name))
    }
}

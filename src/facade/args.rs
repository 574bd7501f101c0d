//! Argument shape checks for the dynamic call surface.

use crate::config::types::{FlagSet, IdentityRef, LimitUpdate, LimitValue, PosixError, Result};
use serde_json::Value;

pub(crate) struct Args<'a> {
    op: &'a str,
    values: &'a [Value],
}

impl<'a> Args<'a> {
    pub(crate) fn new(op: &'a str, values: &'a [Value]) -> Self {
        Self { op, values }
    }

    pub(crate) fn expect(&self, count: usize) -> Result<&Self> {
        if self.values.len() != count {
            return Err(PosixError::WrongArgumentCount {
                op: self.op.to_string(),
                expected: count.to_string(),
                got: self.values.len(),
            });
        }
        Ok(self)
    }

    pub(crate) fn identity(&self, position: usize) -> Result<IdentityRef> {
        match &self.values[position] {
            Value::String(name) => Ok(IdentityRef::Named(name.clone())),
            Value::Number(n) => n
                .as_u64()
                .and_then(|id| u32::try_from(id).ok())
                .map(IdentityRef::Numeric)
                .ok_or_else(|| self.mismatch(position, "a user/group name or a non-negative 32-bit id")),
            _ => Err(self.mismatch(position, "a user/group name or a non-negative 32-bit id")),
        }
    }

    pub(crate) fn pid(&self, position: usize) -> Result<i32> {
        self.values[position]
            .as_i64()
            .and_then(|pid| i32::try_from(pid).ok())
            .ok_or_else(|| self.mismatch(position, "an integer"))
    }

    pub(crate) fn string(&self, position: usize) -> Result<&'a str> {
        self.values[position]
            .as_str()
            .ok_or_else(|| self.mismatch(position, "a string"))
    }

    pub(crate) fn flag_set(&self, position: usize) -> Result<FlagSet> {
        let object = self.values[position]
            .as_object()
            .ok_or_else(|| self.mismatch(position, "an object of booleans"))?;
        object
            .iter()
            .map(|(name, value)| {
                value
                    .as_bool()
                    .map(|enabled| (name.clone(), enabled))
                    .ok_or_else(|| self.mismatch(position, "an object of booleans"))
            })
            .collect()
    }

    /// `{soft?, hard?}`, each a non-negative integer or `null` for unbounded.
    pub(crate) fn limit_update(&self, position: usize) -> Result<LimitUpdate> {
        let object = self.values[position]
            .as_object()
            .ok_or_else(|| self.mismatch(position, "an object with soft and/or hard"))?;
        let side = |key: &str| -> Result<Option<LimitValue>> {
            match object.get(key) {
                None => Ok(None),
                Some(Value::Null) => Ok(Some(LimitValue::Unbounded)),
                Some(value) => value
                    .as_u64()
                    .map(|v| Some(LimitValue::Finite(v)))
                    .ok_or_else(|| self.mismatch(position, "limits that are non-negative integers or null")),
            }
        };
        Ok(LimitUpdate {
            soft: side("soft")?,
            hard: side("hard")?,
        })
    }

    fn mismatch(&self, position: usize, expected: &'static str) -> PosixError {
        PosixError::type_mismatch(self.op, position, expected)
    }
}

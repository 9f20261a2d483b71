//! Typed handler options.
//!
//! Options arrive as an untyped YAML mapping. Only four keys are recognized;
//! each one is type-checked on its own so a bad value is reported by name.
//! Unknown keys are skipped so newer descriptors still load.

use serde_yaml::{Mapping, Value};

pub const FILTER_KEY: &str = "filter";
pub const CONFIG_KEY: &str = "config";
pub const CONCURRENCY_KEY: &str = "concurrency";
pub const DURABLE_KEY: &str = "durable";

const RECOGNIZED_KEYS: [&str; 4] = [FILTER_KEY, CONFIG_KEY, CONCURRENCY_KEY, DURABLE_KEY];

/// A recognized option key held a value of the wrong type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionTypeError {
    pub key: &'static str,
    pub expected: &'static str,
}

/// Options recognized for a single handler subscription.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandlerOptions {
    /// Message selector expression (`filter`).
    pub filter: Option<String>,

    /// Opaque handler configuration (`config`), keys are always strings.
    pub config: Option<Mapping>,

    /// Number of parallel consumers (`concurrency`).
    pub concurrency: Option<u32>,

    /// Whether the subscription survives restarts (`durable`).
    pub durable: Option<bool>,
}

impl HandlerOptions {
    /// Decode options from a mapping.
    ///
    /// An explicit YAML null under a recognized key is the same as leaving
    /// the key out.
    pub fn from_mapping(options: &Mapping) -> Result<Self, OptionTypeError> {
        for (key, _) in options.iter() {
            match key.as_str() {
                Some(name) if RECOGNIZED_KEYS.contains(&name) => {}
                _ => tracing::debug!(key = ?key, "Ignoring unrecognized handler option"),
            }
        }

        Ok(Self {
            filter: decode_filter(options.get(FILTER_KEY))?,
            config: decode_config(options.get(CONFIG_KEY))?,
            concurrency: decode_concurrency(options.get(CONCURRENCY_KEY))?,
            durable: decode_durable(options.get(DURABLE_KEY))?,
        })
    }

    /// True when no recognized option was supplied.
    pub fn is_empty(&self) -> bool {
        self.filter.is_none()
            && self.config.is_none()
            && self.concurrency.is_none()
            && self.durable.is_none()
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn decode_filter(value: Option<&Value>) -> Result<Option<String>, OptionTypeError> {
    match present(value) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(OptionTypeError { key: FILTER_KEY, expected: "a string" }),
    }
}

fn decode_config(value: Option<&Value>) -> Result<Option<Mapping>, OptionTypeError> {
    const EXPECTED: &str = "a mapping with string keys";
    match present(value) {
        None => Ok(None),
        Some(Value::Mapping(m)) if m.keys().all(Value::is_string) => Ok(Some(m.clone())),
        Some(_) => Err(OptionTypeError { key: CONFIG_KEY, expected: EXPECTED }),
    }
}

fn decode_concurrency(value: Option<&Value>) -> Result<Option<u32>, OptionTypeError> {
    let err = OptionTypeError { key: CONCURRENCY_KEY, expected: "a non-negative integer" };
    match present(value) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or(err),
        Some(_) => Err(err),
    }
}

fn decode_durable(value: Option<&Value>) -> Result<Option<bool>, OptionTypeError> {
    match present(value) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(OptionTypeError { key: DURABLE_KEY, expected: "a boolean" }),
    }
}

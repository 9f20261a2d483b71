//! Runtime pool specifications.
//!
//! # Responsibilities
//! - Describe sizing bounds for a named runtime pool
//! - Decode explicit pools from the `pooling` section
//! - Default a pool when none was configured
//!
//! # Design Decisions
//! - An explicit pool is never overwritten (first writer wins)
//! - Unset bounds mean "host default"; the pool runtime resolves them

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::descriptor::DescriptorError;

/// Name of the pool backing scheduled jobs.
pub const JOBS_POOL_NAME: &str = "jobs";

/// Bounds applied to a defaulted pool in development mode.
pub const DEVELOPMENT_MIN_SIZE: u32 = 1;
pub const DEVELOPMENT_MAX_SIZE: u32 = 2;

const POOLING_SECTION: &str = "pooling";

/// Sizing bounds for a named pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSpec {
    pub name: String,

    /// Lower bound on concurrent instances, `None` for the host default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<u32>,

    /// Upper bound on concurrent instances, `None` for the host default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u32>,
}

impl PoolSpec {
    /// A pool with explicit bounds.
    pub fn bounded(name: impl Into<String>, min_size: u32, max_size: u32) -> Self {
        Self {
            name: name.into(),
            min_size: Some(min_size),
            max_size: Some(max_size),
        }
    }

    /// A pool sized entirely by the host.
    pub fn host_default(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_size: None,
            max_size: None,
        }
    }

    pub fn is_host_default(&self) -> bool {
        self.min_size.is_none() && self.max_size.is_none()
    }

    /// Find the pool registered under `name`.
    pub fn find_named<'a>(pools: &'a [PoolSpec], name: &str) -> Option<&'a PoolSpec> {
        pools.iter().find(|p| p.name == name)
    }

    /// Decode the `pooling` section: `name: { min: N, max: M }`.
    ///
    /// A null entry registers a host-default pool.
    pub fn parse_section(section: &Value) -> Result<Vec<PoolSpec>, DescriptorError> {
        let pools = match section {
            Value::Null => return Ok(Vec::new()),
            Value::Mapping(m) => m,
            _ => {
                return Err(DescriptorError::InvalidValue {
                    section: POOLING_SECTION.to_string(),
                    key: String::new(),
                    expected: "a mapping of pool names",
                })
            }
        };

        let mut result = Vec::with_capacity(pools.len());
        for (key, value) in pools.iter() {
            let name = key.as_str().ok_or_else(|| DescriptorError::InvalidValue {
                section: POOLING_SECTION.to_string(),
                key: format!("{:?}", key),
                expected: "a string pool name",
            })?;

            let spec = match value {
                Value::Null => PoolSpec::host_default(name),
                Value::Mapping(bounds) => parse_bounds(name, bounds)?,
                _ => {
                    return Err(DescriptorError::InvalidValue {
                        section: POOLING_SECTION.to_string(),
                        key: name.to_string(),
                        expected: "a mapping with 'min' and 'max'",
                    })
                }
            };
            result.push(spec);
        }
        Ok(result)
    }
}

fn parse_bounds(name: &str, bounds: &Mapping) -> Result<PoolSpec, DescriptorError> {
    let bound = |key: &str| -> Result<Option<u32>, DescriptorError> {
        match bounds.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| DescriptorError::InvalidValue {
                    section: POOLING_SECTION.to_string(),
                    key: format!("{}.{}", name, key),
                    expected: "a non-negative integer",
                }),
        }
    };

    let min_size = bound("min")?;
    let max_size = bound("max")?;
    if let (Some(min), Some(max)) = (min_size, max_size) {
        if min > max {
            return Err(DescriptorError::InvalidValue {
                section: POOLING_SECTION.to_string(),
                key: name.to_string(),
                expected: "'min' no greater than 'max'",
            });
        }
    }

    Ok(PoolSpec {
        name: name.to_string(),
        min_size,
        max_size,
    })
}

/// Return the pool to use for `name`.
///
/// An existing spec is returned unchanged. Otherwise development mode yields
/// a small bounded pool and production leaves sizing to the host.
pub fn ensure_pool(existing: Option<PoolSpec>, development_mode: bool, name: &str) -> PoolSpec {
    match existing {
        Some(pool) => pool,
        None if development_mode => PoolSpec::bounded(name, DEVELOPMENT_MIN_SIZE, DEVELOPMENT_MAX_SIZE),
        None => PoolSpec::host_default(name),
    }
}

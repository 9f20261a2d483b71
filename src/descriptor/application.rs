//! Application and web descriptor.
//!
//! Normalizes the `application` and `web` sections:
//!
//! ```yaml
//! application:
//!   RACK_ROOT: /srv/shop      # required
//!   RACK_ENV: production      # default: development
//!   rackup: config/app.ru     # default: config.ru, relative to RACK_ROOT
//! web:
//!   host: shop.example.com
//!   context: /shop
//! ```
//!
//! The rackup script is located but never read here.

use std::path::PathBuf;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::descriptor::error::{DescriptorError, DescriptorResult};
use crate::descriptor::sections::Descriptor;

pub const APPLICATION_SECTION: &str = "application";
pub const WEB_SECTION: &str = "web";

const ROOT_KEY: &str = "RACK_ROOT";
const ENV_KEY: &str = "RACK_ENV";
const RACKUP_KEY: &str = "rackup";
const HOST_KEY: &str = "host";
const CONTEXT_KEY: &str = "context";

pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_RACKUP: &str = "config.ru";
pub const STATIC_PATH_PREFIX: &str = "/public";

/// Normalized application metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppDescriptor {
    pub root: PathBuf,
    pub environment: String,
    pub rackup_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub static_path_prefix: String,
    pub pool_name: String,
}

impl AppDescriptor {
    /// Build the application descriptor from a combined descriptor.
    pub fn parse(descriptor: &Descriptor) -> DescriptorResult<Self> {
        let application = descriptor
            .section_mapping(APPLICATION_SECTION)?
            .ok_or_else(|| missing(APPLICATION_SECTION, ROOT_KEY))?;

        let root = PathBuf::from(
            string_value(APPLICATION_SECTION, application, ROOT_KEY)?
                .ok_or_else(|| missing(APPLICATION_SECTION, ROOT_KEY))?,
        );
        let environment = string_value(APPLICATION_SECTION, application, ENV_KEY)?
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());
        let rackup = string_value(APPLICATION_SECTION, application, RACKUP_KEY)?
            .unwrap_or_else(|| DEFAULT_RACKUP.to_string());

        let (host, context) = match descriptor.section_mapping(WEB_SECTION)? {
            Some(web) => (
                string_value(WEB_SECTION, web, HOST_KEY)?,
                string_value(WEB_SECTION, web, CONTEXT_KEY)?,
            ),
            None => (None, None),
        };

        Ok(Self {
            rackup_path: root.join(rackup),
            pool_name: format!("rack-app-pool:{}", root.display()),
            root,
            environment,
            host,
            context,
            static_path_prefix: STATIC_PATH_PREFIX.to_string(),
        })
    }

    /// Development mode relaxes resource sizing.
    pub fn is_development_mode(&self) -> bool {
        self.environment == DEFAULT_ENVIRONMENT
    }
}

fn missing(section: &str, key: &str) -> DescriptorError {
    DescriptorError::MissingKey {
        section: section.to_string(),
        key: key.to_string(),
    }
}

fn string_value(section: &str, mapping: &Mapping, key: &str) -> DescriptorResult<Option<String>> {
    match mapping.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.trim().to_string())),
        Some(_) => Err(DescriptorError::InvalidValue {
            section: section.to_string(),
            key: key.to_string(),
            expected: "a non-empty string",
        }),
    }
}

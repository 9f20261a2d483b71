//! Canonical subscription records.

use serde::Serialize;
use serde_yaml::Mapping;

use crate::messaging::error::{ParseError, ParseResult};
use crate::messaging::naming::{to_load_path, to_type_name};
use crate::messaging::options::HandlerOptions;

/// One handler bound to one destination, with its normalized options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscription {
    /// Capitalized compound handler name (e.g. `OrderHandler`).
    pub handler_type_name: String,

    /// Lowercase handler load path (e.g. `order_handler`).
    pub handler_load_path: String,

    /// Queue or topic the handler subscribes to.
    pub destination_name: String,

    /// Message selector, from the `filter` option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_selector: Option<String>,

    /// Opaque handler configuration, from the `config` option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler_config: Option<Mapping>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub durable: Option<bool>,
}

/// Build a subscription for `handler` on `destination`.
///
/// Absent options leave every optional field unset.
pub fn build_subscription(
    handler: &str,
    destination: &str,
    options: Option<&Mapping>,
) -> ParseResult<Subscription> {
    let empty_name = || ParseError::EmptyHandlerName {
        destination: destination.to_string(),
    };
    let handler_type_name = to_type_name(handler).map_err(|_| empty_name())?;
    let handler_load_path = to_load_path(handler).map_err(|_| empty_name())?;

    let options = match options {
        Some(mapping) => HandlerOptions::from_mapping(mapping).map_err(|e| {
            ParseError::InvalidOptionType {
                destination: destination.to_string(),
                handler: handler.to_string(),
                key: e.key,
                expected: e.expected,
            }
        })?,
        None => HandlerOptions::default(),
    };

    Ok(Subscription {
        handler_type_name,
        handler_load_path,
        destination_name: destination.to_string(),
        message_selector: options.filter,
        handler_config: options.config,
        concurrency: options.concurrency,
        durable: options.durable,
    })
}

//! Destination shape dispatch.
//!
//! A destination's value may take any of these forms:
//!
//! ```yaml
//! /queues/orders: OrderHandler            # scalar handler
//! /queues/audit:                          # handler map
//!   AuditHandler: { durable: true }
//!   ArchiveHandler:
//! /topics/events:                         # handler list
//!   - EventLogger
//!   - MetricsHandler: { concurrency: 4 }
//! /queues/unused: ""                      # empty, no subscriptions
//! ```
//!
//! The value is classified once into [`DestinationShape`] and then expanded
//! with an exhaustive match. Nesting stops at list-of-maps: a list inside a
//! list is rejected.

use serde_yaml::{Mapping, Value};

use crate::messaging::error::{value_kind, ParseError, ParseResult};
use crate::messaging::subscription::{build_subscription, Subscription};

/// The legal shapes of a destination's configuration value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DestinationShape<'a> {
    /// Blank string, declares the destination without handlers.
    Empty,
    /// A single handler name with no options.
    ScalarHandler(&'a str),
    /// Handler name to options mapping.
    HandlerMap(&'a Mapping),
    /// Mixed list of handler names and handler maps.
    HandlerList(&'a [Value]),
}

impl<'a> DestinationShape<'a> {
    /// Classify `value`, rejecting anything outside the four legal shapes.
    pub fn classify(destination: &str, value: &'a Value) -> ParseResult<Self> {
        match value {
            Value::String(s) if s.trim().is_empty() => Ok(Self::Empty),
            Value::String(s) => Ok(Self::ScalarHandler(s)),
            Value::Mapping(m) => Ok(Self::HandlerMap(m)),
            Value::Sequence(items) => Ok(Self::HandlerList(items)),
            other => Err(ParseError::InvalidShape {
                destination: destination.to_string(),
                detail: format!(
                    "expected a handler name, a handler map or a list, found {}",
                    value_kind(other)
                ),
            }),
        }
    }
}

/// Expand one destination into its subscriptions, in declaration order.
pub fn expand_destination(destination: &str, value: &Value) -> ParseResult<Vec<Subscription>> {
    match DestinationShape::classify(destination, value)? {
        DestinationShape::Empty => {
            tracing::debug!(destination = %destination, "Destination declared without handlers");
            Ok(Vec::new())
        }
        DestinationShape::ScalarHandler(handler) => {
            Ok(vec![build_subscription(handler, destination, None)?])
        }
        DestinationShape::HandlerMap(handlers) => expand_handler_map(destination, handlers),
        DestinationShape::HandlerList(items) => expand_handler_list(destination, items),
    }
}

fn expand_handler_map(destination: &str, handlers: &Mapping) -> ParseResult<Vec<Subscription>> {
    let mut result = Vec::with_capacity(handlers.len());

    for (key, options) in handlers.iter() {
        let handler = key.as_str().ok_or_else(|| ParseError::InvalidShape {
            destination: destination.to_string(),
            detail: format!("handler names must be strings, found {}", value_kind(key)),
        })?;

        let options = match options {
            Value::Null => None,
            Value::Mapping(m) => Some(m),
            other => {
                return Err(ParseError::InvalidShape {
                    destination: destination.to_string(),
                    detail: format!(
                        "options for handler '{}' must be a mapping, found {}",
                        handler,
                        value_kind(other)
                    ),
                })
            }
        };

        result.push(build_subscription(handler, destination, options)?);
    }

    Ok(result)
}

fn expand_handler_list(destination: &str, items: &[Value]) -> ParseResult<Vec<Subscription>> {
    let mut result = Vec::with_capacity(items.len());

    for item in items {
        match item {
            Value::String(handler) => result.push(build_subscription(handler, destination, None)?),
            Value::Mapping(handlers) => result.extend(expand_handler_map(destination, handlers)?),
            other => {
                return Err(ParseError::InvalidShape {
                    destination: destination.to_string(),
                    detail: format!(
                        "list entries must be handler names or handler maps, found {}",
                        value_kind(other)
                    ),
                })
            }
        }
    }

    Ok(result)
}

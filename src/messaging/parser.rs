//! Messaging document parser.
//!
//! Accepts the messaging section either as raw YAML text (a standalone
//! `messaging.yml`) or as a value already decoded out of a combined
//! descriptor, so callers never need to know which form they hold.

use serde_yaml::{Mapping, Value};

use crate::messaging::error::{value_kind, ParseError, ParseResult};
use crate::messaging::shape::expand_destination;
use crate::messaging::subscription::Subscription;

/// Parse a messaging section in either text or decoded form.
///
/// A string is decoded as YAML first. A null value is an empty section.
pub fn parse(data: &Value) -> ParseResult<Vec<Subscription>> {
    match data {
        Value::String(text) => parse_str(text),
        Value::Mapping(destinations) => parse_destinations(destinations),
        Value::Null => Ok(Vec::new()),
        other => Err(ParseError::MalformedDocument(format!(
            "expected YAML text or a mapping of destinations, found {}",
            value_kind(other)
        ))),
    }
}

/// Parse raw YAML text. Blank text yields no subscriptions.
pub fn parse_str(text: &str) -> ParseResult<Vec<Subscription>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    match serde_yaml::from_str::<Value>(text)? {
        Value::Mapping(destinations) => parse_destinations(&destinations),
        Value::Null => Ok(Vec::new()),
        other => Err(ParseError::MalformedDocument(format!(
            "expected a mapping of destinations, found {}",
            value_kind(&other)
        ))),
    }
}

/// Parse a decoded destination mapping, keeping destination order.
pub fn parse_destinations(destinations: &Mapping) -> ParseResult<Vec<Subscription>> {
    let mut result = Vec::new();

    for (key, value) in destinations.iter() {
        let destination = match key.as_str() {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(ParseError::InvalidShape {
                    destination: format!("{:?}", key),
                    detail: "destination names must be non-empty strings".to_string(),
                })
            }
        };

        let subscriptions = expand_destination(destination, value)?;
        tracing::debug!(
            destination = %destination,
            handlers = subscriptions.len(),
            "Destination parsed"
        );
        result.extend(subscriptions);
    }

    tracing::trace!(subscriptions = result.len(), "Messaging document parsed");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_empty() {
        assert!(parse_str("").unwrap().is_empty());
        assert!(parse_str("   \n ").unwrap().is_empty());
        assert!(parse(&Value::String("  ".into())).unwrap().is_empty());
        assert!(parse_str("# nothing here\n").unwrap().is_empty());
    }

    #[test]
    fn test_text_and_decoded_forms_agree() {
        let text = "orders: OrderHandler\naudit:\n  - AuditHandler\n";
        let decoded: Value = serde_yaml::from_str(text).unwrap();

        let from_text = parse(&Value::String(text.into())).unwrap();
        let from_decoded = parse(&decoded).unwrap();
        assert_eq!(from_text, from_decoded);
        assert_eq!(from_text.len(), 2);
    }

    #[test]
    fn test_destination_order_preserved() {
        let subs = parse_str("zulu: Z\nalpha: A\nmike: M\n").unwrap();
        let dests: Vec<_> = subs.iter().map(|s| s.destination_name.as_str()).collect();
        assert_eq!(dests, ["zulu", "alpha", "mike"]);
    }

    #[test]
    fn test_malformed_text() {
        assert!(matches!(parse_str("orders: [oops"), Err(ParseError::MalformedDocument(_))));
        assert!(matches!(parse_str("- a\n- b\n"), Err(ParseError::MalformedDocument(_))));
        assert!(matches!(parse_str("just a string"), Err(ParseError::MalformedDocument(_))));
    }

    #[test]
    fn test_top_level_type_mismatch() {
        assert!(matches!(parse(&Value::Bool(true)), Err(ParseError::MalformedDocument(_))));
        assert!(matches!(
            parse(&Value::Sequence(vec![Value::from("a")])),
            Err(ParseError::MalformedDocument(_))
        ));
    }

    #[test]
    fn test_error_aborts_whole_parse() {
        let result = parse_str("good: GoodHandler\nbad: 12\n");
        assert!(matches!(result, Err(ParseError::InvalidShape { ref destination, .. }) if destination == "bad"));
    }

    #[test]
    fn test_non_string_destination_rejected() {
        assert!(matches!(parse_str("7: Handler"), Err(ParseError::InvalidShape { .. })));
    }
}

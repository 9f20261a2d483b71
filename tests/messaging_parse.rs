//! Messaging section normalization, end to end.

use deploy_descriptors::messaging::{parse, parse_str, ParseError};
use serde_yaml::{Mapping, Value};

fn decoded(yaml: &str) -> Value {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn test_blank_documents_are_empty() {
    assert!(parse(&Value::String(String::new())).unwrap().is_empty());
    assert!(parse(&Value::String("   \n ".into())).unwrap().is_empty());
}

#[test]
fn test_scalar_handler() {
    let mut doc = Mapping::new();
    doc.insert(Value::from("orders"), Value::from("OrderHandler"));

    let subs = parse(&Value::Mapping(doc)).unwrap();
    assert_eq!(subs.len(), 1);
    let sub = &subs[0];
    assert_eq!(sub.destination_name, "orders");
    assert_eq!(sub.handler_type_name, "OrderHandler");
    assert_eq!(sub.handler_load_path, "order_handler");
    assert!(sub.message_selector.is_none());
    assert!(sub.handler_config.is_none());
    assert!(sub.concurrency.is_none());
    assert!(sub.durable.is_none());
}

#[test]
fn test_handler_map_options() {
    let subs = parse(&decoded(
        "orders:\n  OrderHandler:\n    filter: \"type='x'\"\n    concurrency: 3\n",
    ))
    .unwrap();
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].message_selector.as_deref(), Some("type='x'"));
    assert_eq!(subs[0].concurrency, Some(3));
    assert!(subs[0].handler_config.is_none());
    assert!(subs[0].durable.is_none());
}

#[test]
fn test_mixed_list() {
    let subs = parse(&decoded(
        "orders:\n  - OrderHandler\n  - AuditHandler:\n      durable: true\n",
    ))
    .unwrap();
    assert_eq!(subs.len(), 2);
    assert_eq!(subs[0].handler_type_name, "OrderHandler");
    assert!(subs[0].durable.is_none());
    assert_eq!(subs[1].handler_type_name, "AuditHandler");
    assert_eq!(subs[1].durable, Some(true));
}

#[test]
fn test_invalid_option_type_returns_nothing() {
    let result = parse(&decoded("orders:\n  OrderHandler:\n    concurrency: three\n"));
    match result {
        Err(ParseError::InvalidOptionType { destination, handler, key, .. }) => {
            assert_eq!(destination, "orders");
            assert_eq!(handler, "OrderHandler");
            assert_eq!(key, "concurrency");
        }
        other => panic!("expected InvalidOptionType, got {:?}", other),
    }
}

#[test]
fn test_null_destination_is_invalid_shape() {
    let err = parse_str("orders:\n").unwrap_err();
    assert!(matches!(err, ParseError::InvalidShape { ref destination, .. } if destination == "orders"));
}

#[test]
fn test_empty_handler_in_list() {
    let err = parse_str("orders:\n  - \"\"\n").unwrap_err();
    assert!(matches!(err, ParseError::EmptyHandlerName { .. }));
}

#[test]
fn test_invalid_handler_names() {
    for handler in ["Order Handler", "foo.bar", "!!a", "a b/c d"] {
        let err = parse_str(&format!("orders: \"{}\"\n", handler)).unwrap_err();
        assert!(
            matches!(err, ParseError::EmptyHandlerName { ref destination } if destination == "orders"),
            "{handler}: {err:?}"
        );
    }

    let err = parse_str("orders:\n  \"Audit Handler\": { durable: true }\n").unwrap_err();
    assert!(matches!(err, ParseError::EmptyHandlerName { .. }));
}

#[test]
fn test_concurrency_above_u32_is_rejected() {
    let err = parse_str("orders:\n  OrderHandler:\n    concurrency: 4294967296\n").unwrap_err();
    assert!(matches!(err, ParseError::InvalidOptionType { key, .. } if key == "concurrency"));

    let subs = parse_str("orders:\n  OrderHandler:\n    concurrency: 4294967295\n").unwrap();
    assert_eq!(subs[0].concurrency, Some(u32::MAX));
}

#[test]
fn test_reparse_is_idempotent() {
    let text = "a: [X, { Y: { durable: false } }]\nb: { Z: { config: { k: v } } }\n";
    let first = parse_str(text).unwrap();
    let second = parse_str(text).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

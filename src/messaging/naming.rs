//! Handler name transforms.
//!
//! A handler is written in whatever convention the application author
//! prefers (`order_handler`, `OrderHandler`, `admin/audit_handler`,
//! `Admin::AuditHandler`). Downstream stages need two canonical forms:
//!
//! - the type name, a capitalized compound (`Admin::AuditHandler`)
//! - the load path, lowercase and underscore-delimited (`admin/audit_handler`)
//!
//! Both transforms trim surrounding whitespace and treat `::` and `/` as the
//! same namespace separator. A valid name is one or more namespace segments,
//! each starting with an ASCII letter or `_` and continuing with ASCII letters,
//! digits, `_` or `-`.

use thiserror::Error;

/// The handler identifier is empty or not a valid name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("handler name is empty or invalid")]
pub struct EmptyName;

/// Convert a handler identifier to its capitalized compound form.
///
/// Segments delimited by `_` or `-` are capitalized and concatenated;
/// namespace segments are joined with `::`.
pub fn to_type_name(handler: &str) -> Result<String, EmptyName> {
    let handler = checked(handler)?;
    let normalized = handler.replace("::", "/");

    let namespaces: Vec<String> = normalized
        .split('/')
        .filter(|ns| !ns.is_empty())
        .map(|ns| {
            ns.split(['_', '-'])
                .filter(|word| !word.is_empty())
                .map(capitalize)
                .collect::<String>()
        })
        .filter(|ns| !ns.is_empty())
        .collect();

    Ok(namespaces.join("::"))
}

/// Convert a handler identifier to its lowercase, underscore-delimited form.
///
/// Word boundaries are inserted before an uppercase letter that follows a
/// lowercase letter or digit, and before the last capital of an acronym
/// (`HTTPClient` becomes `http_client`).
pub fn to_load_path(handler: &str) -> Result<String, EmptyName> {
    let handler = checked(handler)?;
    let chars: Vec<char> = handler.replace("::", "/").chars().collect();
    let mut path = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' {
            path.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                path.push('_');
            }
        }
        path.extend(c.to_lowercase());
    }

    Ok(path)
}

fn checked(handler: &str) -> Result<&str, EmptyName> {
    let trimmed = handler.trim();
    if !trimmed.chars().any(|c| c.is_ascii_alphanumeric()) {
        return Err(EmptyName);
    }
    if trimmed.replace("::", "/").split('/').all(is_valid_segment) {
        Ok(trimmed)
    } else {
        Err(EmptyName)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

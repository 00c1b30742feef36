use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex is valid")
});

pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}

/// Keeps string items that look like email addresses, preserving order.
pub fn filter_emails(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .filter(|email| is_valid_email(email))
        .map(ToOwned::to_owned)
        .collect()
}

/// Parses the model's JSON answer. Anything without an `emails` array yields no emails.
pub fn parse_email_payload(text: &str) -> Result<Vec<String>, serde_json::Error> {
    let parsed: Value = serde_json::from_str(text)?;
    Ok(match parsed.get("emails") {
        Some(Value::Array(items)) => filter_emails(items),
        _ => Vec::new(),
    })
}

//! Evaluation input assembly from request headers

use std::collections::HashMap;

/// Request headers, name → value.
pub type Headers = HashMap<String, String>;

/// Input object handed to the decision engine, field name → header value.
pub type EvaluationInput = HashMap<String, String>;

/// Look up a header by name, ASCII case-insensitively.
fn header_value<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    if let Some(value) = headers.get(name) {
        return Some(value);
    }
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Build the evaluation input for one candidate policy: each declared field
/// maps to the header of the same name, or the empty string when absent.
/// Never fails. Built fresh per policy, since declared inputs differ per
/// policy.
pub fn build_input(headers: &Headers, fields: &[String]) -> EvaluationInput {
    let mut input = EvaluationInput::with_capacity(fields.len());
    for field in fields {
        let value = header_value(headers, field).unwrap_or_default();
        input.insert(field.clone(), value.to_string());
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn maps_declared_fields_to_header_values() {
        let headers = headers(&[("project", "x"), ("role", "admin")]);
        let input = build_input(&headers, &["project".to_string(), "role".to_string()]);
        assert_eq!(input.get("project").map(String::as_str), Some("x"));
        assert_eq!(input.get("role").map(String::as_str), Some("admin"));
    }

    #[test]
    fn absent_header_becomes_empty_value() {
        let headers = headers(&[("project", "x")]);
        let input = build_input(&headers, &["project".to_string(), "role".to_string()]);
        assert_eq!(input.get("role").map(String::as_str), Some(""));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let headers = headers(&[("X-Project", "x")]);
        let input = build_input(&headers, &["x-project".to_string()]);
        assert_eq!(input.get("x-project").map(String::as_str), Some("x"));
    }

    #[test]
    fn no_fields_yields_empty_input() {
        let headers = headers(&[("project", "x")]);
        assert!(build_input(&headers, &[]).is_empty());
    }
}

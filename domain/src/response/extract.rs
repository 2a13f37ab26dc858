//! Locate a JSON object inside free-form model output.

use serde_json::Value;

/// Extract the first JSON object from model output.
///
/// Tries, in order: the whole text, the body of a ```json fence, and the
/// span from the first `{` to the last `}`. Returns `None` unless the
/// result parses as a JSON *object*.
pub fn extract_json_object(raw: &str) -> Option<Value> {
    let raw = raw.trim();

    if let Some(obj) = parse_object(raw) {
        return Some(obj);
    }

    if let Some(body) = fenced_body(raw)
        && let Some(obj) = parse_object(body)
    {
        return Some(obj);
    }

    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&raw[start..=end])
}

fn parse_object(s: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(s.trim()) {
        Ok(v @ Value::Object(_)) => Some(v),
        _ => None,
    }
}

/// Body of the first ``` fence, skipping an optional language tag.
fn fenced_body(raw: &str) -> Option<&str> {
    let open = raw.find("```")?;
    let after_open = &raw[open + 3..];
    let body_start = after_open.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_open[body_start..];
    let close = body.find("```")?;
    Some(&body[..close])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        let v = extract_json_object(r#"{"a": 1}"#).unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn test_fenced_object() {
        let raw = "Here you go:\n```json\n{\"a\": 2}\n```\nThanks";
        assert_eq!(extract_json_object(raw).unwrap()["a"], 2);
    }

    #[test]
    fn test_embedded_in_prose() {
        let raw = "Sure! {\"a\": 3} Hope that helps.";
        assert_eq!(extract_json_object(raw).unwrap()["a"], 3);
    }

    #[test]
    fn test_non_object_json_rejected() {
        assert!(extract_json_object("[1, 2, 3]").is_none());
        assert!(extract_json_object("\"just a string\"").is_none());
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(extract_json_object("{\"response\": \"unterminated").is_none());
        assert!(extract_json_object("no json at all").is_none());
    }
}

//! Locates a JSON object inside model output that may wrap it in prose or
//! markdown code fences.

/// Returns the JSON object candidate in `response`, or `None` if there is no `{`.
pub(crate) fn isolate_json_object(response: &str) -> Option<String> {
    let trimmed = response.trim();

    if let Some(json) = extract_from_code_block(trimmed) {
        if json.starts_with('{') {
            return Some(json);
        }
    }

    let start = trimmed.find('{')?;
    extract_balanced_object(trimmed, start).or_else(|| Some(trimmed[start..].to_string()))
}

fn extract_from_code_block(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let json_start = start + pattern.len();
            if let Some(end) = s[json_start..].find("```") {
                return Some(s[json_start..json_start + end].trim().to_string());
            }
        }
    }
    None
}

fn extract_balanced_object(s: &str, start: usize) -> Option<String> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(s[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_object_is_returned() {
        assert_eq!(
            isolate_json_object(r#"{"a":1}"#).as_deref(),
            Some(r#"{"a":1}"#)
        );
    }

    #[test]
    fn code_fence_is_unwrapped() {
        let response = "Here you go:\n```json\n{\"a\": 1}\n```\nThanks";
        assert_eq!(isolate_json_object(response).as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn prose_around_object_is_dropped() {
        let response = r#"Sure! {"a": {"b": "}"}} Hope that helps."#;
        assert_eq!(
            isolate_json_object(response).as_deref(),
            Some(r#"{"a": {"b": "}"}}"#)
        );
    }

    #[test]
    fn no_brace_means_no_object() {
        assert_eq!(isolate_json_object("It could be a migraine."), None);
    }

    #[test]
    fn multibyte_text_before_object_is_handled() {
        let response = "Voilà — {\"a\": \"é\"}";
        assert_eq!(
            isolate_json_object(response).as_deref(),
            Some("{\"a\": \"é\"}")
        );
    }
}

use serde_json::Value;

const SEPARATORS: [char; 4] = [',', ';', '|', '\n'];
const PREFIXES: [char; 2] = ['#', '@'];

/// Splits a free-text keyword field on commas, semicolons, pipes and
/// newlines. Spaces are kept so multi-word keywords survive.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(SEPARATORS)
        .map(|token| token.trim().trim_start_matches(PREFIXES))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Keyword tokens from an Airtable cell. Text cells are parsed, list cells
/// (multi-select, linked names) have each text element parsed, anything else
/// yields nothing.
pub fn parse_keyword_value(value: &Value) -> Vec<String> {
    match value {
        Value::String(raw) => parse_keywords(raw),
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .flat_map(parse_keywords)
            .collect(),
        _ => Vec::new(),
    }
}

/// Raw text of a keyword cell, kept for display next to the parsed tokens.
pub fn keyword_field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(raw) => Some(raw.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

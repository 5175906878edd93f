use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AirtableRecord {
    pub id: String,
    pub created_time: String,
    pub fields: Map<String, Value>,
}

impl AirtableRecord {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type: field_type.into(),
            description: None,
        }
    }

    /// Field definitions derived from the names records actually carry, each
    /// name once. Used when the table schema is not available.
    pub fn infer_from_records(records: &[AirtableRecord]) -> Vec<FieldDefinition> {
        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        for record in records {
            for (name, value) in &record.fields {
                if seen.insert(name.clone()) {
                    fields.push(FieldDefinition::new(
                        format!("inferred_{}", fields.len()),
                        name.clone(),
                        infer_type(value),
                    ));
                }
            }
        }
        fields
    }
}

fn infer_type(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "singleLineText",
        Value::Number(_) => "number",
        Value::Bool(_) => "checkbox",
        Value::Array(_) => "multipleSelects",
        _ => "unknown",
    }
}

enum NameRule {
    Exact(&'static str),
    Contains(&'static str),
}

const TITLE_RULES: [NameRule; 4] = [
    NameRule::Exact("title"),
    NameRule::Exact("video title"),
    NameRule::Exact("name"),
    NameRule::Contains("title"),
];

const KEYWORD_RULES: [NameRule; 6] = [
    NameRule::Exact("keywords"),
    NameRule::Exact("keyword"),
    NameRule::Exact("tags"),
    NameRule::Exact("tag"),
    NameRule::Contains("keyword"),
    NameRule::Contains("tag"),
];

/// Picks the first field matching the earliest rule; rule order wins over
/// field order.
fn resolve_by_rules<'a>(
    fields: &'a [FieldDefinition],
    rules: &[NameRule],
) -> Option<&'a FieldDefinition> {
    let lowered: Vec<String> = fields
        .iter()
        .map(|field| field.name.trim().to_lowercase())
        .collect();
    for rule in rules {
        let hit = lowered.iter().position(|name| match rule {
            NameRule::Exact(target) => name.as_str() == *target,
            NameRule::Contains(needle) => name.contains(*needle),
        });
        if let Some(index) = hit {
            return fields.get(index);
        }
    }
    None
}

pub fn resolve_title_field(fields: &[FieldDefinition]) -> Option<&FieldDefinition> {
    resolve_by_rules(fields, &TITLE_RULES)
}

pub fn resolve_keyword_field(fields: &[FieldDefinition]) -> Option<&FieldDefinition> {
    resolve_by_rules(fields, &KEYWORD_RULES)
}

/// Record keys the keyword pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFields {
    pub title: String,
    pub keywords: Option<String>,
}

pub fn resolve_fields(fields: &[FieldDefinition]) -> Option<ResolvedFields> {
    let title = resolve_title_field(fields)?;
    let keywords = resolve_keyword_field(fields).map(|field| field.name.clone());
    Some(ResolvedFields {
        title: title.name.clone(),
        keywords,
    })
}

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::keywords::fields::{resolve_fields, AirtableRecord, FieldDefinition};
use crate::keywords::parser::{keyword_field_text, parse_keyword_value};

/// Reserved keyword for titles without any parsed keyword.
pub const UNCATEGORIZED: &str = "未分類";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleWithKeyword {
    pub title: String,
    pub record_id: String,
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_keyword_field: Option<String>,
}

impl TitleWithKeyword {
    pub fn new(
        title: impl Into<String>,
        record_id: impl Into<String>,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            record_id: record_id.into(),
            keywords,
            original_keyword_field: None,
        }
    }

    pub fn is_uncategorized(&self) -> bool {
        self.keywords.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordGroup {
    pub keyword: String,
    pub titles: Vec<TitleWithKeyword>,
    pub count: usize,
}

impl KeywordGroup {
    fn new(keyword: String) -> Self {
        Self {
            keyword,
            titles: Vec::new(),
            count: 0,
        }
    }

    fn push(&mut self, title: TitleWithKeyword) {
        self.titles.push(title);
        self.count = self.titles.len();
    }
}

/// Titles paired with their parsed keywords. Returns an empty list when no
/// title field can be resolved.
pub fn extract_titles_with_keywords(
    records: &[AirtableRecord],
    fields: &[FieldDefinition],
) -> Vec<TitleWithKeyword> {
    let Some(resolved) = resolve_fields(fields) else {
        let names: Vec<&str> = fields.iter().map(|field| field.name.as_str()).collect();
        warn!(fields = ?names, "no title field found; keyword extraction skipped");
        return Vec::new();
    };
    debug!(
        title_field = %resolved.title,
        keyword_field = ?resolved.keywords,
        records = records.len(),
        "extracting titles with keywords"
    );

    let mut titles = Vec::new();
    for record in records {
        let title = match record.field(&resolved.title).and_then(|value| value.as_str()) {
            Some(value) if !value.trim().is_empty() => value.trim().to_string(),
            _ => continue,
        };

        let keyword_value = resolved
            .keywords
            .as_deref()
            .and_then(|name| record.field(name));
        let keywords = keyword_value.map(parse_keyword_value).unwrap_or_default();
        let original_keyword_field = keyword_value.and_then(keyword_field_text);

        titles.push(TitleWithKeyword {
            title,
            record_id: record.id.clone(),
            keywords,
            original_keyword_field,
        });
    }
    titles
}

/// A title with N keywords lands in N groups. Groups are ordered by count,
/// ties by first appearance, with the uncategorized group always last.
pub fn create_keyword_groups(titles: &[TitleWithKeyword]) -> Vec<KeywordGroup> {
    let mut groups: Vec<KeywordGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut uncategorized = KeywordGroup::new(UNCATEGORIZED.to_string());

    for title in titles {
        if title.is_uncategorized() {
            uncategorized.push(title.clone());
            continue;
        }
        let mut seen = HashSet::new();
        for keyword in &title.keywords {
            if !seen.insert(keyword.as_str()) {
                continue;
            }
            if keyword == UNCATEGORIZED {
                uncategorized.push(title.clone());
                continue;
            }
            let slot = *index.entry(keyword.clone()).or_insert_with(|| {
                groups.push(KeywordGroup::new(keyword.clone()));
                groups.len() - 1
            });
            groups[slot].push(title.clone());
        }
    }

    groups.sort_by(|a, b| b.count.cmp(&a.count));
    if uncategorized.count > 0 {
        groups.push(uncategorized);
    }
    groups
}

/// An empty selection keeps everything.
pub fn filter_titles_by_keywords(
    titles: &[TitleWithKeyword],
    selected: &[String],
) -> Vec<TitleWithKeyword> {
    if selected.is_empty() {
        return titles.to_vec();
    }

    let include_uncategorized = selected.iter().any(|keyword| keyword == UNCATEGORIZED);
    titles
        .iter()
        .filter(|title| {
            (include_uncategorized && title.is_uncategorized())
                || title.keywords.iter().any(|keyword| selected.contains(keyword))
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordFilter {
    pub selected_keywords: Vec<String>,
    pub filtered_titles: Vec<TitleWithKeyword>,
    pub available_keywords: Vec<KeywordGroup>,
}

impl KeywordFilter {
    pub fn compute(titles: &[TitleWithKeyword], selected: Vec<String>) -> Self {
        let filtered_titles = filter_titles_by_keywords(titles, &selected);
        Self {
            selected_keywords: selected,
            filtered_titles,
            available_keywords: create_keyword_groups(titles),
        }
    }

    /// A new view for another selection over the same titles.
    pub fn reselect(&self, titles: &[TitleWithKeyword], selected: Vec<String>) -> Self {
        Self {
            selected_keywords: selected.clone(),
            filtered_titles: filter_titles_by_keywords(titles, &selected),
            available_keywords: self.available_keywords.clone(),
        }
    }
}

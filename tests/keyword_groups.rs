use serde_json::json;
use channel_insights::keyword_view;
use channel_insights::keywords::{
    create_keyword_groups, extract_titles_with_keywords, filter_titles_by_keywords,
    parse_keyword_value, parse_keywords, resolve_fields, resolve_keyword_field,
    resolve_title_field, AirtableRecord, FieldDefinition, KeywordFilter, TitleWithKeyword,
    UNCATEGORIZED,
};

fn field(name: &str) -> FieldDefinition {
    FieldDefinition::new(format!("fld_{}", name), name, "singleLineText")
}

fn record(id: &str, fields: serde_json::Value) -> AirtableRecord {
    AirtableRecord {
        id: id.to_string(),
        created_time: "2024-01-01T00:00:00.000Z".to_string(),
        fields: fields.as_object().cloned().unwrap_or_default(),
    }
}

fn title(name: &str, keywords: &[&str]) -> TitleWithKeyword {
    TitleWithKeyword::new(
        name,
        format!("rec_{}", name),
        keywords.iter().map(|keyword| keyword.to_string()).collect(),
    )
}

fn names(titles: &[TitleWithKeyword]) -> Vec<&str> {
    titles.iter().map(|title| title.title.as_str()).collect()
}

#[test]
fn parse_splits_on_separators_and_strips_prefixes() {
    assert_eq!(
        parse_keywords("AI, #Shorts; marketing|SEO"),
        vec!["AI", "Shorts", "marketing", "SEO"]
    );
    assert_eq!(
        parse_keywords("video editing,,  ;; @creator\n##growth hacks"),
        vec!["video editing", "creator", "growth hacks"]
    );
}

#[test]
fn parse_degrades_to_empty() {
    assert!(parse_keywords("").is_empty());
    assert!(parse_keywords(" , ; # | @@ \n").is_empty());
    assert!(parse_keyword_value(&json!(null)).is_empty());
    assert!(parse_keyword_value(&json!(42)).is_empty());
    assert!(parse_keyword_value(&json!({"tag": "x"})).is_empty());
}

#[test]
fn parse_flattens_list_cells() {
    let value = json!(["AI, tools", 7, "#Shorts"]);
    assert_eq!(parse_keyword_value(&value), vec!["AI", "tools", "Shorts"]);
}

#[test]
fn title_field_resolution_follows_preference_order() {
    let fields = vec![field("Episode Title"), field("Name"), field("Video Title")];
    assert_eq!(resolve_title_field(&fields).unwrap().name, "Video Title");

    let fields = vec![field("Episode Title"), field("NAME")];
    assert_eq!(resolve_title_field(&fields).unwrap().name, "NAME");

    let fields = vec![field("Notes"), field("Working title")];
    assert_eq!(resolve_title_field(&fields).unwrap().name, "Working title");

    let fields = vec![field("Notes")];
    assert!(resolve_title_field(&fields).is_none());
}

#[test]
fn keyword_field_resolution_follows_preference_order() {
    let fields = vec![field("Hashtags"), field("Tag"), field("Keywords")];
    assert_eq!(resolve_keyword_field(&fields).unwrap().name, "Keywords");

    let fields = vec![field("Hashtags"), field("SEO keyword list")];
    assert_eq!(resolve_keyword_field(&fields).unwrap().name, "SEO keyword list");

    let fields = vec![field("Title"), field("Hashtags")];
    let resolved = resolve_fields(&fields).unwrap();
    assert_eq!(resolved.title, "Title");
    assert_eq!(resolved.keywords.as_deref(), Some("Hashtags"));
}

#[test]
fn extraction_skips_blank_titles() {
    let fields = vec![field("Title"), field("Tags")];
    let records = vec![
        record("rec1", json!({"Title": "  How I edit  ", "Tags": "editing, #workflow"})),
        record("rec2", json!({"Title": "   ", "Tags": "ignored"})),
        record("rec3", json!({"Title": 12, "Tags": "ignored"})),
        record("rec4", json!({"Title": "No tags here"})),
    ];

    let titles = extract_titles_with_keywords(&records, &fields);
    assert_eq!(titles.len(), 2);
    assert_eq!(titles[0].title, "How I edit");
    assert_eq!(titles[0].record_id, "rec1");
    assert_eq!(titles[0].keywords, vec!["editing", "workflow"]);
    assert_eq!(titles[0].original_keyword_field.as_deref(), Some("editing, #workflow"));
    assert!(titles[1].keywords.is_empty());
    assert!(titles[1].original_keyword_field.is_none());
}

#[test]
fn extraction_without_title_field_is_empty() {
    let fields = vec![field("Notes"), field("Tags")];
    let records = vec![record("rec1", json!({"Notes": "x", "Tags": "a"}))];
    assert!(extract_titles_with_keywords(&records, &fields).is_empty());
}

#[test]
fn groups_fan_out_with_uncategorized_last() {
    let titles = vec![title("A", &["x", "y"]), title("B", &[])];
    let groups = create_keyword_groups(&titles);

    let keywords: Vec<&str> = groups.iter().map(|group| group.keyword.as_str()).collect();
    assert_eq!(keywords, vec!["x", "y", UNCATEGORIZED]);
    assert_eq!(names(&groups[0].titles), vec!["A"]);
    assert_eq!(names(&groups[1].titles), vec!["A"]);
    assert_eq!(names(&groups[2].titles), vec!["B"]);
    assert!(groups.iter().all(|group| group.count == group.titles.len()));
}

#[test]
fn groups_order_by_count_even_when_uncategorized_is_largest() {
    let titles = vec![
        title("one", &["rare"]),
        title("two", &["common"]),
        title("three", &["common"]),
        title("four", &[]),
        title("five", &[]),
        title("six", &[]),
    ];
    let groups = create_keyword_groups(&titles);

    let summary: Vec<(&str, usize)> = groups
        .iter()
        .map(|group| (group.keyword.as_str(), group.count))
        .collect();
    assert_eq!(summary, vec![("common", 2), ("rare", 1), (UNCATEGORIZED, 3)]);
}

#[test]
fn groups_omit_uncategorized_when_every_title_has_keywords() {
    let titles = vec![title("A", &["x"]), title("B", &["x", "x"])];
    let groups = create_keyword_groups(&titles);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].count, 2);
}

#[test]
fn empty_selection_is_identity() {
    let titles = vec![title("A", &["x"]), title("B", &[])];
    assert_eq!(filter_titles_by_keywords(&titles, &[]), titles);
}

#[test]
fn selection_matches_any_keyword_or_uncategorized() {
    let titles = vec![
        title("A", &["x", "y"]),
        title("B", &[]),
        title("C", &["z"]),
        title("D", &["y"]),
    ];

    let selected = vec!["y".to_string()];
    assert_eq!(names(&filter_titles_by_keywords(&titles, &selected)), vec!["A", "D"]);

    let selected = vec![UNCATEGORIZED.to_string(), "z".to_string()];
    assert_eq!(names(&filter_titles_by_keywords(&titles, &selected)), vec!["B", "C"]);

    let selected = vec!["missing".to_string()];
    assert!(filter_titles_by_keywords(&titles, &selected).is_empty());
}

#[test]
fn keyword_filter_view_recomputes_for_new_selection() {
    let titles = vec![title("A", &["x"]), title("B", &["y"]), title("C", &[])];

    let view = KeywordFilter::compute(&titles, Vec::new());
    assert_eq!(view.filtered_titles.len(), 3);
    assert_eq!(view.available_keywords.len(), 3);

    let narrowed = view.reselect(&titles, vec!["x".to_string()]);
    assert_eq!(names(&narrowed.filtered_titles), vec!["A"]);
    assert_eq!(narrowed.available_keywords, view.available_keywords);
    assert!(view.selected_keywords.is_empty());
}

#[test]
fn keyword_view_infers_fields_from_records() {
    let records = vec![
        record(
            "rec1",
            json!({"Video Title": "Shorts that worked", "Keywords": ["Shorts", "growth"]}),
        ),
        record("rec2", json!({"Video Title": "Q&A", "Keywords": ""})),
    ];

    let view = keyword_view(&records, &[], vec!["growth".to_string()]);
    assert_eq!(names(&view.filtered_titles), vec!["Shorts that worked"]);
    let keywords: Vec<&str> = view
        .available_keywords
        .iter()
        .map(|group| group.keyword.as_str())
        .collect();
    assert_eq!(keywords, vec!["Shorts", "growth", UNCATEGORIZED]);
}

#[test]
fn inferred_fields_list_each_name_once() {
    let records = vec![
        record("rec1", json!({"Title": "a", "Tags": "x"})),
        record("rec2", json!({"Title": "b", "Views": 10})),
    ];
    let fields = FieldDefinition::infer_from_records(&records);
    let mut field_names: Vec<&str> = fields.iter().map(|field| field.name.as_str()).collect();
    field_names.sort();
    assert_eq!(field_names, vec!["Tags", "Title", "Views"]);
    let views = fields.iter().find(|field| field.name == "Views").unwrap();
    assert_eq!(views.field_type, "number");
}

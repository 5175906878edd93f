pub mod fields;
pub mod groups;
pub mod parser;

pub use fields::{
    resolve_fields, resolve_keyword_field, resolve_title_field, AirtableRecord, FieldDefinition,
    ResolvedFields,
};
pub use groups::{
    create_keyword_groups, extract_titles_with_keywords, filter_titles_by_keywords, KeywordFilter,
    KeywordGroup, TitleWithKeyword, UNCATEGORIZED,
};
pub use parser::{keyword_field_text, parse_keyword_value, parse_keywords};

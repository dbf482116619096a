//! Index mapping for the course index
//!
//! `title` is analyzed for token match while `titleSuggest` carries the same
//! text for phrase-prefix matching: one conceptual attribute, indexed twice
//! under two matching strategies.

use serde_json::{json, Value};

use crate::documents::fields;

/// Full index-creation body, mappings included.
pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                fields::TITLE: { "type": "text" },
                fields::DESCRIPTION: { "type": "text" },
                fields::TITLE_SUGGEST: { "type": "text" },
                fields::CATEGORY: { "type": "keyword" },
                fields::TYPE: { "type": "keyword" },
                fields::MIN_AGE: { "type": "integer" },
                fields::MAX_AGE: { "type": "integer" },
                fields::PRICE: { "type": "double" },
                fields::NEXT_SESSION_DATE: { "type": "date" },
            }
        }
    })
}

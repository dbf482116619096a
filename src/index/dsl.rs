//! Elasticsearch Query DSL rendering
//!
//! Translates a [`ComposedSearch`] or [`ComposedSuggest`] into the `_search`
//! body JSON. Rendering is the only place that knows the index's wire format;
//! composition itself stays backend-agnostic.

use serde_json::{json, Map, Value};

use crate::documents::fields;
use crate::query::{Clause, ComposedSearch, ComposedSuggest, CompoundQuery, SortMode};

/// Render a composed search into a complete `_search` body.
pub fn search_body(composed: &ComposedSearch) -> Value {
    json!({
        "query": query_value(&composed.query),
        "sort": sort_value(composed.sort),
        "from": composed.page.from,
        "size": composed.page.size,
        "track_total_hits": true,
    })
}

/// Render a composed suggestion query. Fan-out is capped at the requested
/// limit; deduplication happens after execution.
pub fn suggest_body(composed: &ComposedSuggest) -> Value {
    json!({
        "query": clause_value(&composed.clause),
        "size": composed.limit,
    })
}

fn query_value(query: &CompoundQuery) -> Value {
    if query.is_match_all() {
        return json!({ "match_all": {} });
    }

    let mut bool_query = Map::new();
    if !query.relevance.is_empty() {
        let must: Vec<Value> = query.relevance.iter().map(clause_value).collect();
        bool_query.insert("must".to_string(), Value::Array(must));
    }
    if !query.filter.is_empty() {
        let filter: Vec<Value> = query.filter.iter().map(clause_value).collect();
        bool_query.insert("filter".to_string(), Value::Array(filter));
    }

    json!({ "bool": bool_query })
}

fn clause_value(clause: &Clause) -> Value {
    match clause {
        Clause::MultiMatch {
            fields,
            query,
            fuzzy,
        } => {
            let mut multi_match = json!({
                "fields": fields,
                "query": query,
            });
            if *fuzzy {
                multi_match["fuzziness"] = json!("AUTO");
            }
            json!({ "multi_match": multi_match })
        }
        Clause::Range { field, gte, lte } => {
            let mut bounds = Map::new();
            if let Some(gte) = gte {
                bounds.insert("gte".to_string(), gte.clone());
            }
            if let Some(lte) = lte {
                bounds.insert("lte".to_string(), lte.clone());
            }
            let mut range = Map::new();
            range.insert((*field).to_string(), Value::Object(bounds));
            json!({ "range": range })
        }
        Clause::Term { field, value } => {
            let mut term = Map::new();
            term.insert((*field).to_string(), json!(value));
            json!({ "term": term })
        }
        Clause::PhrasePrefix { field, prefix } => {
            let mut phrase = Map::new();
            phrase.insert((*field).to_string(), json!({ "query": prefix }));
            json!({ "match_phrase_prefix": phrase })
        }
    }
}

fn sort_value(sort: SortMode) -> Value {
    // The chosen sort key fully overrides relevance score; _score never
    // participates even when a text clause is present.
    match sort {
        SortMode::PriceAsc => json!([{ fields::PRICE: { "order": "asc" } }]),
        SortMode::PriceDesc => json!([{ fields::PRICE: { "order": "desc" } }]),
        SortMode::Upcoming => json!([{ fields::NEXT_SESSION_DATE: { "order": "asc" } }]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{compose, suggest_query, SearchCriteria};

    #[test]
    fn test_empty_criteria_renders_match_all() {
        let composed = compose(&SearchCriteria::new()).unwrap();
        let body = search_body(&composed);
        assert_eq!(body["query"], json!({ "match_all": {} }));
        assert_eq!(body["from"], json!(0));
        assert_eq!(body["size"], json!(10));
        assert_eq!(body["track_total_hits"], json!(true));
    }

    #[test]
    fn test_text_and_filters_render_bool_groups() {
        let mut criteria = SearchCriteria::new().with_text("music");
        criteria.category = Some("Art".to_string());
        criteria.min_age = Some(6);
        let body = search_body(&compose(&criteria).unwrap());

        let must = body["query"]["bool"]["must"].as_array().unwrap();
        let filter = body["query"]["bool"]["filter"].as_array().unwrap();
        assert_eq!(must.len(), 1);
        assert_eq!(filter.len(), 2);
        assert_eq!(
            must[0]["multi_match"]["fields"],
            json!(["title", "description"])
        );
        assert_eq!(filter[0]["range"]["minAge"]["gte"], json!(6));
        assert_eq!(filter[1]["term"]["category"], json!("Art"));
    }

    #[test]
    fn test_bool_groups_omitted_when_empty() {
        let composed = compose(&SearchCriteria::new().with_text("music")).unwrap();
        let body = search_body(&composed);
        assert!(body["query"]["bool"].get("filter").is_none());
        assert!(body["query"]["bool"].get("must").is_some());

        let mut criteria = SearchCriteria::new();
        criteria.max_price = Some(50.0);
        let body = search_body(&compose(&criteria).unwrap());
        assert!(body["query"]["bool"].get("must").is_none());
        assert_eq!(
            body["query"]["bool"]["filter"][0]["range"]["price"]["lte"],
            json!(50.0)
        );
    }

    #[test]
    fn test_fuzziness_rendered_only_when_enabled() {
        let plain = search_body(&compose(&SearchCriteria::new().with_text("music")).unwrap());
        let fuzzy = search_body(
            &compose(&SearchCriteria::new().with_text("music").with_fuzzy(true)).unwrap(),
        );

        assert!(plain["query"]["bool"]["must"][0]["multi_match"]
            .get("fuzziness")
            .is_none());
        assert_eq!(
            fuzzy["query"]["bool"]["must"][0]["multi_match"]["fuzziness"],
            json!("AUTO")
        );
    }

    #[test]
    fn test_sort_rendering_per_mode() {
        let upcoming = search_body(&compose(&SearchCriteria::new()).unwrap());
        assert_eq!(
            upcoming["sort"],
            json!([{ "nextSessionDate": { "order": "asc" } }])
        );

        let asc = search_body(
            &compose(&SearchCriteria::new().with_sort(crate::query::SortMode::PriceAsc)).unwrap(),
        );
        assert_eq!(asc["sort"], json!([{ "price": { "order": "asc" } }]));

        let desc = search_body(
            &compose(&SearchCriteria::new().with_sort(crate::query::SortMode::PriceDesc)).unwrap(),
        );
        assert_eq!(desc["sort"], json!([{ "price": { "order": "desc" } }]));
    }

    #[test]
    fn test_score_never_in_sort() {
        let body = search_body(&compose(&SearchCriteria::new().with_text("music")).unwrap());
        assert!(!body["sort"].to_string().contains("_score"));
    }

    #[test]
    fn test_suggest_body_shape() {
        let body = suggest_body(&suggest_query("Cour", 5).unwrap());
        assert_eq!(
            body["query"]["match_phrase_prefix"]["titleSuggest"]["query"],
            json!("Cour")
        );
        assert_eq!(body["size"], json!(5));
        assert!(body.get("sort").is_none());
    }
}

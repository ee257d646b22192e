use serde::{Deserialize, Serialize};
use crate::core::error::Result;
use crate::core::utils::lenient_opt_int;

/// Structured paper query. Conference labels match exactly; keywords match as
/// case-insensitive substrings of the title or abstract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub selected_conferences: Vec<String>,
    #[serde(default, deserialize_with = "lenient_opt_int")]
    pub start_year: Option<i64>,    // None matches no year
    #[serde(default, deserialize_with = "lenient_opt_int")]
    pub end_year: Option<i64>,      // None matches no year
    #[serde(default)]
    pub title_keywords: Vec<String>,
    #[serde(default)]
    pub abstract_keywords: Vec<String>,
}

impl SearchQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conferences<I, S>(mut self, conferences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_conferences = conferences.into_iter().map(Into::into).collect();
        self
    }

    pub fn years(mut self, start: i64, end: i64) -> Self {
        self.start_year = Some(start);
        self.end_year = Some(end);
        self
    }

    pub fn title_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.title_keywords.push(keyword.into());
        self
    }

    pub fn abstract_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.abstract_keywords.push(keyword.into());
        self
    }

    /// Inclusive year bounds. `None` when either end is missing or did not
    /// parse, in which case no record is in range.
    pub fn year_range(&self) -> Option<(i64, i64)> {
        Some((self.start_year?, self.end_year?))
    }

    /// Cache key: JSON with a fixed field order
    pub fn key(&self) -> Result<QueryKey> {
        Ok(QueryKey {
            signature: serde_json::to_string(self)?,
        })
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct QueryKey {
    pub signature: String,
}

/// Sort key for result ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Conference,
    Year,
    Title,
    Order,
}

impl SortKey {
    /// Unknown names sort by `order`
    pub fn parse(name: &str) -> Self {
        match name {
            "conference" => SortKey::Conference,
            "year" => SortKey::Year,
            "title" => SortKey::Title,
            _ => SortKey::Order,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Conference => "conference",
            SortKey::Year => "year",
            SortKey::Title => "title",
            SortKey::Order => "order",
        }
    }
}

/// Sort order for query results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,   // Ascending: 0 → 9, A → Z
    Desc,  // Descending: 9 → 0, Z → A
}

impl SortOrder {
    /// Anything but "desc" is ascending
    pub fn parse(name: &str) -> Self {
        if name == "desc" { SortOrder::Desc } else { SortOrder::Asc }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_wire_query() {
        let query: SearchQuery = serde_json::from_value(json!({
            "selectedConferences": ["CVPR"],
            "startYear": "2023",
            "endYear": 2024,
            "titleKeywords": ["deep"],
            "abstractKeywords": []
        }))
        .unwrap();

        assert_eq!(query, SearchQuery::new().conferences(["CVPR"]).years(2023, 2024).title_keyword("deep"));
    }

    #[test]
    fn test_missing_or_unparseable_bounds_have_no_range() {
        let query: SearchQuery = serde_json::from_value(json!({"titleKeywords": ["x"]})).unwrap();
        assert_eq!(query.year_range(), None);
        assert!(query.selected_conferences.is_empty());

        let query: SearchQuery = serde_json::from_value(json!({"startYear": "", "endYear": "abc"})).unwrap();
        assert_eq!(query.year_range(), None);

        let query: SearchQuery = serde_json::from_value(json!({"startYear": "2020", "endYear": null})).unwrap();
        assert_eq!(query.year_range(), None);

        let query: SearchQuery = serde_json::from_value(json!({"startYear": "2020a", "endYear": 2021.9})).unwrap();
        assert_eq!(query.year_range(), Some((2020, 2021)));
    }

    #[test]
    fn test_key_is_stable_and_distinguishes_queries() {
        let a = SearchQuery::new().conferences(["CVPR"]).years(2020, 2024);
        let b = a.clone();
        let c = a.clone().title_keyword("graph");

        assert_eq!(a.key().unwrap(), b.key().unwrap());
        assert_ne!(a.key().unwrap(), c.key().unwrap());
        assert!(a.key().unwrap().signature.starts_with(r#"{"selectedConferences":["CVPR"]"#));
    }

    #[test]
    fn test_sort_key_and_order_parse() {
        assert_eq!(SortKey::parse("year"), SortKey::Year);
        assert_eq!(SortKey::parse("citations"), SortKey::Order);
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Asc);
    }
}

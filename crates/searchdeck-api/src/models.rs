// Wire types for the search backend's JSON API
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Body status value the backend uses for a successful operation.
pub const STATUS_SUCCESS: &str = "success";

/// One search hit as returned by `POST /search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// One saved record as returned by `GET /get_repository_data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub search_keyword: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub keyword: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SaveRequest<'a> {
    pub results: &'a [SearchResultItem],
    pub keyword: &'a str,
}

/// Filter for `GET /get_repository_data`. Every field is optional and is
/// omitted from the query string entirely when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryQuery {
    pub keyword: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl RepositoryQuery {
    /// Query-string pairs for the fields that are actually set.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(keyword) = self.keyword.as_deref() {
            params.push(("keyword", keyword));
        }
        if let Some(date_from) = self.date_from.as_deref() {
            params.push(("date_from", date_from));
        }
        if let Some(date_to) = self.date_to.as_deref() {
            params.push(("date_to", date_to));
        }
        params
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub status: String,
    #[serde(default, deserialize_with = "rows_or_empty")]
    pub data: Vec<SearchResultItem>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub status: String,
    #[serde(default, deserialize_with = "rows_or_empty")]
    pub data: Vec<RepositoryRecord>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SearchResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

impl SaveResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

impl QueryResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// The backend is loose about the `data` field: on error paths it may be
/// null, absent, or not an array at all. Coerce anything non-array to empty
/// rather than failing the whole response.
fn rows_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(serde::de::Error::custom))
            .collect(),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_parses_items() {
        let body = r#"{
            "status": "success",
            "data": [
                {"url": "http://a", "title": "A"},
                {"url": "http://b", "title": "B", "summary": "second"}
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(response.is_success());
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.data[1].url, "http://b");
        assert_eq!(response.data[1].summary.as_deref(), Some("second"));
        assert!(response.data[0].summary.is_none());
    }

    #[test]
    fn test_non_array_data_coerces_to_empty() {
        for body in [
            r#"{"status": "success", "data": null}"#,
            r#"{"status": "success", "data": "oops"}"#,
            r#"{"status": "success", "data": {"unexpected": true}}"#,
            r#"{"status": "success"}"#,
        ] {
            let response: SearchResponse = serde_json::from_str(body).unwrap();
            assert!(response.data.is_empty(), "body: {body}");
        }
    }

    #[test]
    fn test_error_response_carries_message() {
        let body = r#"{"status": "error", "message": "搜索失败: boom"}"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert!(!response.is_success());
        assert_eq!(response.message.as_deref(), Some("搜索失败: boom"));
    }

    #[test]
    fn test_repository_record_optional_fields() {
        let body = r#"{
            "status": "success",
            "data": [{
                "url": "http://a",
                "search_keyword": "rust",
                "created_at": "2024-01-05 03:04:05"
            }]
        }"#;

        let response: QueryResponse = serde_json::from_str(body).unwrap();
        let record = &response.data[0];
        assert!(record.title.is_none());
        assert!(record.summary.is_none());
        assert_eq!(record.search_keyword, "rust");
    }

    #[test]
    fn test_query_params_only_include_set_fields() {
        let query = RepositoryQuery {
            keyword: Some("rust".into()),
            date_from: None,
            date_to: Some("2024-06-01".into()),
        };
        assert_eq!(
            query.params(),
            vec![("keyword", "rust"), ("date_to", "2024-06-01")]
        );

        assert!(RepositoryQuery::default().params().is_empty());
    }

    #[test]
    fn test_save_request_shape() {
        let results = vec![SearchResultItem {
            url: "http://a".into(),
            title: Some("A".into()),
            summary: None,
        }];
        let request = SaveRequest {
            results: &results,
            keyword: "rust",
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["keyword"], "rust");
        assert_eq!(json["results"][0]["url"], "http://a");
    }
}

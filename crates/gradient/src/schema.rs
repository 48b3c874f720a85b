use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Parameters of one knowledge-base retrieve call.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrieveDocumentsParams {
    pub knowledge_base_id: String,
    pub num_results: u32,
    pub query: String,
}

/// JSON body posted to the retrieve endpoint. The knowledge base id travels in the path.
#[derive(Serialize)]
pub(crate) struct RetrieveBody<'a> {
    pub num_results: u32,
    pub query: &'a str,
}

impl<'a> From<&'a RetrieveDocumentsParams> for RetrieveBody<'a> {
    fn from(params: &'a RetrieveDocumentsParams) -> Self {
        Self {
            num_results: params.num_results,
            query: &params.query,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetrieveResponse {
    #[serde(default, deserialize_with = "lenient_results")]
    pub results: Option<Vec<RawResult>>,
    #[serde(default)]
    pub total_results: Option<u64>,
}

impl RetrieveResponse {
    pub fn result_count(&self) -> usize {
        self.results.as_ref().map_or(0, Vec::len)
    }
}

/// One entry of the service's result collection.
///
/// The service does not guarantee a schema per entry, so every field is optional.
/// Fields wrapped in `Option<Option<_>>` distinguish a missing key (`None`)
/// from a key sent as `null` (`Some(None)`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub text_content: Option<String>,
    #[serde(default, deserialize_with = "present_score")]
    pub score: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present_score")]
    pub relevance_score: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub document_id: Option<Option<Value>>,
    #[serde(default, deserialize_with = "present")]
    pub chunk_id: Option<Option<Value>>,
    #[serde(default, deserialize_with = "present")]
    pub source: Option<Option<Value>>,
    #[serde(default, deserialize_with = "object_only")]
    pub metadata: Option<Map<String, Value>>,
}

/// Entries that are not objects (`null` included) become empty results, so they
/// are skipped downstream but keep their position in the list.
fn lenient_results<'de, D>(deserializer: D) -> Result<Option<Vec<RawResult>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(entries) = Option::<Vec<Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };

    entries
        .into_iter()
        .map(|entry| match entry {
            Value::Object(_) => RawResult::deserialize(entry).map_err(D::Error::custom),
            _ => Ok(RawResult::default()),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// Metadata that is not a JSON object is treated as absent.
fn object_only<'de, D>(deserializer: D) -> Result<Option<Map<String, Value>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    })
}

/// Only runs when the key exists, so a present key always yields `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Number {
    Float(f64),
    Bool(bool),
    Text(String),
}

/// Scores arrive as JSON numbers, occasionally as numeric strings or booleans.
fn present_score<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let score = match Option::<Number>::deserialize(deserializer)? {
        None => None,
        Some(Number::Float(value)) => Some(value),
        Some(Number::Bool(flag)) => Some(if flag { 1.0 } else { 0.0 }),
        Some(Number::Text(text)) => Some(
            text.trim()
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("invalid score: {text:?}")))?,
        ),
    };
    Ok(Some(score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_fields_differ() {
        let result: RawResult = serde_json::from_value(json!({
            "text_content": "hello",
            "document_id": null,
        }))
        .unwrap();

        assert_eq!(result.document_id, Some(None));
        assert_eq!(result.chunk_id, None);
        assert_eq!(result.score, None);
    }

    #[test]
    fn test_score_accepts_numbers_and_strings() {
        let result: RawResult = serde_json::from_value(json!({
            "score": 1,
            "relevance_score": "0.25",
        }))
        .unwrap();

        assert_eq!(result.score, Some(Some(1.0)));
        assert_eq!(result.relevance_score, Some(Some(0.25)));
    }

    #[test]
    fn test_null_score_is_present() {
        let result: RawResult = serde_json::from_value(json!({ "score": null })).unwrap();
        assert_eq!(result.score, Some(None));
    }

    #[test]
    fn test_boolean_scores() {
        let result: RawResult = serde_json::from_value(json!({
            "score": true,
            "relevance_score": false,
        }))
        .unwrap();

        assert_eq!(result.score, Some(Some(1.0)));
        assert_eq!(result.relevance_score, Some(Some(0.0)));
    }

    #[test]
    fn test_non_object_entries_become_empty_results() {
        let response: RetrieveResponse = serde_json::from_value(json!({
            "results": [null, "junk", { "text_content": "kept" }]
        }))
        .unwrap();

        let results = response.results.unwrap();
        assert_eq!(results.len(), 3);
        assert!(results[0].text_content.is_none());
        assert!(results[1].text_content.is_none());
        assert_eq!(results[2].text_content.as_deref(), Some("kept"));
    }

    #[test]
    fn test_non_object_metadata_is_absent() {
        for metadata in [json!([]), json!(""), json!(7), json!(null)] {
            let result: RawResult = serde_json::from_value(json!({
                "text_content": "kept",
                "metadata": metadata,
            }))
            .unwrap();
            assert!(result.metadata.is_none());
        }
    }

    #[test]
    fn test_results_null_is_absent() {
        let response: RetrieveResponse =
            serde_json::from_value(json!({ "results": null })).unwrap();
        assert!(response.results.is_none());
    }

    #[test]
    fn test_non_numeric_score_is_rejected() {
        let err = serde_json::from_value::<RawResult>(json!({ "score": "high" })).unwrap_err();
        assert!(err.to_string().contains("invalid score"));
    }

    #[test]
    fn test_response_without_results() {
        let response: RetrieveResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_none());
        assert_eq!(response.result_count(), 0);
    }

    #[test]
    fn test_body_omits_knowledge_base_id() {
        let params = RetrieveDocumentsParams {
            knowledge_base_id: "kb-1".into(),
            num_results: 3,
            query: "what".into(),
        };
        let body = serde_json::to_value(RetrieveBody::from(&params)).unwrap();
        assert_eq!(body, json!({ "num_results": 3, "query": "what" }));
    }
}

use gradient::{RawResult, RetrieveResponse};
use serde_json::{Map, Value};

use crate::schema::{NodeWithScore, TextNode};

/// Prefix of the identifiers generated for results without a chunk id.
pub const FALLBACK_ID_PREFIX: &str = "gradient_kb_";
pub const DEFAULT_SCORE: f64 = 1.0;

/// Convert a knowledge-base response into scored nodes.
///
/// Server order is preserved and entries without text are dropped. Fallback ids
/// use the entry's position in the raw result list, skipped entries included.
pub fn convert_to_nodes(response: &RetrieveResponse) -> Vec<NodeWithScore> {
    let Some(results) = response.results.as_deref() else {
        return Vec::new();
    };

    results
        .iter()
        .enumerate()
        .filter_map(|(idx, result)| convert_result(idx, result))
        .collect()
}

fn convert_result(idx: usize, result: &RawResult) -> Option<NodeWithScore> {
    let text = result.text_content.as_deref().filter(|t| !t.is_empty())?;

    let metadata = build_metadata(result);
    let id = match metadata.get("chunk_id") {
        Some(chunk_id) if is_truthy(chunk_id) => value_to_string(chunk_id),
        _ => format!("{FALLBACK_ID_PREFIX}{idx}"),
    };

    Some(NodeWithScore {
        node: TextNode {
            id,
            text: text.to_string(),
            metadata,
        },
        score: extract_score(result),
    })
}

fn build_metadata(result: &RawResult) -> Map<String, Value> {
    let mut metadata = Map::new();

    let extracted = [
        ("document_id", &result.document_id),
        ("chunk_id", &result.chunk_id),
        ("source", &result.source),
    ];
    for (key, field) in extracted {
        // A key sent as null is still recorded
        if let Some(value) = field {
            metadata.insert(key.to_string(), value.clone().unwrap_or(Value::Null));
        }
    }

    if let Some(extra) = &result.metadata {
        for (key, value) in extra {
            metadata.insert(key.clone(), value.clone());
        }
    }

    metadata
}

/// `score` wins over `relevance_score` whenever the key exists, even when null.
fn extract_score(result: &RawResult) -> f64 {
    match (result.score, result.relevance_score) {
        (Some(score), _) => score.unwrap_or(DEFAULT_SCORE),
        (None, Some(relevance)) => relevance.unwrap_or(DEFAULT_SCORE),
        (None, None) => DEFAULT_SCORE,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

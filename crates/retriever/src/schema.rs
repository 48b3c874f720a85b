use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-text query handed to a retriever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryBundle {
    pub query_str: String,
}

impl From<&str> for QueryBundle {
    fn from(query_str: &str) -> Self {
        Self {
            query_str: query_str.to_string(),
        }
    }
}

impl From<String> for QueryBundle {
    fn from(query_str: String) -> Self {
        Self { query_str }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub id: String,
    pub text: String,
    pub metadata: Map<String, Value>,
}

/// A retrieved passage and its relevance score, as consumed by query engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeWithScore {
    pub node: TextNode,
    pub score: f64,
}

impl NodeWithScore {
    pub fn id(&self) -> &str {
        &self.node.id
    }

    pub fn text(&self) -> &str {
        &self.node.text
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.node.metadata
    }
}

pub mod config;
pub mod error;
pub mod normalizer;
pub mod retriever;
pub mod schema;

pub use config::RetrieverConfig;
pub use error::{Result, RetrieverError};
pub use normalizer::convert_to_nodes;
pub use retriever::GradientKbRetriever;
pub use schema::{NodeWithScore, QueryBundle, TextNode};

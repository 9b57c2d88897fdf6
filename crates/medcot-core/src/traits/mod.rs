mod embedding;
mod federated;
mod nli;
mod reranker;

pub use embedding::IEmbeddingProvider;
pub use federated::{IFederatedSource, RemoteEdge};
pub use nli::{INliScorer, NliDistribution};
pub use reranker::IReranker;

/// Graph model errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("path has no steps")]
    EmptyPath,

    #[error("path revisits node {node_id}")]
    CyclicPath { node_id: String },

    #[error("path is disconnected between {from} and {to}")]
    DisconnectedPath { from: String, to: String },
}

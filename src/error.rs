use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while building, validating or loading creatures and their networks
#[derive(Debug, Error)]
pub enum Error {
    #[error("graph declares {vertices} vertices but lists edges for {edges}")]
    VertexCount { vertices: usize, edges: usize },
    #[error("vertex {vertex} lists synapse {from} outside of 0..{vertices}")]
    SynapseOutOfRange {
        vertex: usize,
        from: usize,
        vertices: usize,
    },
    #[error("network has {neurons} neurons, {wanted} are needed for sensing and moving")]
    TooFewNeurons { neurons: usize, wanted: usize },
    #[error("{what} holds {len} values, expected {expected}")]
    Shape {
        what: &'static str,
        len: usize,
        expected: usize,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

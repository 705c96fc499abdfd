use thiserror::Error;

/// Validation failures raised while building or querying a [`Graph`](crate::Graph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex '{0}' already exists")]
    DuplicateVertex(String),

    #[error("vertex '{0}' not found")]
    VertexNotFound(String),

    #[error("risk weight cannot be negative, got {0}")]
    InvalidWeight(i64),

    #[error("self-loops are not allowed (vertex '{0}')")]
    SelfLoopNotAllowed(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failures of the list, stack and heap primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectionError {
    #[error("container is empty")]
    EmptyContainer,

    #[error("priority queue is empty")]
    EmptyQueue,

    #[error("index {index} out of range for length {size}")]
    IndexOutOfRange { index: usize, size: usize },
}

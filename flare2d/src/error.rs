use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown node: {index}")]
    UnknownNode { index: usize },

    #[error("node {index} is not a path")]
    NotAPath { index: usize },

    #[error("node {index} is not a shape")]
    NotAShape { index: usize },

    #[error("cannot parent node {node} under {parent}: it would create a cycle")]
    CyclicParent { node: usize, parent: usize },

    #[error("vertex deform buffer has {actual} values, expected {expected}")]
    VertexDeformLength { expected: usize, actual: usize },

    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[error("invalid path point type: {value}")]
    InvalidPointType { value: u8 },

    #[cfg(feature = "binary")]
    #[error("failed to parse path points: {message}")]
    BinaryParse { message: String },

    #[cfg(feature = "json")]
    #[error("failed to parse scene JSON: {message}")]
    JsonParse { message: String },

    #[cfg(feature = "json")]
    #[error("unknown parent {parent} referenced by node {node}")]
    JsonUnknownParent { node: usize, parent: usize },

    #[cfg(feature = "json")]
    #[error("unknown node {target} referenced by {context} of node {node}")]
    JsonUnknownReference {
        node: usize,
        target: usize,
        context: String,
    },

    #[cfg(feature = "json")]
    #[error("unknown node type '{value}' for node {node}")]
    JsonUnknownNodeType { node: usize, value: String },

    #[cfg(feature = "json")]
    #[error("unknown point type '{value}' in path node {node}")]
    JsonUnknownPointType { node: usize, value: String },
}

use std::fmt;

use crate::types::NodeId;

/// Error type for circuit evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A node cannot be interpreted as one of the NNF shapes: it refers to a
    /// child that does not exist or does not precede it, or it is a root id
    /// outside the arena.
    MalformedNode { node: NodeId, reason: String },
    /// A variable reachable from the root has no probability assigned.
    MissingProbability { name: String },
}

impl Error {
    pub(crate) fn malformed(node: NodeId, reason: impl Into<String>) -> Self {
        Error::MalformedNode {
            node,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedNode { node, reason } => write!(f, "Malformed node {}: {}", node, reason),
            Error::MissingProbability { name } => write!(f, "No probability for variable '{}'", name),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

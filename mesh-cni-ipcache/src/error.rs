use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown resource kind: {0}")]
    UnknownResourceKind(String),

    #[error("malformed resource id: {0}")]
    MalformedResourceId(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while decoding or querying descriptors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("malformed descriptor `{descriptor}`: {reason}")]
    MalformedDescriptor {
        descriptor: String,
        reason: &'static str,
    },

    #[error("asked for the object class name of non-object type `{0}`")]
    ObjectNameOnNonObject(String),

    #[error("asked for the mangled class name of non-object type `{0}`")]
    MangledNameOnNonObject(String),

    #[error("object reference has no resolved class")]
    UnresolvedObjectClass,
}

impl Error {
    pub(crate) fn malformed(descriptor: &str, reason: &'static str) -> Self {
        Error::MalformedDescriptor {
            descriptor: descriptor.to_string(),
            reason,
        }
    }
}

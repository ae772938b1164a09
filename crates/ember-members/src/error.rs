pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while building member descriptions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Descriptor(#[from] ember_descriptor::Error),

    #[error("member owner `{0}` is not a class type")]
    OwnerNotAClass(String),
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The container is not a ZIP archive, or a required part is missing.
    #[error("Malformed package: {0}")]
    MalformedPackage(String),

    #[error("Malformed XML in {part}: {source}")]
    MalformedXml {
        part: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("Comment not found: {0}")]
    CommentNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

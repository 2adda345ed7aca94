use std::path::PathBuf;

/// Failure to turn a dump file into a [`crate::CredentialDump`].
///
/// Always fatal: nothing has been sent to the target when this is returned.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("read credential dump {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse credential dump: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("credential dump must be a JSON object of categories, found {found}")]
    NotAnObject { found: &'static str },
    #[error("category {category} must be an array of records, found {found}")]
    CategoryNotArray {
        category: String,
        found: &'static str,
    },
    #[error("record {index} in category {category} must be an object, found {found}")]
    RecordNotObject {
        category: String,
        index: usize,
        found: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("missing credential field: {0}")]
    MissingField(&'static str),
    #[error("credential field {0} must be a scalar value")]
    NotScalar(&'static str),
}

//! Shared data model for credmig.
//!
//! This crate intentionally does **not** depend on any HTTP client. It knows how
//! to read a credential dump and how categories map onto the target service's
//! URL namespace; the network side lives in `credmig-core`.

pub mod category;
pub mod dump;
pub mod errors;
pub mod method;
pub mod record;

pub use category::{NOTIFIER_CATEGORY, NOTIFY_SEGMENT, effective_category, path_segment};
pub use dump::{CredentialCategory, CredentialDump};
pub use errors::{LoadError, RecordError};
pub use method::HttpMethod;
pub use record::{ACCOUNT_FIELD, CredentialRecord, IDENTIFIER_FIELD, SUB_TYPE_FIELD};

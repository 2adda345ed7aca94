//! Migration of dumped credentials onto a running credential service.
//!
//! `credmig-common` owns the dump model; this crate does the IO: building the
//! service URLs, sending requests through a [`CredsClient`], and reporting.

pub mod client;
pub mod migrate;
pub mod report;
pub mod urls;

pub use client::{
    CredsClient, CredsClientConfig, CredsRequest, CredsResponse, TransportError,
    TransportErrorKind, WreqCredsClient,
};
pub use credmig_common::{
    CredentialCategory, CredentialDump, CredentialRecord, HttpMethod, LoadError, RecordError,
};
pub use migrate::{MigrateError, MigrationSummary, Migrator, RecordOutcome};
pub use report::ProgressReporter;
pub use urls::{CredentialTarget, creation_url, lookup_url};

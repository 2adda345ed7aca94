use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use credmig_common::{CredentialDump, CredentialRecord, HttpMethod, LoadError, RecordError};

use crate::client::{CredsClient, CredsRequest, CredsResponse, TransportError};
use crate::report::ProgressReporter;
use crate::urls::CredentialTarget;

/// Faults that stop the whole run.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("record {index} in category {category}: {source}")]
    Record {
        category: String,
        index: usize,
        #[source]
        source: RecordError,
    },
    #[error("{method} {url}: {source}")]
    Transport {
        method: HttpMethod,
        url: String,
        #[source]
        source: TransportError,
    },
    #[error("encode credential body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What happened to one record. Failures here are reported and skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Updated,
    UpdateFailed { status: u16, error: String },
    Created,
    CreateFailed { status: u16, error: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    pub total: usize,
    pub updated: usize,
    pub created: usize,
    pub update_failed: usize,
    pub create_failed: usize,
}

impl MigrationSummary {
    pub fn failed(&self) -> usize {
        self.update_failed + self.create_failed
    }

    fn record(&mut self, outcome: &RecordOutcome) {
        self.total += 1;
        match outcome {
            RecordOutcome::Updated => self.updated += 1,
            RecordOutcome::UpdateFailed { .. } => self.update_failed += 1,
            RecordOutcome::Created => self.created += 1,
            RecordOutcome::CreateFailed { .. } => self.create_failed += 1,
        }
    }
}

/// Copies every record of a dump onto a running credential service.
///
/// For each record: look it up, then update it in place if the lookup
/// succeeded, otherwise create it. Any non-2xx lookup (404 and 5xx alike)
/// leads to a create. Requests are issued one at a time in document order.
pub struct Migrator<W: Write> {
    client: Arc<dyn CredsClient>,
    host_port: String,
    reporter: ProgressReporter<W>,
}

impl<W: Write> Migrator<W> {
    pub fn new(client: Arc<dyn CredsClient>, host_port: impl Into<String>, out: W) -> Self {
        Self {
            client,
            host_port: host_port.into(),
            reporter: ProgressReporter::new(out),
        }
    }

    pub fn into_output(self) -> W {
        self.reporter.into_inner()
    }

    pub async fn migrate(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<MigrationSummary, MigrateError> {
        let path = path.as_ref();
        let dump = CredentialDump::load(path).inspect_err(|err| {
            error!(path = %path.display(), error = %err, "credential dump load failed");
        })?;
        self.migrate_dump(&dump).await
    }

    pub async fn migrate_dump(
        &mut self,
        dump: &CredentialDump,
    ) -> Result<MigrationSummary, MigrateError> {
        info!(
            target_host = %self.host_port,
            categories = dump.categories().len(),
            records = dump.record_count(),
            "migration started"
        );

        let mut summary = MigrationSummary::default();
        for category in dump.categories() {
            self.reporter.category(&category.name);
            for (index, record) in category.records.iter().enumerate() {
                let target = CredentialTarget::for_record(&category.name, record).map_err(
                    |source| {
                        error!(category = %category.name, index, error = %source, "invalid record");
                        MigrateError::Record {
                            category: category.name.clone(),
                            index,
                            source,
                        }
                    },
                )?;
                let outcome = self.migrate_record(&target, record).await?;
                self.reporter.outcome(&outcome);
                summary.record(&outcome);
            }
        }

        info!(
            total = summary.total,
            updated = summary.updated,
            created = summary.created,
            failed = summary.failed(),
            "migration finished"
        );
        self.reporter.summary(&summary);
        Ok(summary)
    }

    async fn migrate_record(
        &mut self,
        target: &CredentialTarget,
        record: &CredentialRecord,
    ) -> Result<RecordOutcome, MigrateError> {
        self.reporter.record(&target.account, &target.identifier);

        let body = record.to_body()?;
        let lookup_url = target.lookup_url(&self.host_port);
        let existing = self.send(CredsRequest::get(&lookup_url)).await?;

        if existing.is_ok() {
            self.reporter.updating();
            let resp = self.send(CredsRequest::put(lookup_url, body)).await?;
            return Ok(if resp.is_ok() {
                RecordOutcome::Updated
            } else {
                RecordOutcome::UpdateFailed {
                    status: resp.status,
                    error: resp.text,
                }
            });
        }

        // TODO: only a 404 should mean "absent"; a 5xx lookup currently falls
        // through to a create and can duplicate an existing credential.
        self.reporter.creating();
        let resp = self
            .send(CredsRequest::post(
                target.creation_url(&self.host_port),
                body,
            ))
            .await?;
        Ok(if resp.is_ok() {
            RecordOutcome::Created
        } else {
            RecordOutcome::CreateFailed {
                status: resp.status,
                error: resp.text,
            }
        })
    }

    async fn send(&self, req: CredsRequest) -> Result<CredsResponse, MigrateError> {
        let method = req.method;
        let url = req.url.clone();
        debug!(method = %method, url = %url, "sending request");

        let resp = self.client.send(req).await.map_err(|source| {
            error!(method = %method, url = %url, error = %source, "request failed");
            MigrateError::Transport {
                method,
                url: url.clone(),
                source,
            }
        })?;

        if resp.is_ok() {
            debug!(method = %method, url = %url, status = resp.status, "request ok");
        } else {
            warn!(method = %method, url = %url, status = resp.status, "request rejected");
        }
        Ok(resp)
    }
}

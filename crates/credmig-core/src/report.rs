use std::io::Write;

use crate::migrate::{MigrationSummary, RecordOutcome};

const CATEGORY_RULE: &str = "====================================";
const RECORD_RULE: &str = "--------";

/// Human-readable progress for whoever is watching the run.
///
/// Writes are best-effort: a closed or failing stream never stops a migration.
pub struct ProgressReporter<W: Write> {
    out: W,
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn category(&mut self, raw_category: &str) {
        self.line(&format!(
            "\n{CATEGORY_RULE}\n\nPROCESSING {raw_category}\n\n{CATEGORY_RULE}\n"
        ));
    }

    pub fn record(&mut self, account: &str, identifier: &str) {
        self.line(&format!("handling {account}|{identifier}"));
    }

    pub fn updating(&mut self) {
        self.line("updating existing credential");
    }

    pub fn creating(&mut self) {
        self.line("creating new credential");
    }

    pub fn outcome(&mut self, outcome: &RecordOutcome) {
        let text = match outcome {
            RecordOutcome::Updated => "successfully updated".to_string(),
            RecordOutcome::Created => "successfully created".to_string(),
            RecordOutcome::UpdateFailed { error, .. } => {
                format!("failed to update credential, error is {error}")
            }
            RecordOutcome::CreateFailed { error, .. } => {
                format!("failed to create credential, error is {error}")
            }
        };
        self.line(&text);
        self.line(&format!("\n{RECORD_RULE}\n"));
    }

    pub fn summary(&mut self, summary: &MigrationSummary) {
        self.line(&format!(
            "processed {} credentials: {} updated, {} created, {} failed",
            summary.total,
            summary.updated,
            summary.created,
            summary.failed()
        ));
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(f: impl FnOnce(&mut ProgressReporter<Vec<u8>>)) -> String {
        let mut reporter = ProgressReporter::new(Vec::new());
        f(&mut reporter);
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn category_banner_uses_raw_name() {
        let out = render(|r| r.category("NOTIFIER"));
        assert!(out.contains("PROCESSING NOTIFIER\n"));
        assert!(out.starts_with("\n===================================="));
    }

    #[test]
    fn failure_carries_error_text() {
        let out = render(|r| {
            r.record("a", "cfg");
            r.creating();
            r.outcome(&RecordOutcome::CreateFailed {
                status: 400,
                error: "bad subType".to_string(),
            });
        });
        assert_eq!(
            out,
            "handling a|cfg\ncreating new credential\nfailed to create credential, error is bad subType\n\n--------\n\n"
        );
    }

    #[test]
    fn summary_line() {
        let summary = MigrationSummary {
            total: 5,
            updated: 2,
            created: 1,
            update_failed: 1,
            create_failed: 1,
        };
        assert_eq!(
            render(|r| r.summary(&summary)),
            "processed 5 credentials: 2 updated, 1 created, 2 failed\n"
        );
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn broken_stream_is_ignored() {
        let mut reporter = ProgressReporter::new(Broken);
        reporter.updating();
        reporter.outcome(&RecordOutcome::Updated);
    }
}

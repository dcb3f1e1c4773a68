use futures::{StreamExt, stream};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use crate::classify::{self, NOT_FOUND};
use crate::config::Config;
use crate::prober::{FollowPolicy, HttpProber, Probe};
use crate::progress::ProgressReporter;
use crate::record::{Record, Status};
use crate::resolver::{RewriteSuggestion, resolve_alternate};

/// Runs the probe/classify/resolve chain over a whole batch of records
/// with a bounded number of probes in flight.
pub struct Checker {
    prober: Arc<dyn Probe>,
}

impl Checker {
    pub fn new(prober: Arc<dyn Probe>) -> Self {
        Self { prober }
    }

    pub fn with_config(config: &Config) -> crate::error::Result<Self> {
        Ok(Self::new(Arc::new(HttpProber::from_config(config)?)))
    }

    /// Process every record exactly once, at most `concurrency_limit`
    /// probes in flight. Completion order is arbitrary; the returned
    /// sequence preserves input order. Returns only after the whole batch
    /// has settled, one way or the other.
    pub async fn check_records(
        &self,
        records: Vec<Record>,
        config: &Config,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Vec<Record> {
        let total = records.len();
        if let Some(ref mut prog) = progress {
            prog.start_probing(total);
        }
        let progress_view = progress.as_deref();

        // Completion counter shared by all workers; the progress sink is
        // notified on every increment.
        let completed = Arc::new(AtomicUsize::new(0));

        let mut settled = stream::iter(records.into_iter().enumerate())
            .map(|(index, record)| {
                let completed = Arc::clone(&completed);
                async move {
                    let record = self.process_record(record, config).await;
                    let done = completed.fetch_add(1, AtomicOrdering::SeqCst) + 1;
                    if let Some(prog) = progress_view {
                        prog.update(done);
                    }
                    (index, record)
                }
            })
            .buffer_unordered(config.concurrency_limit());

        // Records land out of order; slot them back by input index.
        let mut slots: Vec<Option<Record>> = Vec::new();
        slots.resize_with(total, || None);
        while let Some((index, record)) = settled.next().await {
            slots[index] = Some(record);
        }
        drop(settled);

        if let Some(prog) = progress_view {
            prog.finish(total);
        }

        slots.into_iter().flatten().collect()
    }

    /// Probe one record, classify the answer and, in the domain-aware
    /// pipeline, chase the mirror for not-found pages. Each record is
    /// owned by exactly one worker, so mutation needs no locking.
    async fn process_record(&self, mut record: Record, config: &Config) -> Record {
        let follow = if config.follow_redirects.unwrap_or(true) {
            FollowPolicy::FollowRedirects
        } else {
            FollowPolicy::Manual
        };

        let outcome = match self.prober.probe(&record.url, follow).await {
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("Error fetching URL {}: {}", record.url, err);
                record.status = Some(Status::Error);
                return record;
            }
        };

        let on_primary_domain = config.is_primary_domain(&record.url);
        let classification = classify::classify(
            &record.url,
            &outcome.final_url,
            outcome.status_code,
            !on_primary_domain,
        );
        crate::logging::log_probe_result(
            &record.url,
            classification.effective_status,
            classification.redirect_target.as_deref(),
        );
        record.status = Some(Status::Code(classification.effective_status));
        record.redirect_to = classification.redirect_target;

        if config.secondary_probe.unwrap_or(false)
            && classification.effective_status == NOT_FOUND
            && on_primary_domain
            && let (Some(primary), Some(alternate)) = (
                config.primary_domain.as_deref(),
                config.alternate_base.as_deref(),
            )
        {
            match resolve_alternate(self.prober.as_ref(), &record.url, primary, alternate).await
            {
                Ok(RewriteSuggestion::Rule(rule)) => record.nginx_config = Some(rule),
                Ok(RewriteSuggestion::Unresolvable) => record.nginx_config = None,
                Err(err) => {
                    // A failed secondary probe takes precedence over the
                    // already-computed primary status.
                    log::warn!("Error probing mirror for {}: {}", record.url, err);
                    record.status = Some(Status::Error);
                }
            }
        }

        record
    }
}

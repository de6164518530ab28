//! Background rebalance worker
//!
//! Deletions hand a [`RebalanceJob`] to the [`RebalanceQueue`]; the
//! [`RebalanceWorker`] consumes the mpsc channel, retries jobs with failed
//! items and parks exhausted jobs in [`DeadLetters`].

use super::error::ServiceError;
use super::rebalancer::WorkloadRebalancer;
use parking_lot::Mutex;
use shared::models::DeadLetter;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_util::sync::CancellationToken;

/// Rebalance request for an approver that was just deleted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebalanceJob {
    pub departing_phone: String,
}

impl RebalanceJob {
    pub fn new(departing_phone: impl Into<String>) -> Self {
        Self {
            departing_phone: departing_phone.into(),
        }
    }
}

// ============================================================================
// Dead letters
// ============================================================================

/// Bounded list of jobs that gave up; the oldest entry is evicted first
#[derive(Clone)]
pub struct DeadLetters {
    entries: Arc<Mutex<VecDeque<DeadLetter>>>,
    capacity: usize,
}

impl DeadLetters {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::new())),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&self, letter: DeadLetter) {
        let mut entries = self.entries.lock();
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(letter);
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<DeadLetter> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

// ============================================================================
// Queue
// ============================================================================

/// Sending side of the rebalance channel
#[derive(Clone)]
pub struct RebalanceQueue {
    tx: mpsc::Sender<RebalanceJob>,
    dead_letters: DeadLetters,
}

impl RebalanceQueue {
    pub fn channel(capacity: usize, dead_letters: DeadLetters) -> (Self, mpsc::Receiver<RebalanceJob>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx, dead_letters }, rx)
    }

    /// Enqueue without waiting. A job that cannot be queued is dead-lettered
    /// and `false` is returned.
    pub fn submit(&self, job: RebalanceJob) -> bool {
        let (job, reason) = match self.tx.try_send(job) {
            Ok(()) => return true,
            Err(TrySendError::Full(job)) => (job, "rebalance queue full"),
            Err(TrySendError::Closed(job)) => (job, "rebalance queue closed"),
        };
        tracing::error!(phone = %job.departing_phone, reason, "Rebalance job not queued");
        self.dead_letters.push(DeadLetter {
            departing_phone: job.departing_phone,
            attempts: 0,
            last_error: reason.to_string(),
            item_ids: Vec::new(),
            recorded_at: shared::util::now_millis(),
        });
        false
    }

    pub fn dead_letters(&self) -> &DeadLetters {
        &self.dead_letters
    }
}

// ============================================================================
// Worker
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Attempts per job, at least 1
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

pub struct RebalanceWorker {
    rebalancer: WorkloadRebalancer,
    policy: RetryPolicy,
    dead_letters: DeadLetters,
}

impl RebalanceWorker {
    pub fn new(rebalancer: WorkloadRebalancer, policy: RetryPolicy, dead_letters: DeadLetters) -> Self {
        Self {
            rebalancer,
            policy,
            dead_letters,
        }
    }

    /// Run until the channel closes or `shutdown` fires
    pub async fn run(self, mut rx: mpsc::Receiver<RebalanceJob>, shutdown: CancellationToken) {
        tracing::info!("Rebalance worker started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Rebalance worker received shutdown signal");
                    break;
                }
                job = rx.recv() => match job {
                    Some(job) => self.process(job).await,
                    None => {
                        tracing::info!("Rebalance channel closed, worker stopping");
                        break;
                    }
                }
            }
        }
    }

    /// Run one job to completion or into the dead letters
    pub async fn process(&self, job: RebalanceJob) {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = String::new();
        let mut stuck_items = Vec::new();

        for attempt in 1..=max_attempts {
            match self.rebalancer.reassign_pending_for(&job.departing_phone).await {
                Ok(report) if report.is_complete() => {
                    tracing::info!(
                        phone = %job.departing_phone,
                        attempt,
                        reassigned = report.reassigned_count(),
                        "Rebalance job completed"
                    );
                    return;
                }
                Ok(report) => {
                    stuck_items = report.failures().map(|(id, _)| id).collect();
                    if let Some((item_id, reason)) = report.failures().next() {
                        last_error = ServiceError::PartialReassignmentFailure {
                            item_id,
                            reason: reason.to_string(),
                        }
                        .to_string();
                    }
                }
                Err(e) => last_error = e.to_string(),
            }

            tracing::warn!(
                phone = %job.departing_phone,
                attempt,
                max_attempts,
                error = %last_error,
                "Rebalance attempt incomplete"
            );
            if attempt < max_attempts {
                tokio::time::sleep(self.policy.delay).await;
            }
        }

        tracing::error!(
            phone = %job.departing_phone,
            attempts = max_attempts,
            items = stuck_items.len(),
            error = %last_error,
            "Rebalance job dead-lettered"
        );
        self.dead_letters.push(DeadLetter {
            departing_phone: job.departing_phone,
            attempts: max_attempts,
            last_error,
            item_ids: stuck_items,
            recorded_at: shared::util::now_millis(),
        });
    }
}

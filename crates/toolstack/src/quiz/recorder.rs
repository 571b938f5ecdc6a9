use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::answers::QuizAnswers;
use super::engine::QuizResult;
use super::steps::StepOption;
use crate::catalog::ToolSlug;

/// Identifier assigned by a recorder to a stored response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(pub u64);

/// Analytics row for one completed quiz. Only the top pick is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResponseRecord {
    pub answers: QuizAnswers,
    pub top_pick_slug: ToolSlug,
    pub top_pick_score: f32,
    pub recorded_at: DateTime<Utc>,
}

impl QuizResponseRecord {
    pub fn new(answers: QuizAnswers, result: &QuizResult) -> Self {
        Self {
            answers,
            top_pick_slug: result.top_pick.slug.clone(),
            top_pick_score: result.top_pick.score,
            recorded_at: Utc::now(),
        }
    }
}

/// Sink for quiz responses.
pub trait ResponseRecorder: Send + Sync {
    fn record(&self, record: &QuizResponseRecord) -> Result<ResponseId, RecorderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("response log io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("response log csv failure: {0}")]
    Csv(#[from] csv::Error),
    #[error("response store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only CSV file of quiz responses.
pub struct CsvResponseLog {
    path: PathBuf,
    writer: Mutex<csv::Writer<File>>,
    next_id: AtomicU64,
}

const LOG_HEADER: [&str; 9] = [
    "id",
    "recorded_at",
    "role",
    "goals",
    "technical",
    "budget",
    "workflow",
    "top_pick_slug",
    "top_pick_score",
];

impl CsvResponseLog {
    /// Open `path` for appending, writing the header when the file is new or empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RecorderError> {
        let path = path.as_ref().to_path_buf();
        let existing_rows = count_rows(&path)?;

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(LOG_HEADER)?;
            writer.flush()?;
        }

        Ok(Self {
            path,
            writer: Mutex::new(writer),
            next_id: AtomicU64::new(existing_rows + 1),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn count_rows(path: &Path) -> Result<u64, RecorderError> {
    if !path.exists() {
        return Ok(0);
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = 0;
    for record in reader.records() {
        record?;
        rows += 1;
    }
    Ok(rows)
}

fn option_value<T: StepOption>(option: Option<T>) -> &'static str {
    option.map(T::value).unwrap_or("")
}

impl ResponseRecorder for CsvResponseLog {
    fn record(&self, record: &QuizResponseRecord) -> Result<ResponseId, RecorderError> {
        let mut writer = self.writer.lock().expect("response log mutex poisoned");
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let answers = &record.answers;
        let goals = answers
            .goals()
            .iter()
            .map(|goal| goal.value())
            .collect::<Vec<_>>()
            .join(";");

        writer.write_record([
            id.to_string().as_str(),
            record.recorded_at.to_rfc3339().as_str(),
            option_value(answers.role),
            goals.as_str(),
            option_value(answers.technical),
            option_value(answers.budget),
            option_value(answers.workflow),
            record.top_pick_slug.as_str(),
            record.top_pick_score.to_string().as_str(),
        ])?;
        writer.flush()?;

        Ok(ResponseId(id))
    }
}

/// Delivery counters shared by the dispatcher and the background worker.
#[derive(Debug, Default)]
pub struct RecorderStats {
    recorded: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecorderStatsSnapshot {
    pub recorded: u64,
    pub failed: u64,
    pub dropped: u64,
}

impl RecorderStats {
    pub fn snapshot(&self) -> RecorderStatsSnapshot {
        RecorderStatsSnapshot {
            recorded: self.recorded.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Fire-and-forget handle used on the request path.
#[derive(Clone)]
pub struct ResponseDispatcher {
    sender: mpsc::Sender<QuizResponseRecord>,
    stats: Arc<RecorderStats>,
}

impl ResponseDispatcher {
    /// Queue a record without waiting. A full or closed queue drops the record.
    pub fn dispatch(&self, record: QuizResponseRecord) {
        match self.sender.try_send(record) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(record)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    top_pick = %record.top_pick_slug,
                    "quiz response queue full; response dropped"
                );
            }
            Err(mpsc::error::TrySendError::Closed(record)) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(
                    top_pick = %record.top_pick_slug,
                    "quiz response recorder stopped; response dropped"
                );
            }
        }
    }

    pub fn stats(&self) -> RecorderStatsSnapshot {
        self.stats.snapshot()
    }
}

/// Background task draining the response queue into a recorder.
pub struct RecorderWorker {
    handle: JoinHandle<()>,
    shutdown: oneshot::Sender<()>,
    stats: Arc<RecorderStats>,
}

impl RecorderWorker {
    /// Stop accepting new records, flush what is queued, and return the final counters.
    pub async fn shutdown(self) -> RecorderStatsSnapshot {
        let _ = self.shutdown.send(());
        if let Err(err) = self.handle.await {
            warn!(error = %err, "quiz response recorder task ended abnormally");
        }
        self.stats.snapshot()
    }
}

/// Start the background recorder. Must be called inside a tokio runtime.
pub fn spawn_recorder<R>(
    recorder: Arc<R>,
    capacity: usize,
) -> (ResponseDispatcher, RecorderWorker)
where
    R: ResponseRecorder + ?Sized + 'static,
{
    let (sender, mut receiver) = mpsc::channel::<QuizResponseRecord>(capacity.max(1));
    let (shutdown, mut shutdown_signal) = oneshot::channel::<()>();
    let stats = Arc::new(RecorderStats::default());

    let worker_stats = Arc::clone(&stats);
    let handle = tokio::spawn(async move {
        let mut closing = false;
        loop {
            let next = if closing {
                receiver.recv().await
            } else {
                tokio::select! {
                    next = receiver.recv() => next,
                    _ = &mut shutdown_signal => {
                        closing = true;
                        receiver.close();
                        continue;
                    }
                }
            };

            let Some(record) = next else { break };
            // Recorders do blocking io; keep it off the async workers.
            let sink = Arc::clone(&recorder);
            let outcome = tokio::task::spawn_blocking(move || {
                let outcome = sink.record(&record);
                (record, outcome)
            })
            .await;
            let (record, outcome) = match outcome {
                Ok(pair) => pair,
                Err(err) => {
                    worker_stats.failed.fetch_add(1, Ordering::Relaxed);
                    warn!(error = %err, "quiz response write task ended abnormally");
                    continue;
                }
            };

            match outcome {
                Ok(id) => {
                    worker_stats.recorded.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        response_id = id.0,
                        top_pick = %record.top_pick_slug,
                        "quiz response recorded"
                    );
                }
                Err(err) => {
                    worker_stats.failed.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        error = %err,
                        top_pick = %record.top_pick_slug,
                        "failed to record quiz response"
                    );
                }
            }
        }
    });

    let dispatcher = ResponseDispatcher {
        sender,
        stats: Arc::clone(&stats),
    };
    let worker = RecorderWorker {
        handle,
        shutdown,
        stats,
    };
    (dispatcher, worker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::steps::{BudgetBracket, Goal, Role, TechnicalLevel, WorkflowPreference};

    #[derive(Default)]
    struct VecRecorder {
        records: Mutex<Vec<QuizResponseRecord>>,
    }

    impl ResponseRecorder for VecRecorder {
        fn record(&self, record: &QuizResponseRecord) -> Result<ResponseId, RecorderError> {
            let mut guard = self.records.lock().expect("recorder mutex poisoned");
            guard.push(record.clone());
            Ok(ResponseId(guard.len() as u64))
        }
    }

    struct FailingRecorder;

    impl ResponseRecorder for FailingRecorder {
        fn record(&self, _record: &QuizResponseRecord) -> Result<ResponseId, RecorderError> {
            Err(RecorderError::Unavailable("offline".to_string()))
        }
    }

    fn record(slug: &str) -> QuizResponseRecord {
        QuizResponseRecord {
            answers: QuizAnswers::new(
                Some(Role::Marketer),
                [Goal::Marketing, Goal::MakeMoney],
                Some(TechnicalLevel::Somewhat),
                Some(BudgetBracket::Under20),
                Some(WorkflowPreference::AiFirst),
            ),
            top_pick_slug: ToolSlug::from(slug),
            top_pick_score: 9.5,
            recorded_at: Utc::now(),
        }
    }

    fn scratch_path(name: &str) -> PathBuf {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        std::env::temp_dir().join(format!(
            "toolstack-{name}-{}-{nanos}.csv",
            std::process::id()
        ))
    }

    #[tokio::test]
    async fn worker_records_queued_responses_before_shutdown() {
        let recorder = Arc::new(VecRecorder::default());
        let (dispatcher, worker) = spawn_recorder(Arc::clone(&recorder), 8);

        dispatcher.dispatch(record("mailchimp"));
        dispatcher.dispatch(record("convertkit"));

        let stats = worker.shutdown().await;
        assert_eq!(stats.recorded, 2);
        assert_eq!(stats.dropped, 0);

        let stored = recorder.records.lock().expect("recorder mutex poisoned");
        assert_eq!(stored[1].top_pick_slug, ToolSlug::from("convertkit"));
    }

    #[tokio::test]
    async fn full_queue_drops_without_blocking() {
        let recorder = Arc::new(VecRecorder::default());
        let (dispatcher, worker) = spawn_recorder(Arc::clone(&recorder), 1);

        // the worker has not been polled yet on the current-thread runtime
        dispatcher.dispatch(record("a"));
        dispatcher.dispatch(record("b"));
        dispatcher.dispatch(record("c"));
        assert_eq!(dispatcher.stats().dropped, 2);

        let stats = worker.shutdown().await;
        assert_eq!(stats.recorded, 1);

        dispatcher.dispatch(record("late"));
        assert_eq!(dispatcher.stats().dropped, 3);
    }

    /// Blocks inside `record` until the test releases it, failing if never released.
    struct GatedRecorder {
        entered: mpsc::UnboundedSender<()>,
        release: Mutex<std::sync::mpsc::Receiver<()>>,
    }

    impl ResponseRecorder for GatedRecorder {
        fn record(&self, _record: &QuizResponseRecord) -> Result<ResponseId, RecorderError> {
            let _ = self.entered.send(());
            let release = self.release.lock().expect("gate mutex poisoned");
            release
                .recv_timeout(std::time::Duration::from_secs(2))
                .map(|()| ResponseId(1))
                .map_err(|_| RecorderError::Unavailable("gate never opened".to_string()))
        }
    }

    #[tokio::test]
    async fn slow_writes_leave_the_runtime_free() {
        let (entered_tx, mut entered_rx) = mpsc::unbounded_channel();
        let (release_tx, release_rx) = std::sync::mpsc::channel();
        let recorder = Arc::new(GatedRecorder {
            entered: entered_tx,
            release: Mutex::new(release_rx),
        });
        let (dispatcher, worker) = spawn_recorder(recorder, 4);

        dispatcher.dispatch(record("airtable"));
        // only reachable while the write is parked on another thread
        entered_rx.recv().await.expect("write started");
        release_tx.send(()).expect("gate open");

        let stats = worker.shutdown().await;
        assert_eq!(stats.recorded, 1);
        assert_eq!(stats.failed, 0);
    }

    #[tokio::test]
    async fn recorder_failures_are_counted_not_raised() {
        let (dispatcher, worker) = spawn_recorder(Arc::new(FailingRecorder), 4);
        dispatcher.dispatch(record("stripe"));

        let stats = worker.shutdown().await;
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.recorded, 0);
    }

    #[test]
    fn csv_log_appends_rows_and_resumes_ids() {
        let path = scratch_path("responses");

        let log = CsvResponseLog::open(&path).expect("open log");
        assert_eq!(log.record(&record("zapier")).expect("record"), ResponseId(1));
        assert_eq!(log.record(&record("make")).expect("record"), ResponseId(2));
        drop(log);

        let reopened = CsvResponseLog::open(&path).expect("reopen log");
        assert_eq!(reopened.record(&record("canva")).expect("record"), ResponseId(3));
        drop(reopened);

        let contents = std::fs::read_to_string(&path).expect("read log");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id,recorded_at,role,goals"));
        assert!(lines[1]
            .contains(",marketer,marketing;make-money,somewhat,under-20,ai-first,zapier,9.5"));

        let _ = std::fs::remove_file(&path);
    }
}

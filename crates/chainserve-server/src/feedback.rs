//! Destination for run feedback.
//!
//! Storing feedback is left to whoever implements [`FeedbackSink`]; the
//! server only validates it and hands it over.

use tracing::info;

use crate::dto::FeedbackRecord;

pub trait FeedbackSink: Send + Sync {
    fn record(&self, feedback: &FeedbackRecord);
}

/// Writes feedback to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFeedbackSink;

impl FeedbackSink for LogFeedbackSink {
    fn record(&self, feedback: &FeedbackRecord) {
        info!(
            feedback_id = %feedback.id,
            run_id = %feedback.run_id,
            key = %feedback.key,
            score = ?feedback.score,
            comment = ?feedback.comment,
            "feedback received"
        );
    }
}

use super::domain::{TrackError, TrackRecord};

/// Destination for validated tracking records (log stream, queue, warehouse adapter).
pub trait TrackSink: Send + Sync {
    fn record(&self, record: TrackRecord) -> Result<(), TrackError>;
}

/// Writes each record as one structured `TRACK_RESULT` log event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTrackSink;

impl TrackSink for LogTrackSink {
    fn record(&self, record: TrackRecord) -> Result<(), TrackError> {
        let scores = match &record.scores {
            Some(scores) => serde_json::to_string(scores)
                .map_err(|err| TrackError::Sink(err.to_string()))?,
            None => "null".to_string(),
        };

        tracing::info!(
            target: "track",
            tg_user_id = record.tg_user_id,
            username = record.username.as_deref(),
            event = ?record.event,
            primary = record.primary.as_ref().map(|key| key.as_str()),
            secondary = record.secondary.as_ref().map(|key| key.as_str()),
            scores = %scores,
            created_at = %record.created_at.to_rfc3339(),
            ua = record.user_agent.as_deref(),
            "TRACK_RESULT"
        );
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::profile::Profile;
use crate::questionnaire::TypeKey;

pub(crate) const MISSING_FIELDS: &str = "Missing tg_user_id or primary";

/// Telegram account the quiz runs under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackEvent {
    Open,
    Finish,
    #[serde(other)]
    Other,
}

/// Body of `POST /api/track`. Everything is optional on the wire; see [`TrackRequest::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tg_user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<TrackEvent>,
    #[serde(default, alias = "primary_type", skip_serializing_if = "Option::is_none")]
    pub primary: Option<TypeKey>,
    #[serde(default, alias = "secondary_type", skip_serializing_if = "Option::is_none")]
    pub secondary: Option<TypeKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<IndexMap<TypeKey, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TrackRequest {
    pub fn open(user: &TelegramUser) -> Self {
        Self {
            tg_user_id: Some(user.id),
            username: user.username.clone(),
            event: Some(TrackEvent::Open),
            ..Self::default()
        }
    }

    pub fn finish(user: &TelegramUser, profile: &Profile, now: DateTime<Utc>) -> Self {
        Self {
            tg_user_id: Some(user.id),
            username: user.username.clone(),
            event: Some(TrackEvent::Finish),
            primary: profile.primary_key().cloned(),
            secondary: profile.secondary_key().cloned(),
            scores: Some(profile.scores.clone()),
            created_at: Some(now),
        }
    }

    /// A user id is always required; a primary type is required unless this is an `open` event.
    pub fn validate(
        self,
        user_agent: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<TrackRecord, TrackError> {
        let tg_user_id = self
            .tg_user_id
            .filter(|id| *id != 0)
            .ok_or(TrackError::Validation(MISSING_FIELDS))?;

        let primary = self.primary.filter(|key| !key.as_str().is_empty());
        let needs_primary = self.event != Some(TrackEvent::Open);
        if needs_primary && primary.is_none() {
            return Err(TrackError::Validation(MISSING_FIELDS));
        }

        Ok(TrackRecord {
            tg_user_id,
            username: self.username,
            event: self.event,
            primary,
            secondary: self.secondary,
            scores: self.scores,
            created_at: self.created_at.unwrap_or(now),
            user_agent,
        })
    }
}

/// A validated tracking entry, ready for a sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    pub tg_user_id: i64,
    pub username: Option<String>,
    pub event: Option<TrackEvent>,
    pub primary: Option<TypeKey>,
    pub secondary: Option<TypeKey>,
    pub scores: Option<IndexMap<TypeKey, f64>>,
    pub created_at: DateTime<Utc>,
    pub user_agent: Option<String>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("tracking sink unavailable: {0}")]
    Sink(String),
}

//! Result tracking: the `/api/track` payload contract, its validation, sinks and HTTP router.
//!
//! Delivery is fire-and-forget from the client's point of view. Nothing in the scoring
//! path depends on whether a record reaches a sink.

pub mod domain;
pub mod router;
pub mod sink;

pub use domain::{TelegramUser, TrackError, TrackEvent, TrackRecord, TrackRequest};
pub use router::track_router;
pub use sink::{LogTrackSink, TrackSink};

/// Dedup state for tracking events, owned by the session instead of by the sender.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingMarks {
    open_sent: bool,
    finish_sent: bool,
    last_notified: Option<i64>,
}

impl TrackingMarks {
    /// True the first time it is called per run.
    pub fn claim_open(&mut self) -> bool {
        !std::mem::replace(&mut self.open_sent, true)
    }

    pub fn claim_finish(&mut self) -> bool {
        !std::mem::replace(&mut self.finish_sent, true)
    }

    /// True unless `user_id` was the last user notified. Survives [`Self::reset`].
    pub fn claim_notification(&mut self, user_id: i64) -> bool {
        if self.last_notified == Some(user_id) {
            return false;
        }
        self.last_notified = Some(user_id);
        true
    }

    pub fn open_sent(&self) -> bool {
        self.open_sent
    }

    pub fn finish_sent(&self) -> bool {
        self.finish_sent
    }

    pub fn last_notified(&self) -> Option<i64> {
        self.last_notified
    }

    pub(crate) fn reset(&mut self) {
        self.open_sent = false;
        self.finish_sent = false;
    }
}

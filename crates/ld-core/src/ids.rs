//! Participant id generation

use crate::model::ParticipantId;

/// Source of fresh participant ids
pub trait IdGenerator: Send {
    /// Next unused id
    fn next_id(&mut self) -> ParticipantId;

    /// Ensure every later id is greater than `id`
    fn bump_past(&mut self, id: ParticipantId);
}

/// Monotonic counter
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: ParticipantId,
}

impl SequentialIds {
    /// Counter whose first id is `first`
    pub fn starting_at(first: ParticipantId) -> Self {
        Self { next: first }
    }

    /// Counter seeded from wall-clock milliseconds
    pub fn from_clock() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        Self::starting_at(millis + 1)
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::from_clock()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ParticipantId {
        let id = self.next;
        self.next += 1;
        id
    }

    fn bump_past(&mut self, id: ParticipantId) {
        if id >= self.next {
            self.next = id + 1;
        }
    }
}

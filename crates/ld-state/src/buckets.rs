//! Typed load/save of the session buckets
//!
//! Loads never fail: an absent key, an unreadable store or malformed JSON all
//! degrade to the bucket's default value (logged as a warning). Saves are a
//! full overwrite of the bucket with compact JSON.

use ld_core::{
    AwardCursor, AwardWinner, HistoryRecord, LdResult, MultiAwardSettings, Participant, Settings,
    format_number,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::store::{Bucket, Store};

/// Load a bucket, falling back to `T::default()`
pub fn load_bucket<T, S>(store: &S, bucket: Bucket) -> T
where
    T: DeserializeOwned + Default,
    S: Store + ?Sized,
{
    let raw = match store.get(bucket.key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            log::warn!("Failed to read bucket '{}': {}", bucket.key(), e);
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            log::warn!(
                "Bucket '{}' is malformed, using defaults: {}",
                bucket.key(),
                e
            );
            T::default()
        }
    }
}

/// Overwrite a bucket with `value`
pub fn save_bucket<T, S>(store: &S, bucket: Bucket, value: &T) -> LdResult<()>
where
    T: Serialize + ?Sized,
    S: Store + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(bucket.key(), &json)
}

/// Load the roster, recomputing every number for the loaded size
pub fn load_participants<S: Store + ?Sized>(store: &S) -> Vec<Participant> {
    let mut participants: Vec<Participant> = load_bucket(store, Bucket::Participants);
    let total = participants.len();
    for (index, p) in participants.iter_mut().enumerate() {
        p.number = format_number(index + 1, total);
    }
    participants
}

pub fn save_participants<S: Store + ?Sized>(store: &S, participants: &[Participant]) -> LdResult<()> {
    save_bucket(store, Bucket::Participants, participants)
}

pub fn load_history<S: Store + ?Sized>(store: &S) -> Vec<HistoryRecord> {
    load_bucket(store, Bucket::History)
}

pub fn save_history<S: Store + ?Sized>(store: &S, history: &[HistoryRecord]) -> LdResult<()> {
    save_bucket(store, Bucket::History, history)
}

pub fn load_settings<S: Store + ?Sized>(store: &S) -> Settings {
    load_bucket(store, Bucket::Settings)
}

pub fn save_settings<S: Store + ?Sized>(store: &S, settings: &Settings) -> LdResult<()> {
    save_bucket(store, Bucket::Settings, settings)
}

pub fn load_awards<S: Store + ?Sized>(store: &S) -> MultiAwardSettings {
    load_bucket(store, Bucket::Awards)
}

pub fn save_awards<S: Store + ?Sized>(store: &S, awards: &MultiAwardSettings) -> LdResult<()> {
    save_bucket(store, Bucket::Awards, awards)
}

pub fn load_award_winners<S: Store + ?Sized>(store: &S) -> Vec<AwardWinner> {
    load_bucket(store, Bucket::AwardWinners)
}

pub fn save_award_winners<S: Store + ?Sized>(store: &S, winners: &[AwardWinner]) -> LdResult<()> {
    save_bucket(store, Bucket::AwardWinners, winners)
}

/// Stored award pointer, `None` when never saved or unreadable
pub fn load_award_cursor<S: Store + ?Sized>(store: &S) -> Option<AwardCursor> {
    load_bucket(store, Bucket::AwardCursor)
}

pub fn save_award_cursor<S: Store + ?Sized>(store: &S, cursor: AwardCursor) -> LdResult<()> {
    save_bucket(store, Bucket::AwardCursor, &cursor)
}

//! Award sequencer
//!
//! Multi-award mode draws a fixed list of awards in order. Each award takes
//! `count` winners; once the current award's quota is met the pointer moves
//! to the next award on its own. Nobody wins twice across the whole sequence
//! when repeats are disallowed: the exclusion set is every past winner of
//! any award, not just of the current one.
//!
//! ```text
//! award[0] ──quota met──> award[1] ──quota met──> ... award[K-1] ──quota met──> completed
//! ```
//!
//! `advance`/`retreat` move the pointer by hand; `reset` returns to award[0].

use std::collections::HashSet;

use ld_core::{
    Award, AwardCursor, AwardWinner, LdError, LdResult, MultiAwardSettings, Participant,
    ParticipantId,
};

/// Header of the award results CSV (award, number, name, draw time)
pub const AWARD_CSV_HEADER: [&str; 4] = ["奖项", "编号", "姓名", "抽奖时间"];

/// Draw progress for one award
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwardProgress {
    pub award: Award,
    pub won: usize,
    pub remaining: u32,
    pub is_current: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AwardSequencer {
    settings: MultiAwardSettings,
    current_index: usize,
    /// Newest first
    winners: Vec<AwardWinner>,
}

impl AwardSequencer {
    pub fn new(settings: MultiAwardSettings) -> Self {
        Self {
            settings,
            current_index: 0,
            winners: Vec::new(),
        }
    }

    /// Sequencer restored from storage
    ///
    /// Uses the stored pointer when it names an existing award; otherwise the
    /// pointer resumes at the first award whose quota is still open, or the
    /// last award if all are met.
    pub fn restore(
        settings: MultiAwardSettings,
        winners: Vec<AwardWinner>,
        cursor: Option<AwardCursor>,
    ) -> Self {
        let mut sequencer = Self {
            settings,
            current_index: 0,
            winners,
        };
        sequencer.current_index = match cursor {
            Some(c) if c.current_award_index < sequencer.settings.awards.len() => {
                c.current_award_index
            }
            _ => sequencer.resume_index(),
        };
        sequencer
    }

    pub fn settings(&self) -> &MultiAwardSettings {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.settings.enabled = enabled;
    }

    pub fn awards(&self) -> &[Award] {
        &self.settings.awards
    }

    /// Replace the award list
    ///
    /// Ids must be non-empty and unique, counts positive. Existing winners are
    /// kept and the pointer resumes at the first open award.
    pub fn set_awards(&mut self, awards: Vec<Award>) -> LdResult<()> {
        let mut ids = HashSet::new();
        for award in &awards {
            if award.id.trim().is_empty() {
                return Err(LdError::InvalidAward("empty award id".to_string()));
            }
            if award.count == 0 {
                return Err(LdError::InvalidAward(format!(
                    "award '{}' has zero winners",
                    award.id
                )));
            }
            if !ids.insert(award.id.as_str()) {
                return Err(LdError::InvalidAward(format!(
                    "duplicate award id '{}'",
                    award.id
                )));
            }
        }

        self.settings.awards = awards;
        self.current_index = self.resume_index();
        Ok(())
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn cursor(&self) -> AwardCursor {
        AwardCursor {
            current_award_index: self.current_index,
        }
    }

    pub fn current_award(&self) -> Option<&Award> {
        self.settings.awards.get(self.current_index)
    }

    pub fn winners(&self) -> &[AwardWinner] {
        &self.winners
    }

    pub fn winners_for(&self, award_id: &str) -> usize {
        self.winners.iter().filter(|w| w.award_id == award_id).count()
    }

    pub fn remaining_for(&self, award: &Award) -> u32 {
        let won = u32::try_from(self.winners_for(&award.id)).unwrap_or(u32::MAX);
        award.count.saturating_sub(won)
    }

    /// True once the last award's quota is met with the pointer on it
    pub fn all_completed(&self) -> bool {
        match self.settings.awards.last() {
            Some(last) => {
                self.current_index == self.settings.awards.len() - 1
                    && self.remaining_for(last) == 0
            }
            None => false,
        }
    }

    /// Whether the current award still takes winners
    pub fn can_draw(&self) -> bool {
        self.current_award()
            .map(|award| self.remaining_for(award) > 0)
            .unwrap_or(false)
    }

    /// Everyone who has won any award
    pub fn excluded_ids(&self) -> HashSet<ParticipantId> {
        self.winners.iter().map(|w| w.participant.id).collect()
    }

    /// Record `participant` as a winner of the current award
    ///
    /// Moves to the next award when this fills the quota. Returns `None` if
    /// there is no current award.
    pub fn record(&mut self, participant: &Participant, time: String) -> Option<AwardWinner> {
        let award = self.current_award()?.clone();
        let winner = AwardWinner {
            award_id: award.id.clone(),
            award_name: award.name.clone(),
            participant: participant.clone(),
            time,
        };
        self.winners.insert(0, winner.clone());

        if self.remaining_for(&award) == 0 && self.current_index + 1 < self.settings.awards.len() {
            self.current_index += 1;
            log::info!(
                "Award '{}' complete, moving to '{}'",
                award.name,
                self.settings.awards[self.current_index].name
            );
        }
        Some(winner)
    }

    /// Move the pointer forward; false at the last award
    pub fn advance(&mut self) -> bool {
        if self.current_index + 1 >= self.settings.awards.len() {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Move the pointer back; false at the first award
    pub fn retreat(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Back to the first award with no winners
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.winners.clear();
    }

    pub fn progress(&self) -> Vec<AwardProgress> {
        self.settings
            .awards
            .iter()
            .enumerate()
            .map(|(index, award)| AwardProgress {
                award: award.clone(),
                won: self.winners_for(&award.id),
                remaining: self.remaining_for(award),
                is_current: index == self.current_index,
            })
            .collect()
    }

    /// Quoted CSV of all award winners, newest first
    pub fn export_csv(&self) -> String {
        let mut lines = Vec::with_capacity(self.winners.len() + 1);
        lines.push(csv_row(&AWARD_CSV_HEADER));
        for w in &self.winners {
            lines.push(csv_row(&[
                w.award_name.as_str(),
                w.participant.number.as_str(),
                w.participant.name.as_str(),
                w.time.as_str(),
            ]));
        }
        lines.join("\n")
    }

    fn resume_index(&self) -> usize {
        let awards = &self.settings.awards;
        awards
            .iter()
            .position(|award| self.remaining_for(award) > 0)
            .unwrap_or(awards.len().saturating_sub(1))
    }
}

fn csv_row(fields: &[&str]) -> String {
    fields
        .iter()
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequencer(counts: &[u32]) -> AwardSequencer {
        let awards = counts
            .iter()
            .enumerate()
            .map(|(i, c)| Award::new(format!("a{}", i), format!("Award {}", i), *c))
            .collect();
        AwardSequencer::new(MultiAwardSettings {
            enabled: true,
            awards,
        })
    }

    fn person(id: u64) -> Participant {
        Participant::new(id, format!("P{}", id), format!("{:03}", id))
    }

    fn time() -> String {
        "2024/01/01 12:00:00".to_string()
    }

    #[test]
    fn test_quota_met_advances_once() {
        let mut seq = sequencer(&[1, 2]);
        let first = seq.awards()[0].clone();

        let winner = seq.record(&person(1), time()).unwrap();
        assert_eq!(winner.award_id, "a0");
        assert_eq!(seq.remaining_for(&first), 0);
        assert_eq!(seq.current_index(), 1);
        assert!(!seq.all_completed());
    }

    #[test]
    fn test_all_completed_only_on_last_award() {
        let mut seq = sequencer(&[1, 2]);
        seq.record(&person(1), time());
        seq.record(&person(2), time());
        assert!(!seq.all_completed());
        assert!(seq.can_draw());

        seq.record(&person(3), time());
        assert_eq!(seq.current_index(), 1);
        assert!(seq.all_completed());
        assert!(!seq.can_draw());
    }

    #[test]
    fn test_no_awards() {
        let mut seq = AwardSequencer::default();
        assert!(!seq.all_completed());
        assert!(!seq.can_draw());
        assert!(seq.record(&person(1), time()).is_none());
        assert!(!seq.advance());
        assert!(!seq.retreat());
    }

    #[test]
    fn test_manual_navigation_clamps() {
        let mut seq = sequencer(&[1, 1, 1]);
        assert!(!seq.retreat());
        assert!(seq.advance());
        assert!(seq.advance());
        assert!(!seq.advance());
        assert_eq!(seq.current_index(), 2);
        assert!(seq.retreat());
        assert_eq!(seq.current_index(), 1);
    }

    #[test]
    fn test_retreat_to_filled_award_blocks_draw() {
        let mut seq = sequencer(&[1, 1]);
        seq.record(&person(1), time());
        assert!(seq.retreat());
        assert!(!seq.can_draw());
    }

    #[test]
    fn test_excluded_ids_span_all_awards() {
        let mut seq = sequencer(&[1, 2]);
        seq.record(&person(1), time());
        seq.record(&person(2), time());

        let excluded = seq.excluded_ids();
        assert!(excluded.contains(&1));
        assert!(excluded.contains(&2));
        assert_eq!(excluded.len(), 2);
    }

    #[test]
    fn test_reset() {
        let mut seq = sequencer(&[1, 1]);
        seq.record(&person(1), time());
        seq.record(&person(2), time());

        seq.reset();
        assert_eq!(seq.current_index(), 0);
        assert!(seq.winners().is_empty());
        assert!(seq.can_draw());
    }

    #[test]
    fn test_restore_resumes_at_open_award() {
        let mut seq = sequencer(&[1, 2, 1]);
        seq.record(&person(1), time());
        seq.record(&person(2), time());
        let restored =
            AwardSequencer::restore(seq.settings().clone(), seq.winners().to_vec(), None);
        assert_eq!(restored.current_index(), 1);

        seq.record(&person(3), time());
        seq.record(&person(4), time());
        let restored =
            AwardSequencer::restore(seq.settings().clone(), seq.winners().to_vec(), None);
        assert_eq!(restored.current_index(), 2);
        assert!(restored.all_completed());
    }

    #[test]
    fn test_restore_prefers_valid_cursor() {
        let seq = sequencer(&[1, 1, 1]);
        let cursor = AwardCursor {
            current_award_index: 2,
        };
        let restored = AwardSequencer::restore(seq.settings().clone(), Vec::new(), Some(cursor));
        assert_eq!(restored.current_index(), 2);

        let stale = AwardCursor {
            current_award_index: 9,
        };
        let restored = AwardSequencer::restore(seq.settings().clone(), Vec::new(), Some(stale));
        assert_eq!(restored.current_index(), 0);
    }

    #[test]
    fn test_set_awards_validation() {
        let mut seq = AwardSequencer::default();
        assert!(seq.set_awards(vec![Award::new("", "Blank", 1)]).is_err());
        assert!(seq.set_awards(vec![Award::new("a", "Zero", 0)]).is_err());
        assert!(
            seq.set_awards(vec![Award::new("a", "One", 1), Award::new("a", "Two", 1)])
                .is_err()
        );
        assert!(seq.awards().is_empty());

        seq.set_awards(vec![Award::new("a", "One", 1), Award::new("b", "Two", 1)])
            .unwrap();
        assert_eq!(seq.awards().len(), 2);
    }

    #[test]
    fn test_progress() {
        let mut seq = sequencer(&[2, 1]);
        seq.record(&person(1), time());

        let progress = seq.progress();
        assert_eq!(progress[0].won, 1);
        assert_eq!(progress[0].remaining, 1);
        assert!(progress[0].is_current);
        assert_eq!(progress[1].remaining, 1);
        assert!(!progress[1].is_current);
    }

    #[test]
    fn test_export_csv_newest_first() {
        let mut seq = sequencer(&[2]);
        seq.record(&person(1), "t1".to_string());
        seq.record(&Participant::new(2, "Say \"Hi\"", "002"), "t2".to_string());

        let csv = seq.export_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "\"奖项\",\"编号\",\"姓名\",\"抽奖时间\"");
        assert_eq!(lines[1], "\"Award 0\",\"002\",\"Say \"\"Hi\"\"\",\"t2\"");
        assert_eq!(lines[2], "\"Award 0\",\"001\",\"P1\",\"t1\"");
    }
}

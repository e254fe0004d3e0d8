//! Lottery session
//!
//! Owns the roster, history, award sequencer and draw engine for one data
//! store. Every mutating call persists the buckets it touched before
//! returning. Storage failures are logged and never change the outcome of
//! the call; the in-memory state stays authoritative.

use ld_core::{
    Award, AwardWinner, Clock, HistoryRecord, IdGenerator, LdError, LdResult, Participant,
    ParticipantId, SequentialIds, Settings, SystemClock,
};
use ld_state::{
    Store, load_award_cursor, load_award_winners, load_awards, load_history, load_participants,
    load_settings, save_award_cursor, save_award_winners, save_awards, save_history,
    save_participants, save_settings,
};

use crate::awards::{AwardProgress, AwardSequencer};
use crate::engine::{DrawEngine, DrawState, Exclusion, resolve};
use crate::ledger::HistoryLedger;
use crate::roster::Roster;

/// Which completion a started draw expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Single,
    MultiAward,
}

pub struct LotterySession<S: Store> {
    store: S,
    roster: Roster,
    ledger: HistoryLedger,
    awards: AwardSequencer,
    settings: Settings,
    engine: DrawEngine,
    clock: Box<dyn Clock>,
    /// Mode of the in-progress draw
    mode: Option<DrawMode>,
    /// Last resolved winner
    winner: Option<Participant>,
}

impl<S: Store> LotterySession<S> {
    /// Load a session with clock-seeded ids, the local clock and an OS-seeded RNG
    pub fn open(store: S) -> Self {
        Self::open_with(
            store,
            Box::new(SequentialIds::from_clock()),
            Box::new(SystemClock),
            DrawEngine::new(),
        )
    }

    /// Load a session with explicit capabilities
    pub fn open_with(
        store: S,
        ids: Box<dyn IdGenerator>,
        clock: Box<dyn Clock>,
        engine: DrawEngine,
    ) -> Self {
        let roster = Roster::with_participants(load_participants(&store), ids);
        let ledger = HistoryLedger::from_records(load_history(&store));
        let awards = AwardSequencer::restore(
            load_awards(&store),
            load_award_winners(&store),
            load_award_cursor(&store),
        );
        let settings = load_settings(&store);

        log::info!(
            "Session loaded: {} participants, {} draws, {} awards",
            roster.len(),
            ledger.total_draws(),
            awards.awards().len()
        );

        Self {
            store,
            roster,
            ledger,
            awards,
            settings,
            engine,
            clock,
            mode: None,
            winner: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ROSTER
    // ═══════════════════════════════════════════════════════════════════════

    pub fn participants(&self) -> &[Participant] {
        self.roster.participants()
    }

    /// Roster changes are refused while a draw is running; they would shift
    /// the numbers in the pool it handed out.
    pub fn add_participant(&mut self, name: &str) -> bool {
        if self.is_running() || !self.roster.add(name) {
            return false;
        }
        self.persist_roster();
        true
    }

    pub fn delete_participant(&mut self, id: ParticipantId) -> bool {
        if self.is_running() {
            return false;
        }
        let removed = self.roster.delete(id);
        self.persist_roster();
        removed
    }

    pub fn clear_participants(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.roster.clear();
        self.persist_roster();
        true
    }

    /// Import names from text; returns how many were added
    pub fn import_participants(&mut self, text: &str) -> usize {
        if self.is_running() {
            return 0;
        }
        let added = self.roster.import(text);
        log::info!("Imported {} participants", added);
        self.persist_roster();
        added
    }

    pub fn export_participants(&self) -> String {
        self.roster.export()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SETTINGS & STATISTICS
    // ═══════════════════════════════════════════════════════════════════════

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
        if let Err(e) = save_settings(&self.store, &self.settings) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    pub fn total_participants(&self) -> usize {
        self.roster.len()
    }

    pub fn total_draws(&self) -> usize {
        self.ledger.total_draws()
    }

    pub fn unique_winners(&self) -> usize {
        self.ledger.unique_winners()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SINGLE DRAW
    // ═══════════════════════════════════════════════════════════════════════

    pub fn history(&self) -> &[HistoryRecord] {
        self.ledger.records()
    }

    pub fn draw_state(&self) -> DrawState {
        self.engine.state()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    /// Winner of the last completed draw
    pub fn winner(&self) -> Option<&Participant> {
        self.winner.as_ref()
    }

    pub fn reset_winner(&mut self) {
        self.winner = None;
    }

    /// Start a single-mode draw and return the eligible pool
    ///
    /// With repeats disallowed, anyone whose name is already in the history
    /// is left out.
    pub fn start_draw(&mut self) -> Option<Vec<usize>> {
        let exclusion = if self.settings.allow_repeat {
            Exclusion::None
        } else {
            Exclusion::Names(self.ledger.winner_names())
        };
        self.start(DrawMode::Single, &exclusion)
    }

    /// Complete a single-mode draw on `number` and record it
    ///
    /// Returns `None` if no single-mode draw is running or `number` was not
    /// in its pool.
    pub fn complete_draw(&mut self, number: usize) -> Option<HistoryRecord> {
        let participant = self.finish(DrawMode::Single, number)?;
        let record = HistoryRecord {
            time: self.clock.now(),
            result: participant.number.clone(),
            name: participant.name.clone(),
        };
        self.ledger.record(record.clone());
        self.winner = Some(participant);

        if let Err(e) = save_history(&self.store, self.ledger.records()) {
            log::warn!("Failed to save history: {}", e);
        }
        Some(record)
    }

    /// Start, pick uniformly and complete in one step
    pub fn draw_now(&mut self) -> Option<HistoryRecord> {
        let pool = self.start_draw()?;
        let number = self.pick_or_abort(&pool)?;
        self.complete_draw(number)
    }

    /// Abandon the in-progress draw of either mode
    pub fn abort_draw(&mut self) -> bool {
        self.mode = None;
        self.engine.abort()
    }

    pub fn clear_history(&mut self) {
        self.ledger.clear();
        if let Err(e) = save_history(&self.store, self.ledger.records()) {
            log::warn!("Failed to save history: {}", e);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // MULTI-AWARD
    // ═══════════════════════════════════════════════════════════════════════

    pub fn award_sequencer(&self) -> &AwardSequencer {
        &self.awards
    }

    pub fn award_progress(&self) -> Vec<AwardProgress> {
        self.awards.progress()
    }

    pub fn current_award(&self) -> Option<&Award> {
        self.awards.current_award()
    }

    pub fn all_awards_completed(&self) -> bool {
        self.awards.all_completed()
    }

    pub fn set_multi_award_enabled(&mut self, enabled: bool) {
        self.awards.set_enabled(enabled);
        self.persist_awards();
    }

    /// Replace the award list (validated, then persisted)
    pub fn set_awards(&mut self, awards: Vec<Award>) -> LdResult<()> {
        if self.is_running() {
            return Err(LdError::DrawInProgress);
        }
        self.awards.set_awards(awards)?;
        self.persist_awards();
        self.persist_award_cursor();
        Ok(())
    }

    /// Start a draw for the current award and return the eligible pool
    ///
    /// Fails when multi-award mode is off or the current award has no open
    /// slots. With repeats disallowed, winners of any award are left out.
    pub fn start_multi_award_draw(&mut self) -> Option<Vec<usize>> {
        if !self.awards.is_enabled() || !self.awards.can_draw() {
            return None;
        }
        let exclusion = if self.settings.allow_repeat {
            Exclusion::None
        } else {
            Exclusion::Ids(self.awards.excluded_ids())
        };
        self.start(DrawMode::MultiAward, &exclusion)
    }

    /// Complete a multi-award draw on `number` for the current award
    pub fn complete_multi_award_draw(&mut self, number: usize) -> Option<AwardWinner> {
        if !self.awards.can_draw() {
            return None;
        }
        let participant = self.finish(DrawMode::MultiAward, number)?;
        let winner = self.awards.record(&participant, self.clock.now())?;
        self.winner = Some(participant);
        self.persist_award_winners();
        self.persist_award_cursor();
        Some(winner)
    }

    /// Multi-award counterpart of [`draw_now`](Self::draw_now)
    pub fn draw_award_now(&mut self) -> Option<AwardWinner> {
        let pool = self.start_multi_award_draw()?;
        let number = self.pick_or_abort(&pool)?;
        self.complete_multi_award_draw(number)
    }

    /// Pointer moves are refused while a draw is running
    pub fn advance_award(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        let moved = self.awards.advance();
        if moved {
            self.persist_award_cursor();
        }
        moved
    }

    pub fn retreat_award(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        let moved = self.awards.retreat();
        if moved {
            self.persist_award_cursor();
        }
        moved
    }

    /// Back to the first award and drop every award winner
    ///
    /// Refused while a draw is running.
    pub fn reset_multi_award(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.awards.reset();
        log::info!("Multi-award draw reset");
        self.persist_award_winners();
        self.persist_award_cursor();
        true
    }

    pub fn export_award_results(&self) -> String {
        self.awards.export_csv()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // INTERNALS
    // ═══════════════════════════════════════════════════════════════════════

    fn start(&mut self, mode: DrawMode, exclusion: &Exclusion) -> Option<Vec<usize>> {
        let pool = self.engine.start_draw(self.roster.participants(), exclusion)?;
        self.mode = Some(mode);
        Some(pool)
    }

    fn finish(&mut self, mode: DrawMode, number: usize) -> Option<Participant> {
        if self.mode != Some(mode) || !self.engine.finish(number) {
            return None;
        }
        self.mode = None;
        resolve(self.roster.participants(), number).cloned()
    }

    fn pick_or_abort(&mut self, pool: &[usize]) -> Option<usize> {
        let number = self.engine.pick(pool);
        if number.is_none() {
            self.abort_draw();
        }
        number
    }

    fn persist_roster(&self) {
        if let Err(e) = save_participants(&self.store, self.roster.participants()) {
            log::warn!("Failed to save participants: {}", e);
        }
    }

    fn persist_awards(&self) {
        if let Err(e) = save_awards(&self.store, self.awards.settings()) {
            log::warn!("Failed to save awards: {}", e);
        }
    }

    fn persist_award_winners(&self) {
        if let Err(e) = save_award_winners(&self.store, self.awards.winners()) {
            log::warn!("Failed to save award winners: {}", e);
        }
    }

    fn persist_award_cursor(&self) {
        if let Err(e) = save_award_cursor(&self.store, self.awards.cursor()) {
            log::warn!("Failed to save award cursor: {}", e);
        }
    }
}

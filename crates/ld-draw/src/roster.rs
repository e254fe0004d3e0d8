//! Roster manager
//!
//! Ordered participant list. Insertion order is draw order and number order;
//! deletions renumber but never reorder. Every participant number always has
//! the width implied by the current roster size.

use std::collections::HashSet;

use ld_core::{IdGenerator, Participant, ParticipantId, format_number, number_width};

/// Ordered list of participants with derived numbering
pub struct Roster {
    participants: Vec<Participant>,
    ids: Box<dyn IdGenerator>,
}

impl Roster {
    /// Empty roster drawing ids from `ids`
    pub fn new(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            participants: Vec::new(),
            ids,
        }
    }

    /// Roster restored from storage
    ///
    /// The id generator is moved past every loaded id and all numbers are
    /// recomputed for the loaded size.
    pub fn with_participants(participants: Vec<Participant>, mut ids: Box<dyn IdGenerator>) -> Self {
        for p in &participants {
            ids.bump_past(p.id);
        }
        let mut roster = Self { participants, ids };
        roster.renumber();
        roster
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Current pad width
    pub fn width(&self) -> usize {
        number_width(self.participants.len())
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p.name == name)
    }

    /// Append a participant
    ///
    /// Returns false for a blank name or a name already on the roster.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains_name(name) {
            return false;
        }

        let old_width = self.width();
        let total = self.participants.len() + 1;
        if number_width(total) > old_width {
            self.renumber_for(total);
        }

        let id = self.ids.next_id();
        self.participants
            .push(Participant::new(id, name, format_number(total, total)));
        true
    }

    /// Remove a participant by id and renumber the rest
    ///
    /// Returns whether a participant was removed.
    pub fn delete(&mut self, id: ParticipantId) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.id != id);
        self.renumber();
        self.participants.len() != before
    }

    pub fn clear(&mut self) {
        self.participants.clear();
    }

    /// Import names from text, one per line
    ///
    /// Each line's first comma- or tab-separated field is the name; trailing
    /// fields are ignored. Blank lines and names already present (on the
    /// roster or earlier in the batch) are skipped. Returns the number of
    /// participants added.
    pub fn import(&mut self, text: &str) -> usize {
        let mut seen: HashSet<&str> = self.participants.iter().map(|p| p.name.as_str()).collect();
        let mut names: Vec<String> = Vec::new();

        for line in text.split(['\r', '\n']) {
            if line.trim().is_empty() {
                continue;
            }
            let name = line.split([',', '\t']).next().unwrap_or("").trim();
            if name.is_empty() || seen.contains(name) {
                continue;
            }
            seen.insert(name);
            names.push(name.to_string());
        }

        if names.is_empty() {
            return 0;
        }

        let start = self.participants.len();
        let total = start + names.len();
        if number_width(total) > number_width(start) {
            self.renumber_for(total);
        }

        let added = names.len();
        for (offset, name) in names.into_iter().enumerate() {
            let id = self.ids.next_id();
            self.participants
                .push(Participant::new(id, name, format_number(start + offset + 1, total)));
        }
        added
    }

    /// Render as `number,name` lines in roster order
    pub fn export(&self) -> String {
        self.participants
            .iter()
            .map(|p| format!("{},{}", p.number, p.name))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn renumber(&mut self) {
        let total = self.participants.len();
        self.renumber_for(total);
    }

    fn renumber_for(&mut self, total: usize) {
        for (index, p) in self.participants.iter_mut().enumerate() {
            p.number = format_number(index + 1, total);
        }
    }
}

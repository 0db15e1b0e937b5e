//! Job-scoped hiring state

use hirewire_types::{PriceComparison, SkillTag, SpecialistRecord};
use serde::{Deserialize, Serialize};

/// One failed dispatch tier for a hired specialist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchAttempt {
    pub specialist_id: String,
    pub tier: String,
    pub error: String,
}

/// Everything hired for a single job
///
/// Built fresh for every job and handed back to the caller with the job's
/// response, so concurrent jobs never share hiring state. Specialists are
/// keyed by id and kept in hire order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HiringResult {
    hired: Vec<SpecialistRecord>,
    comparisons: Vec<PriceComparison>,
    attempts: Vec<DispatchAttempt>,
}

impl HiringResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hire; hiring the same id again replaces the entry in place
    pub fn hire(&mut self, record: SpecialistRecord) {
        match self.hired.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record,
            None => self.hired.push(record),
        }
    }

    pub fn hired(&self) -> &[SpecialistRecord] {
        &self.hired
    }

    pub fn get(&self, id: &str) -> Option<&SpecialistRecord> {
        self.hired.iter().find(|r| r.id == id)
    }

    /// First hired specialist for a skill
    pub fn for_skill(&self, skill: &SkillTag) -> Option<&SpecialistRecord> {
        self.hired.iter().find(|r| &r.specialization == skill)
    }

    pub fn len(&self) -> usize {
        self.hired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hired.is_empty()
    }

    pub fn record_comparison(&mut self, comparison: PriceComparison) {
        self.comparisons.push(comparison);
    }

    pub fn comparisons(&self) -> &[PriceComparison] {
        &self.comparisons
    }

    /// The comparison worth surfacing: most competing options, first on ties.
    /// Comparisons with a single option are never surfaced.
    pub fn best_comparison(&self) -> Option<&PriceComparison> {
        self.comparisons
            .iter()
            .filter(|c| c.options.len() > 1)
            .fold(None, |best: Option<&PriceComparison>, c| match best {
                Some(b) if b.options.len() >= c.options.len() => Some(b),
                _ => Some(c),
            })
    }

    pub fn record_attempt(&mut self, attempt: DispatchAttempt) {
        self.attempts.push(attempt);
    }

    pub fn attempts(&self) -> &[DispatchAttempt] {
        &self.attempts
    }
}

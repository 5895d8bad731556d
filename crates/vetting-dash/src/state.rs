//! Selection state of the dashboard page.
//!
//! A ranking only makes sense for the JD it was computed against, so changing
//! the selected JD discards the ranking and the selected row with it.

use crate::api::{MatchRun, RankedCandidate};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StateError {
    #[error("row {index} is outside the current ranking of {len} candidates")]
    RowOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    selected_profile_id: Option<String>,
    selected_jd_id: Option<String>,
    latest_rank: Vec<RankedCandidate>,
    selected_row: Option<usize>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_profile(&self) -> Option<&str> {
        self.selected_profile_id.as_deref()
    }

    pub fn select_profile(&mut self, profile_id: impl Into<String>) {
        self.selected_profile_id = Some(profile_id.into());
    }

    pub fn clear_profile(&mut self) {
        self.selected_profile_id = None;
    }

    pub fn selected_jd(&self) -> Option<&str> {
        self.selected_jd_id.as_deref()
    }

    pub fn select_jd(&mut self, jd_id: impl Into<String>) {
        let jd_id = jd_id.into();
        if self.selected_jd_id.as_deref() == Some(jd_id.as_str()) {
            return;
        }
        self.selected_jd_id = Some(jd_id);
        self.latest_rank.clear();
        self.selected_row = None;
    }

    pub fn latest_rank(&self) -> &[RankedCandidate] {
        &self.latest_rank
    }

    /// Replaces the ranking and adopts the JD it was scored against.
    pub fn record_ranking(&mut self, run: MatchRun) {
        let MatchRun { jd, results } = run;
        if !jd.jd_id.is_empty() {
            self.selected_jd_id = Some(jd.jd_id);
        }
        self.latest_rank = results;
        self.selected_row = None;
    }

    pub fn select_row(&mut self, index: usize) -> Result<&RankedCandidate, StateError> {
        let len = self.latest_rank.len();
        let candidate = self
            .latest_rank
            .get(index)
            .ok_or(StateError::RowOutOfRange { index, len })?;
        self.selected_profile_id = Some(candidate.profile_id.clone());
        self.selected_row = Some(index);
        Ok(&self.latest_rank[index])
    }

    pub fn selected_row(&self) -> Option<&RankedCandidate> {
        self.selected_row.and_then(|index| self.latest_rank.get(index))
    }
}

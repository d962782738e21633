// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Step sequencing for multi-step wizards.
//!
//! The active step is a plain integer in `1..=len`. Its only link to the
//! outside world is the `activeTab` query parameter, which
//! [`StepSequencer::to_query`] and [`StepSequencer::restore`] translate in
//! both directions.

use crate::error::LifecycleError;
use cmp_forms_domain::{DomainError, FieldName, FormData, StepIssue, StepPlan};

/// Query parameter holding the active step.
pub const STEP_QUERY_KEY: &str = "activeTab";

/// Tracks the active step of a wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSequencer {
    len: usize,
    active: usize,
}

impl StepSequencer {
    /// Starts at step 1 of a wizard with `len` steps. A zero length is
    /// treated as a single step.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            active: 1,
        }
    }

    /// Restores the active step from a query string.
    ///
    /// Missing, non-numeric or out-of-range values start at step 1.
    #[must_use]
    pub fn restore(query: &str, len: usize) -> Self {
        let mut sequencer: Self = Self::new(len);
        let requested: Option<usize> =
            url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
                .find(|(key, _)| key == STEP_QUERY_KEY)
                .and_then(|(_, value)| value.trim().parse::<usize>().ok());
        if let Some(step) = requested.filter(|step| (1..=sequencer.len).contains(step)) {
            sequencer.active = step;
        }
        sequencer
    }

    /// The active step (1-based).
    #[must_use]
    pub const fn active(&self) -> usize {
        self.active
    }

    /// Number of steps.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.active == 1
    }

    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.active == self.len
    }

    /// Advances one step if the active step validates.
    ///
    /// On the last step this validates and stays put.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::Validation` with the active step's missing
    /// and invalid fields; the active step does not change.
    pub fn go_next<F: FieldName>(
        &mut self,
        plan: &StepPlan<F>,
        data: &FormData,
    ) -> Result<usize, LifecycleError> {
        let issue: StepIssue = plan.validate_step(self.active, data)?;
        if !issue.is_clean() {
            return Err(LifecycleError::Validation {
                missing: issue.missing,
                invalid: issue.invalid,
            });
        }
        self.active = (self.active + 1).min(self.len);
        Ok(self.active)
    }

    /// Goes back one step, stopping at step 1. Never validates.
    pub fn go_back(&mut self) -> usize {
        self.active = self.active.saturating_sub(1).max(1);
        self.active
    }

    /// Jumps straight to `step` without validating anything in between.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StepOutOfRange` if `step` is not in `1..=len`.
    pub fn go_to(&mut self, step: usize) -> Result<usize, LifecycleError> {
        if !(1..=self.len).contains(&step) {
            return Err(DomainError::StepOutOfRange { step, len: self.len }.into());
        }
        self.active = step;
        Ok(self.active)
    }

    /// Writes the active step into `existing`, keeping every other parameter.
    #[must_use]
    pub fn to_query(&self, existing: &str) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in url::form_urlencoded::parse(existing.trim_start_matches('?').as_bytes()) {
            if key != STEP_QUERY_KEY {
                serializer.append_pair(&key, &value);
            }
        }
        serializer.append_pair(STEP_QUERY_KEY, &self.active.to_string());
        serializer.finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_reads_active_tab() {
        assert_eq!(StepSequencer::restore("?activeTab=3", 4).active(), 3);
        assert_eq!(StepSequencer::restore("foo=bar&activeTab=2", 4).active(), 2);
    }

    #[test]
    fn test_restore_ignores_bad_values() {
        assert_eq!(StepSequencer::restore("", 4).active(), 1);
        assert_eq!(StepSequencer::restore("activeTab=0", 4).active(), 1);
        assert_eq!(StepSequencer::restore("activeTab=5", 4).active(), 1);
        assert_eq!(StepSequencer::restore("activeTab=two", 4).active(), 1);
    }

    #[test]
    fn test_to_query_replaces_only_active_tab() {
        let sequencer: StepSequencer = StepSequencer::restore("activeTab=2", 4);
        assert_eq!(
            sequencer.to_query("?activeTab=1&mode=edit"),
            "mode=edit&activeTab=2"
        );
        assert_eq!(sequencer.to_query(""), "activeTab=2");
    }

    #[test]
    fn test_go_to_out_of_range_is_rejected() {
        let mut sequencer: StepSequencer = StepSequencer::new(3);
        assert!(sequencer.go_to(0).is_err());
        assert!(sequencer.go_to(4).is_err());
        assert_eq!(sequencer.active(), 1);
        assert_eq!(sequencer.go_to(3).unwrap(), 3);
        assert!(sequencer.is_last());
    }
}

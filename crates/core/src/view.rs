// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cmp_forms_domain::{FieldIssue, RecordStatus};

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level: &str = match self.level {
            NoticeLevel::Success => "success",
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        write!(f, "[{level}] {}", self.message)
    }
}

/// What a wizard page should render.
///
/// Published by the form controller after every change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Active step (1-based).
    pub active_step: usize,
    pub step_count: usize,
    /// A save or publish is in flight; submit buttons are disabled.
    pub busy: bool,
    /// The form is usable. False until a load succeeds.
    pub loaded: bool,
    /// Identifier of the persisted record, once there is one.
    pub record_id: Option<String>,
    pub status: Option<RecordStatus>,
    /// Required fields to highlight.
    pub missing: Vec<String>,
    /// Fields failing a pattern rule.
    pub invalid: Vec<FieldIssue>,
    /// Steps that block publishing.
    pub incomplete_steps: Vec<usize>,
    pub notice: Option<Notice>,
}

impl ViewState {
    /// Clears field highlights.
    pub fn clear_issues(&mut self) {
        self.missing.clear();
        self.invalid.clear();
        self.incomplete_steps.clear();
    }
}

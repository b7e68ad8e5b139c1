// ABOUTME: Editing session owning the schedule and stale-response gating
// ABOUTME: Request-generation counters discard late results superseded by newer requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Plan Session
//!
//! One session owns one [`Schedule`] for its whole editing lifetime. All
//! mutations go through `&mut self`, so the borrow checker enforces the
//! single-writer model: one in-flight edit completes before the next begins.
//!
//! The two network-bound actions (generation, interpretation) run as
//! independent async tasks and may resolve out of order. Each action kind
//! carries a monotonic request-generation counter: starting a new request
//! issues a ticket and invalidates all earlier tickets of the same kind, and
//! completing with a stale ticket discards the result instead of overwriting
//! fresher state. No active cancellation — a superseded request just has its
//! result dropped on arrival.

use chrono::{Days, NaiveDate};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppResult;
use crate::models::{Day, GeneratedAnchorGrid, MealSlot, RawDirective};
use crate::schedule::{BatchOutcome, DetoxAssignments, Schedule, ScheduleStatus};

/// The action kinds gated by a request-generation counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Anchor-grid generation
    Generation,
    /// Command interpretation
    Interpretation,
}

/// Proof that a request was the newest of its kind when it started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    kind: ActionKind,
    seq: u64,
}

/// An interactive meal-plan editing session
#[derive(Debug)]
pub struct PlanSession {
    id: Uuid,
    schedule: Schedule,
    start_date: Option<NaiveDate>,
    generation_seq: u64,
    interpretation_seq: u64,
}

impl Default for PlanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanSession {
    /// Start a session with an empty schedule
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            schedule: Schedule::new(),
            start_date: None,
            generation_seq: 0,
            interpretation_seq: 0,
        }
    }

    /// Start a session anchored to a plan start date for display
    #[must_use]
    pub fn with_start_date(start_date: NaiveDate) -> Self {
        let mut session = Self::new();
        session.start_date = Some(start_date);
        session
    }

    /// Session identifier
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Read-only snapshot of the schedule, for export and persistence
    #[must_use]
    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Calendar date a plan day maps to, if a start date was provided
    ///
    /// Display-only: the engine itself never depends on calendar dates.
    #[must_use]
    pub fn date_for(&self, day: Day) -> Option<NaiveDate> {
        self.start_date
            .and_then(|start| start.checked_add_days(Days::new(u64::from(day.number()) - 1)))
    }

    /// Register a new generation request, superseding earlier ones
    pub fn begin_generation(&mut self) -> RequestTicket {
        self.generation_seq += 1;
        RequestTicket {
            kind: ActionKind::Generation,
            seq: self.generation_seq,
        }
    }

    /// Register a new interpretation request, superseding earlier ones
    pub fn begin_interpretation(&mut self) -> RequestTicket {
        self.interpretation_seq += 1;
        RequestTicket {
            kind: ActionKind::Interpretation,
            seq: self.interpretation_seq,
        }
    }

    /// Apply a completed generation, unless a newer request superseded it
    ///
    /// Returns `Ok(false)` when the ticket is stale; the grid is discarded
    /// and the schedule is untouched.
    ///
    /// # Errors
    ///
    /// Propagates `UnknownPlan` from the schedule load; nothing is written
    /// in that case.
    pub fn complete_generation(
        &mut self,
        ticket: RequestTicket,
        grid: &GeneratedAnchorGrid,
        assignments: &DetoxAssignments,
    ) -> AppResult<bool> {
        if ticket.kind != ActionKind::Generation || ticket.seq != self.generation_seq {
            debug!(seq = ticket.seq, "discarding stale generation result");
            return Ok(false);
        }
        self.schedule.load_generated_grid(grid, assignments)?;
        Ok(true)
    }

    /// Apply a completed interpretation, unless a newer request superseded it
    ///
    /// Returns `None` when the ticket is stale and nothing was applied.
    pub fn complete_interpretation(
        &mut self,
        ticket: RequestTicket,
        directives: &[RawDirective],
    ) -> Option<BatchOutcome> {
        if ticket.kind != ActionKind::Interpretation || ticket.seq != self.interpretation_seq {
            debug!(seq = ticket.seq, "discarding stale interpretation result");
            return None;
        }
        Some(self.schedule.apply_directives(directives))
    }

    /// Switch one day to a different detox plan
    ///
    /// # Errors
    ///
    /// Propagates `UnknownPlan`; the schedule is untouched in that case.
    pub fn reassign_detox(&mut self, day: Day, plan_id: &str) -> AppResult<()> {
        self.schedule.reassign_detox(day, plan_id)
    }

    /// Direct manual edit of one cell; local, never gated
    pub fn edit_cell(&mut self, day: Day, slot: MealSlot, value: impl Into<String>) {
        self.schedule.edit_cell(day, slot, value);
    }

    /// Freshly recomputed completion summary
    #[must_use]
    pub fn status(&self) -> ScheduleStatus {
        self.schedule.compute_status()
    }
}

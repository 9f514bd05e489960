//! Schedule conflict detection.
//!
//! Two screenings conflict when their time windows intersect on the same
//! calendar day (a *time* conflict), or when they do not intersect but the
//! gap between them is shorter than the walk between their venues (a
//! *travel* conflict). A pair never reports both: the travel check only
//! runs when there is no overlap.
//!
//! Conflicts are advisory. Nothing here prevents a caller from keeping a
//! conflicting selection.

use chrono::Datelike;
use serde::Serialize;

use crate::config::TravelModel;
use crate::model::Screening;

// ── Results ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictKind {
    /// The two time windows intersect.
    Time,
    /// The gap between the windows is shorter than the travel estimate.
    Travel,
}

/// One detected conflict between a pair of screenings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    pub kind: ConflictKind,
    /// The other screening of the pair.
    pub conflicting: Screening,
    /// User-facing description, rendered verbatim.
    pub message: String,
    /// Travel minutes required, for travel conflicts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_minutes: Option<u32>,
}

/// Outcome of validating a whole schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleReport {
    pub is_valid: bool,
    pub conflicts: Vec<Conflict>,
}

// ── Validator ───────────────────────────────────────────────────────────────

/// Stateless conflict checker parameterized by a [`TravelModel`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScheduleValidator {
    pub travel: TravelModel,
}

impl ScheduleValidator {
    pub fn new(travel: TravelModel) -> Self {
        Self { travel }
    }

    /// Travel conflict between two same-day, non-overlapping screenings.
    ///
    /// Returns `None` for different days, overlapping windows, or a gap at
    /// least as long as the travel estimate. On conflict, `b` is reported as
    /// the conflicting screening.
    pub fn travel_conflict(&self, a: &Screening, b: &Screening) -> Option<Conflict> {
        if !is_same_calendar_day(&a.date, &b.date) || has_time_overlap(a, b) {
            return None;
        }

        let (first, second) = if a.end_minutes() <= b.end_minutes() {
            (a, b)
        } else {
            (b, a)
        };

        let available = second.start_minutes().saturating_sub(first.end_minutes());
        let needed = self.travel.travel_minutes(&first.venue, &second.venue);

        if available >= needed {
            return None;
        }

        Some(Conflict {
            kind: ConflictKind::Travel,
            conflicting: b.clone(),
            message: format!(
                "Not enough travel time: {needed} min needed, only {available} min available between {} and {}",
                first.venue.name, second.venue.name
            ),
            travel_minutes: Some(needed),
        })
    }

    /// Check a candidate screening against an already accepted list.
    ///
    /// Returns one conflict per conflicting entry of `existing`, in the same
    /// order. A pair that overlaps in time is reported as a time conflict
    /// only.
    pub fn check_conflicts(&self, candidate: &Screening, existing: &[Screening]) -> Vec<Conflict> {
        let conflicts: Vec<Conflict> = existing
            .iter()
            .filter_map(|other| {
                if has_time_overlap(candidate, other) {
                    Some(Conflict {
                        kind: ConflictKind::Time,
                        conflicting: other.clone(),
                        message: format!(
                            "Time conflict with a screening from {} to {} at {}",
                            other.start_time, other.end_time, other.venue.name
                        ),
                        travel_minutes: None,
                    })
                } else {
                    self.travel_conflict(candidate, other)
                }
            })
            .collect();

        tracing::debug!(
            candidate = %candidate.id,
            existing = existing.len(),
            conflicts = conflicts.len(),
            "checked candidate screening"
        );

        conflicts
    }

    /// Validate every pair of a proposed schedule.
    ///
    /// Screenings are ordered by date then start time (stable for ties) and
    /// each unordered pair is examined exactly once. All conflicts are
    /// collected; there is no early exit.
    pub fn validate_full_schedule(&self, screenings: &[Screening]) -> ScheduleReport {
        let mut sorted: Vec<&Screening> = screenings.iter().collect();
        sorted.sort_by_key(|s| (s.date, s.start_minutes()));

        let mut conflicts = Vec::new();
        for (i, first) in sorted.iter().enumerate() {
            for second in &sorted[i + 1..] {
                if has_time_overlap(first, second) {
                    conflicts.push(Conflict {
                        kind: ConflictKind::Time,
                        conflicting: (*second).clone(),
                        message: format!(
                            "Time conflict between {} ({}-{}) and {} ({}-{}) on {}",
                            first.id,
                            first.start_time,
                            first.end_time,
                            second.id,
                            second.start_time,
                            second.end_time,
                            first.date
                        ),
                        travel_minutes: None,
                    });
                } else if let Some(conflict) = self.travel_conflict(first, second) {
                    conflicts.push(conflict);
                }
            }
        }

        tracing::debug!(
            screenings = screenings.len(),
            conflicts = conflicts.len(),
            "validated full schedule"
        );

        ScheduleReport {
            is_valid: conflicts.is_empty(),
            conflicts,
        }
    }
}

// ── Free functions (default travel model) ──────────────────────────────────

/// True when both dates fall on the same year, month and day.
///
/// Works for any [`Datelike`] value, so a time-of-day component (if present)
/// is ignored.
pub fn is_same_calendar_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Half-open interval intersection on the same calendar day.
///
/// Back-to-back screenings (one ends exactly when the other starts) do not
/// overlap.
pub fn has_time_overlap(a: &Screening, b: &Screening) -> bool {
    if !is_same_calendar_day(&a.date, &b.date) {
        return false;
    }
    a.start_minutes() < b.end_minutes() && b.start_minutes() < a.end_minutes()
}

/// [`ScheduleValidator::travel_conflict`] with the default travel model.
pub fn travel_conflict(a: &Screening, b: &Screening) -> Option<Conflict> {
    ScheduleValidator::default().travel_conflict(a, b)
}

/// [`ScheduleValidator::check_conflicts`] with the default travel model.
pub fn check_conflicts(candidate: &Screening, existing: &[Screening]) -> Vec<Conflict> {
    ScheduleValidator::default().check_conflicts(candidate, existing)
}

/// [`ScheduleValidator::validate_full_schedule`] with the default travel model.
pub fn validate_full_schedule(screenings: &[Screening]) -> ScheduleReport {
    ScheduleValidator::default().validate_full_schedule(screenings)
}

/// Other screenings of the same film, excluding `screening` itself and
/// `exclude_id` (usually the screening it clashed with).
///
/// This is a plain filter: the suggestions are not checked for conflicts.
pub fn suggested_alternatives<'a>(
    screening: &Screening,
    all: &'a [Screening],
    exclude_id: &str,
) -> Vec<&'a Screening> {
    all.iter()
        .filter(|s| s.film_id == screening.film_id && s.id != screening.id && s.id != exclude_id)
        .collect()
}

// ── Tests ───────────────────────────────────────────────────────────────────

//! Pure per-field transitions for trip segments.
//!
//! Each edit produces a fully derived next value: date edits recompute the
//! day count, destination picks carry the city's hardship designation, and
//! a specific hardship area forces the hardship flag. Nothing here touches
//! the rest of the form state.

use chrono::NaiveDate;

use crate::models::Trip;

/// An edit to a single field of one trip segment.
#[derive(Debug, Clone, PartialEq)]
pub enum TripEdit {
    From(String),
    /// Destination selection. The city picker reports whether the chosen
    /// city is a designated hardship location; free-text input reports
    /// `None` and leaves the flag alone.
    Destination {
        city: String,
        hardship: Option<bool>,
    },
    StartDate(String),
    StartTime(String),
    EndDate(String),
    EndTime(String),
    /// Manual day-count override
    Days(u32),
    Hardship(bool),
    /// Setting a non-empty area forces `is_hardship`; clearing it does not
    /// clear the flag.
    SpecificHardshipArea(String),
    MainTraveler(String),
    FellowTravelers(Vec<String>),
}

/// Apply one edit to a trip, returning the updated segment with dependent
/// fields recomputed. The original is never mutated.
pub fn apply_trip_edit(trip: &Trip, edit: TripEdit) -> Trip {
    let mut next = trip.clone();
    match edit {
        TripEdit::From(city) => next.from = city,
        TripEdit::Destination { city, hardship } => {
            next.to = city;
            if let Some(hardship) = hardship {
                next.is_hardship = hardship;
            }
        }
        TripEdit::StartDate(date) => {
            next.start_date = date;
            recompute_days(&mut next);
        }
        TripEdit::EndDate(date) => {
            next.end_date = date;
            recompute_days(&mut next);
        }
        TripEdit::StartTime(time) => next.start_time = time,
        TripEdit::EndTime(time) => next.end_time = time,
        TripEdit::Days(days) => next.days = days,
        TripEdit::Hardship(flag) => next.is_hardship = flag,
        TripEdit::SpecificHardshipArea(area) => {
            if !area.is_empty() {
                next.is_hardship = true;
            }
            next.specific_hardship_area = area;
        }
        TripEdit::MainTraveler(id) => next.main_traveler_id = id,
        TripEdit::FellowTravelers(ids) => next.fellow_traveler_ids = ids,
    }
    next
}

/// Recompute `days` from the date parts, ignoring time of day.
///
/// Policy: the span in whole days, with a zero span counting as one day
/// and a negative span as zero. Unparseable dates leave `days` unchanged.
fn recompute_days(trip: &mut Trip) {
    let (Some(start), Some(end)) = (parse_date(&trip.start_date), parse_date(&trip.end_date))
    else {
        return;
    };
    let span = (end - start).num_days();
    trip.days = if span > 0 {
        span as u32
    } else if span == 0 {
        1
    } else {
        0
    };
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

//! Domain core for the domestic travel expense reimbursement form.
//!
//! Everything here is pure and host-testable: the form entities, the
//! read-only reference catalogs, the per-field edit transitions for trips
//! and expenses, the totals derivation pipeline, and the reducer that owns
//! the whole form state. The frontend crate renders from these types and
//! dispatches events back into the reducer; it adds no business logic of
//! its own.

pub mod catalog;
pub mod expense;
pub mod form;
pub mod models;
pub mod totals;
pub mod trip;

pub use expense::{apply_expense_edit, extract_tax, ExpenseEdit};
pub use form::{BasicInfoEdit, FormEvent, FormState, LookupStatus};
pub use models::{
    round_currency, Application, BasicInfo, City, Expense, ExpenseSource, Loan, PolicyStatus,
    Project, Traveler, Trip, HARDSHIP_DAILY_RATE, MEAL_CAP_MESSAGE, MEAL_CATEGORY,
    MEAL_REIMBURSEMENT_CEILING, TAX_RATES,
};
pub use totals::Totals;
pub use trip::{apply_trip_edit, TripEdit};

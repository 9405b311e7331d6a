use serde::{Deserialize, Serialize};

/// Expense category that is subject to the per-invoice meal ceiling.
pub const MEAL_CATEGORY: &str = "餐饮";

/// Policy ceiling for a single personal meal expense, in currency units.
pub const MEAL_REIMBURSEMENT_CEILING: f64 = 100.0;

/// Message attached to an expense that was auto-reduced to the ceiling.
pub const MEAL_CAP_MESSAGE: &str = "超标自动核减";

/// Daily hardship-area stipend per traveler.
pub const HARDSHIP_DAILY_RATE: f64 = 200.0;

/// VAT rates selectable on an expense row, in percent.
pub const TAX_RATES: [u8; 4] = [0, 6, 9, 13];

/// Default working hours for a newly added trip segment.
pub const DEFAULT_TRIP_START_TIME: &str = "09:00";
pub const DEFAULT_TRIP_END_TIME: &str = "18:00";

/// Round a currency amount to 2 decimal places.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Document-level metadata for the reimbursement form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    /// Document number, assigned at creation and never edited
    pub doc_no: String,
    /// Document date (YYYY-MM-DD)
    pub doc_date: String,
    pub creator: String,
    /// Person being reimbursed; loan clearing nets against their settlement
    pub reimburser: String,
    pub cost_org: String,
    pub cost_dept: String,
    /// Free-text reimbursement description
    pub description: String,
    /// Id of the linked pre-approved travel application, empty until selected
    pub request_id: String,
    pub is_project: bool,
    pub project_type: String,
    pub project_code: String,
    pub fund_source: String,
    pub currency: String,
}

/// A traveler on the reimbursement roster.
///
/// Exactly one traveler is main by construction; removing the main
/// traveler is blocked by the reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traveler {
    pub id: String,
    pub name: String,
    /// Employee code
    pub code: String,
    /// Job level/grade, used to match travel standards
    pub level: String,
    pub is_main: bool,
    pub bank_account: String,
    pub bank_name: String,
}

impl Traveler {
    /// Build a non-main fellow traveler with placeholder payroll fields.
    pub fn fellow(id: String, name: String) -> Self {
        Self {
            id,
            name,
            code: "NEW".to_string(),
            level: "P5".to_string(),
            is_main: false,
            bank_account: "待录入".to_string(),
            bank_name: "待录入".to_string(),
        }
    }
}

/// One segment of the trip itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub from: String,
    pub to: String,
    /// YYYY-MM-DD; empty until filled in
    pub start_date: String,
    /// HH:MM, display only — day derivation ignores time of day
    pub start_time: String,
    pub end_date: String,
    pub end_time: String,
    /// Derived from the date span on date edits, but also directly editable
    pub days: u32,
    pub is_hardship: bool,
    /// Traveler credited with this segment's hardship allowance
    pub main_traveler_id: String,
    /// Co-travelers on this segment, excluding the main traveler
    pub fellow_traveler_ids: Vec<String>,
    /// Finer-grained hardship location; non-empty implies `is_hardship`
    pub specific_hardship_area: String,
}

impl Trip {
    /// A blank segment with default working hours and a one-day span.
    pub fn blank(id: String, main_traveler_id: String, fellow_traveler_ids: Vec<String>) -> Self {
        Self {
            id,
            from: String::new(),
            to: String::new(),
            start_date: String::new(),
            start_time: DEFAULT_TRIP_START_TIME.to_string(),
            end_date: String::new(),
            end_time: DEFAULT_TRIP_END_TIME.to_string(),
            days: 1,
            is_hardship: false,
            main_traveler_id,
            fellow_traveler_ids,
            specific_hardship_area: String::new(),
        }
    }

    /// Headcount covered by this segment's allowance (main + fellows).
    pub fn party_size(&self) -> u32 {
        1 + self.fellow_traveler_ids.len() as u32
    }
}

/// Who settles an expense with the vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseSource {
    /// Paid by the traveler, enters personal settlement
    Personal,
    /// Paid directly by the organization, never enters personal settlement
    Corp,
}

/// Whether an expense passed spending policy or was auto-reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Ok,
    Warn,
}

/// A single expense line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub source: ExpenseSource,
    pub category: String,
    /// Finer expense kind within the category, e.g. 酒店 / 机票
    pub kind: String,
    pub date: String,
    /// Gross invoice amount, tax inclusive
    pub invoice_amount: f64,
    /// Amount actually reimbursed; may be clamped below the invoice amount
    pub reimbursable_amount: f64,
    /// VAT rate in percent (one of `TAX_RATES`)
    pub tax_rate: u8,
    /// Derived deductible tax portion, never entered directly
    pub tax_amount: f64,
    /// Traveler who receives the reimbursement
    pub payee_id: String,
    pub description: String,
    pub policy_status: PolicyStatus,
    /// Explanation shown alongside a `Warn` status
    pub policy_message: Option<String>,
    /// Whether a supporting document is attached
    pub receipt: bool,
}

/// An outstanding cash advance to be netted against this reimbursement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: String,
    pub order_no: String,
    pub total_amount: f64,
    pub remaining_amount: f64,
    /// Portion cleared by this document; clamped to `0..=remaining_amount`
    pub clearing_amount: f64,
}

/// A pre-approved travel application from the external catalog.
///
/// Read-only reference data: selecting one replaces the current trip list
/// and the corp expense list wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub title: String,
    pub date: String,
    pub trips: Vec<Trip>,
    pub corp_expenses: Vec<Expense>,
}

/// Project catalog record for the free-text-assisted project lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub code: String,
    pub name: String,
}

/// City catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    /// Phonetic key matched against lowercase free-text input
    pub pinyin: String,
    /// Designated hardship location
    pub hardship: bool,
    /// Display tier label, e.g. 一线 / 省会 / 艰苦
    pub tier: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(50.943396), 50.94);
        assert_eq!(round_currency(206.422018), 206.42);
        assert_eq!(round_currency(0.005), 0.01);
        assert_eq!(round_currency(100.0), 100.0);
    }

    #[test]
    fn test_blank_trip_defaults() {
        let trip = Trip::blank("trip::1".to_string(), "U1".to_string(), vec!["U2".to_string()]);
        assert_eq!(trip.start_time, "09:00");
        assert_eq!(trip.end_time, "18:00");
        assert_eq!(trip.days, 1);
        assert!(!trip.is_hardship);
        assert_eq!(trip.party_size(), 2);
    }

    #[test]
    fn test_fellow_traveler_is_never_main() {
        let traveler = Traveler::fellow("traveler::1".to_string(), "王五".to_string());
        assert!(!traveler.is_main);
        assert_eq!(traveler.level, "P5");
    }
}

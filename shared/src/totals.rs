//! The totals derivation pipeline.
//!
//! Recomputed from scratch on every state change — no incremental caching.
//! Order matters: hardship allowance first, then personal reimbursement
//! aggregation, then loan netting against the reimburser's entry, then the
//! document-level sums. All figures are advisory display values; rounding
//! to 2 decimals happens at the presentation edge.

use std::collections::BTreeMap;

use crate::form::FormState;
use crate::models::{ExpenseSource, PolicyStatus, HARDSHIP_DAILY_RATE};

/// Summary figures derived from the full form state.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    /// Hardship trip days summed across flagged segments
    pub hardship_days: u32,
    /// Grand hardship allowance across all segments and parties
    pub allowance_total: f64,
    /// Per-traveler net amount owed by the organization
    pub settlement: BTreeMap<String, f64>,
    /// Σ invoice over corp expenses, settled directly with vendors
    pub corp_total: f64,
    pub personal_invoice_total: f64,
    pub personal_reimbursable_total: f64,
    /// Loan clearing actually netted out of the settlement
    pub cleared_loan_total: f64,
    /// corp + personal invoice + allowance
    pub grand_total: f64,
    /// Σ of the settlement map
    pub total_payable: f64,
    pub total_tax: f64,
    pub warning_count: usize,
    pub missing_receipt_count: usize,
    pub travelers_count: usize,
}

impl Totals {
    /// Derive every summary figure from the current state snapshot.
    pub fn derive(state: &FormState) -> Totals {
        let mut settlement: BTreeMap<String, f64> = state
            .travelers
            .iter()
            .map(|t| (t.id.clone(), 0.0))
            .collect();

        // 1. Hardship allowance, per segment and party, credited to the
        //    segment's own main traveler.
        let fallback_main = state.main_traveler_id();
        let mut hardship_days = 0u32;
        let mut allowance_total = 0.0;
        for trip in state.trips.iter().filter(|t| t.is_hardship) {
            hardship_days += trip.days;
            let amount = f64::from(trip.days) * HARDSHIP_DAILY_RATE * f64::from(trip.party_size());
            allowance_total += amount;
            let payee = if trip.main_traveler_id.is_empty() {
                fallback_main.clone()
            } else {
                trip.main_traveler_id.clone()
            };
            *settlement.entry(payee).or_insert(0.0) += amount;
        }

        // 2. Personal reimbursements, keyed by payee.
        for expense in &state.expenses {
            if expense.source == ExpenseSource::Personal {
                *settlement.entry(expense.payee_id.clone()).or_insert(0.0) +=
                    expense.reimbursable_amount;
            }
        }

        // 3. Loan netting against the reimburser, floored at zero.
        let clearing_total: f64 = state.loans.iter().map(|l| l.clearing_amount).sum();
        let mut cleared_loan_total = 0.0;
        if clearing_total > 0.0 {
            let entry = settlement.entry(state.reimburser_id()).or_insert(0.0);
            cleared_loan_total = clearing_total.min(*entry);
            *entry = (*entry - clearing_total).max(0.0);
        }

        // 4-7. Document-level sums.
        let corp_total: f64 = state
            .expenses
            .iter()
            .filter(|e| e.source == ExpenseSource::Corp)
            .map(|e| e.invoice_amount)
            .sum();
        let personal_invoice_total: f64 = state
            .expenses
            .iter()
            .filter(|e| e.source == ExpenseSource::Personal)
            .map(|e| e.invoice_amount)
            .sum();
        let personal_reimbursable_total: f64 = state
            .expenses
            .iter()
            .filter(|e| e.source == ExpenseSource::Personal)
            .map(|e| e.reimbursable_amount)
            .sum();
        let total_tax: f64 = state.expenses.iter().map(|e| e.tax_amount).sum();
        let warning_count = state
            .expenses
            .iter()
            .filter(|e| e.policy_status == PolicyStatus::Warn)
            .count();
        let missing_receipt_count = state
            .expenses
            .iter()
            .filter(|e| e.source == ExpenseSource::Personal && !e.receipt)
            .count();

        let grand_total = corp_total + personal_invoice_total + allowance_total;
        let total_payable: f64 = settlement.values().sum();

        // The settlement sum and the component formula must agree.
        debug_assert!(
            (total_payable - (personal_reimbursable_total + allowance_total - cleared_loan_total))
                .abs()
                < 1e-6,
            "settlement map does not reconcile with component totals"
        );

        Totals {
            hardship_days,
            allowance_total,
            settlement,
            corp_total,
            personal_invoice_total,
            personal_reimbursable_total,
            cleared_loan_total,
            grand_total,
            total_payable,
            total_tax,
            warning_count,
            missing_receipt_count,
            travelers_count: state.travelers.len(),
        }
    }

    /// Settlement amount for one traveler, zero if absent.
    pub fn settlement_for(&self, traveler_id: &str) -> f64 {
        self.settlement.get(traveler_id).copied().unwrap_or(0.0)
    }

    /// Number of travelers actually receiving money.
    pub fn settlement_entry_count(&self) -> usize {
        self.settlement.values().filter(|v| **v > 0.0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::ExpenseEdit;
    use crate::form::{BasicInfoEdit, FormEvent, FormState};
    use crate::trip::TripEdit;

    fn state_with_application(id: &str) -> FormState {
        FormState::seed()
            .apply(FormEvent::LookupStarted { token: 1 })
            .apply(FormEvent::LookupResolved {
                token: 1,
                application_id: id.to_string(),
            })
    }

    #[test]
    fn test_seed_totals() {
        let state = FormState::seed();
        let totals = Totals::derive(&state);
        assert_eq!(totals.hardship_days, 0);
        assert_eq!(totals.allowance_total, 0.0);
        assert_eq!(totals.corp_total, 0.0);
        assert_eq!(totals.personal_invoice_total, 1350.0);
        assert_eq!(totals.personal_reimbursable_total, 1250.0);
        assert_eq!(totals.total_payable, 1250.0);
        assert_eq!(totals.grand_total, 1350.0);
        assert_eq!(totals.settlement_for("U1"), 450.0);
        assert_eq!(totals.settlement_for("U2"), 800.0);
        assert_eq!(totals.settlement_entry_count(), 2);
        assert_eq!(totals.missing_receipt_count, 1);
        assert_eq!(totals.warning_count, 0);
    }

    #[test]
    fn test_allowance_per_segment_and_party() {
        let state = state_with_application("TRIP-2024-BJ001");
        let totals = Totals::derive(&state);
        // One hardship segment: 3 days x 200 x party of 2.
        assert_eq!(totals.hardship_days, 3);
        assert_eq!(totals.allowance_total, 1200.0);
        // Credited to the segment's main traveler.
        assert_eq!(totals.settlement_for("U1"), 450.0 + 1200.0);
    }

    #[test]
    fn test_allowance_follows_segment_owner() {
        let state = state_with_application("TRIP-2024-BJ001");
        let hardship_trip_id = state
            .trips
            .iter()
            .find(|t| t.is_hardship)
            .unwrap()
            .id
            .clone();
        let state = state
            .apply(FormEvent::EditTrip {
                id: hardship_trip_id.clone(),
                edit: TripEdit::MainTraveler("U2".to_string()),
            })
            .apply(FormEvent::EditTrip {
                id: hardship_trip_id,
                edit: TripEdit::FellowTravelers(vec![]),
            });
        let totals = Totals::derive(&state);
        // 3 days x 200 x party of 1, now credited to U2.
        assert_eq!(totals.allowance_total, 600.0);
        assert_eq!(totals.settlement_for("U2"), 800.0 + 600.0);
        assert_eq!(totals.settlement_for("U1"), 450.0);
    }

    #[test]
    fn test_grand_total_identity() {
        for id in ["TRIP-2024-BJ001", "TRIP-2024-SZ002", "TRIP-2024-XJ003"] {
            let state = state_with_application(id);
            let totals = Totals::derive(&state);
            assert_eq!(
                totals.grand_total,
                totals.corp_total + totals.personal_invoice_total + totals.allowance_total,
            );
        }
    }

    #[test]
    fn test_corp_expenses_never_enter_settlement() {
        let state = state_with_application("TRIP-2024-XJ003");
        let totals = Totals::derive(&state);
        assert_eq!(totals.corp_total, 6150.0);
        // Settlement carries only personal reimbursements + allowance.
        assert_eq!(
            totals.total_payable,
            totals.personal_reimbursable_total + totals.allowance_total,
        );
    }

    #[test]
    fn test_loan_netting_scenario() {
        // Reimburser settlement of 1200, clearing 1000 -> nets to 200.
        let mut state = FormState::seed();
        state = state.apply(FormEvent::EditExpense {
            id: "expense::3".to_string(),
            edit: ExpenseEdit::Payee("U1".to_string()),
        });
        state = state.apply(FormEvent::EditExpense {
            id: "expense::3".to_string(),
            edit: ExpenseEdit::ReimbursableAmount(750.0),
        });
        // U1 now holds 750 + 450 = 1200.
        state = state.apply(FormEvent::SetLoanClearing {
            id: "loan::1".to_string(),
            amount: 1000.0,
        });
        let totals = Totals::derive(&state);
        assert_eq!(totals.settlement_for("U1"), 200.0);
        assert_eq!(totals.cleared_loan_total, 1000.0);
        assert_eq!(totals.total_payable, 200.0);
    }

    #[test]
    fn test_loan_netting_floors_at_zero() {
        let mut state = FormState::seed();
        // Reimburser 张三 (U1) holds 450; clear more than that.
        state = state.apply(FormEvent::SetLoanClearing {
            id: "loan::1".to_string(),
            amount: 2000.0,
        });
        let totals = Totals::derive(&state);
        assert_eq!(totals.settlement_for("U1"), 0.0);
        assert!(totals.settlement.values().all(|v| *v >= 0.0));
        // Only the covered portion counts as cleared, and the zeroed
        // traveler no longer counts as receiving money.
        assert_eq!(totals.cleared_loan_total, 450.0);
        assert_eq!(totals.settlement_entry_count(), 1);
    }

    #[test]
    fn test_netting_targets_the_reimburser_entry() {
        let state = FormState::seed()
            .apply(FormEvent::EditBasicInfo(BasicInfoEdit::Reimburser(
                "李四".to_string(),
            )))
            .apply(FormEvent::SetLoanClearing {
                id: "loan::1".to_string(),
                amount: 300.0,
            });
        let totals = Totals::derive(&state);
        assert_eq!(totals.settlement_for("U2"), 500.0);
        assert_eq!(totals.settlement_for("U1"), 450.0);
    }

    #[test]
    fn test_warning_and_receipt_counters() {
        let state = FormState::seed().apply(FormEvent::EditExpense {
            id: "expense::4".to_string(),
            edit: ExpenseEdit::InvoiceAmount(450.0),
        });
        let totals = Totals::derive(&state);
        assert_eq!(totals.warning_count, 1);
        assert_eq!(totals.missing_receipt_count, 1);
        // The capped meal shrinks the payable total.
        assert_eq!(totals.settlement_for("U1"), 100.0);
    }

    #[test]
    fn test_total_tax_spans_both_sources() {
        let state = state_with_application("TRIP-2024-SZ002");
        let totals = Totals::derive(&state);
        // Personal hotel 50.94 + corp hotel 67.92.
        assert!((totals.total_tax - 118.86).abs() < 1e-9);
    }
}

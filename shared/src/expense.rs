//! Pure per-field transitions for expense lines.
//!
//! The invoice amount drives two derivations: the meal-ceiling policy
//! check and the VAT back-calculation out of the tax-inclusive gross
//! amount. The reimbursable amount and tax rate stay directly editable as
//! manual overrides.

use crate::models::{
    round_currency, Expense, PolicyStatus, MEAL_CAP_MESSAGE, MEAL_CATEGORY,
    MEAL_REIMBURSEMENT_CEILING,
};

/// An edit to a single field of one expense line.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpenseEdit {
    InvoiceAmount(f64),
    /// Manual override; no re-validation against the invoice amount
    ReimbursableAmount(f64),
    TaxRate(u8),
    /// Moves the settlement attribution without altering amounts
    Payee(String),
    Description(String),
}

/// Back-calculate the deductible tax portion from a tax-inclusive gross
/// amount: `gross / (1 + r) * r`, rounded to 2 decimals.
pub fn extract_tax(gross: f64, rate: u8) -> f64 {
    let r = f64::from(rate) / 100.0;
    round_currency(gross / (1.0 + r) * r)
}

/// Apply one edit to an expense, returning the updated line with derived
/// monetary fields recomputed. The original is never mutated.
pub fn apply_expense_edit(expense: &Expense, edit: ExpenseEdit) -> Expense {
    let mut next = expense.clone();
    match edit {
        ExpenseEdit::InvoiceAmount(amount) => {
            next.invoice_amount = amount;
            if next.category == MEAL_CATEGORY && amount > MEAL_REIMBURSEMENT_CEILING {
                next.reimbursable_amount = MEAL_REIMBURSEMENT_CEILING;
                next.policy_status = PolicyStatus::Warn;
                next.policy_message = Some(MEAL_CAP_MESSAGE.to_string());
            } else {
                next.reimbursable_amount = amount;
                next.policy_status = PolicyStatus::Ok;
                next.policy_message = None;
            }
            if next.tax_rate > 0 {
                next.tax_amount = extract_tax(next.invoice_amount, next.tax_rate);
            }
        }
        ExpenseEdit::TaxRate(rate) => {
            next.tax_rate = rate;
            next.tax_amount = extract_tax(next.invoice_amount, rate);
        }
        ExpenseEdit::ReimbursableAmount(amount) => next.reimbursable_amount = amount,
        ExpenseEdit::Payee(payee_id) => next.payee_id = payee_id,
        ExpenseEdit::Description(description) => next.description = description,
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseSource;

    fn personal_expense(category: &str, invoice: f64, tax_rate: u8) -> Expense {
        Expense {
            id: "expense::1".to_string(),
            source: ExpenseSource::Personal,
            category: category.to_string(),
            kind: "工作餐".to_string(),
            date: "2024-01-07".to_string(),
            invoice_amount: invoice,
            reimbursable_amount: invoice,
            tax_rate,
            tax_amount: 0.0,
            payee_id: "U1".to_string(),
            description: String::new(),
            policy_status: PolicyStatus::Ok,
            policy_message: None,
            receipt: true,
        }
    }

    #[test]
    fn test_meal_over_ceiling_is_auto_reduced() {
        let expense = personal_expense("餐饮", 0.0, 0);
        let edited = apply_expense_edit(&expense, ExpenseEdit::InvoiceAmount(450.0));
        assert_eq!(edited.invoice_amount, 450.0);
        assert_eq!(edited.reimbursable_amount, 100.0);
        assert_eq!(edited.policy_status, PolicyStatus::Warn);
        assert_eq!(edited.policy_message.as_deref(), Some("超标自动核减"));
    }

    #[test]
    fn test_meal_at_ceiling_passes() {
        let expense = personal_expense("餐饮", 0.0, 0);
        let edited = apply_expense_edit(&expense, ExpenseEdit::InvoiceAmount(100.0));
        assert_eq!(edited.reimbursable_amount, 100.0);
        assert_eq!(edited.policy_status, PolicyStatus::Ok);
        assert!(edited.policy_message.is_none());
    }

    #[test]
    fn test_reducing_invoice_clears_warning() {
        let expense = personal_expense("餐饮", 0.0, 0);
        let warned = apply_expense_edit(&expense, ExpenseEdit::InvoiceAmount(450.0));
        let cleared = apply_expense_edit(&warned, ExpenseEdit::InvoiceAmount(80.0));
        assert_eq!(cleared.reimbursable_amount, 80.0);
        assert_eq!(cleared.policy_status, PolicyStatus::Ok);
        assert!(cleared.policy_message.is_none());
    }

    #[test]
    fn test_non_meal_category_is_never_capped() {
        let expense = personal_expense("住宿", 0.0, 0);
        let edited = apply_expense_edit(&expense, ExpenseEdit::InvoiceAmount(900.0));
        assert_eq!(edited.reimbursable_amount, 900.0);
        assert_eq!(edited.policy_status, PolicyStatus::Ok);
    }

    #[test]
    fn test_vat_extraction_on_invoice_edit() {
        let expense = personal_expense("住宿", 0.0, 6);
        let edited = apply_expense_edit(&expense, ExpenseEdit::InvoiceAmount(900.0));
        // 900 / 1.06 * 0.06
        assert_eq!(edited.tax_amount, 50.94);
    }

    #[test]
    fn test_vat_extraction_on_rate_edit_alone() {
        let expense = personal_expense("交通", 2500.0, 0);
        let edited = apply_expense_edit(&expense, ExpenseEdit::TaxRate(9));
        assert_eq!(edited.tax_amount, 206.42);

        // Dropping the rate back to zero zeroes the tax.
        let zeroed = apply_expense_edit(&edited, ExpenseEdit::TaxRate(0));
        assert_eq!(zeroed.tax_amount, 0.0);
    }

    #[test]
    fn test_zero_rate_invoice_edit_keeps_tax_untouched() {
        let mut expense = personal_expense("交通", 0.0, 0);
        expense.tax_amount = 12.34;
        let edited = apply_expense_edit(&expense, ExpenseEdit::InvoiceAmount(500.0));
        assert_eq!(edited.tax_amount, 12.34);
    }

    #[test]
    fn test_manual_reimbursable_override_sticks() {
        let expense = personal_expense("住宿", 900.0, 6);
        let edited = apply_expense_edit(&expense, ExpenseEdit::ReimbursableAmount(800.0));
        assert_eq!(edited.reimbursable_amount, 800.0);
        assert_eq!(edited.invoice_amount, 900.0);
        assert_eq!(edited.policy_status, PolicyStatus::Ok);
    }

    #[test]
    fn test_payee_reassignment_keeps_amounts() {
        let expense = personal_expense("住宿", 900.0, 6);
        let edited = apply_expense_edit(&expense, ExpenseEdit::Payee("U2".to_string()));
        assert_eq!(edited.payee_id, "U2");
        assert_eq!(edited.invoice_amount, 900.0);
        assert_eq!(edited.reimbursable_amount, 900.0);
    }
}

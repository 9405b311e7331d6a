//! The form state and its reducer.
//!
//! One `FormState` holds the whole document; every user interaction is a
//! `FormEvent` and `FormState::apply` is the only way state moves forward.
//! The reducer is pure, so every cascading rule (project toggle resets,
//! day recomputation, application merge, stale lookup drops) is testable
//! without a rendering surface or a timer.

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::expense::{apply_expense_edit, ExpenseEdit};
use crate::models::{BasicInfo, Expense, ExpenseSource, Loan, PolicyStatus, Traveler, Trip};
use crate::trip::{apply_trip_edit, TripEdit};

/// State of the simulated application lookup.
///
/// Each selection takes a fresh token; a resolution is applied only while
/// its token is still the current one, so a second selection made
/// mid-delay supersedes the first and the stale resolution is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupStatus {
    Idle,
    Pending { token: u64 },
}

/// An edit to one field of the document header.
#[derive(Debug, Clone, PartialEq)]
pub enum BasicInfoEdit {
    DocDate(String),
    Creator(String),
    Reimburser(String),
    CostOrg(String),
    CostDept(String),
    Description(String),
    /// Toggling the project link off resets the dependent project fields.
    IsProject(bool),
    ProjectType(String),
    ProjectCode(String),
    FundSource(String),
}

/// Every user interaction the form supports.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    EditBasicInfo(BasicInfoEdit),
    /// A lookup was issued; the token supersedes any in-flight lookup.
    LookupStarted { token: u64 },
    /// A lookup delay elapsed. Applied only if the token is still current.
    LookupResolved { token: u64, application_id: String },
    AddTraveler { name: String },
    RemoveTraveler { id: String },
    AddTrip,
    RemoveTrip { id: String },
    EditTrip { id: String, edit: TripEdit },
    RemoveExpense { id: String },
    EditExpense { id: String, edit: ExpenseEdit },
    /// `None` shows every category.
    SetCategoryFilter(Option<String>),
    SetLoanClearing { id: String, amount: f64 },
}

/// The complete in-memory document. Discarded on reload; nothing is
/// persisted anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub basic_info: BasicInfo,
    pub travelers: Vec<Traveler>,
    pub trips: Vec<Trip>,
    pub expenses: Vec<Expense>,
    pub loans: Vec<Loan>,
    /// Display-side category filter shared by both expense tables
    pub category_filter: Option<String>,
    pub lookup: LookupStatus,
    next_id: u64,
}

impl FormState {
    /// The seeded document the form opens with.
    pub fn seed() -> Self {
        Self {
            basic_info: BasicInfo {
                doc_no: "BX202401058892".to_string(),
                doc_date: "2024-01-05".to_string(),
                creator: "张三".to_string(),
                reimburser: "张三".to_string(),
                cost_org: "用友网络科技股份有限公司".to_string(),
                cost_dept: "技术研发中心 / AI项目组".to_string(),
                description: String::new(),
                request_id: String::new(),
                is_project: true,
                project_type: "科研项目".to_string(),
                project_code: String::new(),
                fund_source: "专项资金".to_string(),
                currency: "CNY - 人民币".to_string(),
            },
            travelers: vec![
                Traveler {
                    id: "U1".to_string(),
                    name: "张三".to_string(),
                    code: "001245".to_string(),
                    level: "M2".to_string(),
                    is_main: true,
                    bank_account: "6222 0210 **** 8888".to_string(),
                    bank_name: "招商银行北京分行".to_string(),
                },
                Traveler {
                    id: "U2".to_string(),
                    name: "李四".to_string(),
                    code: "001246".to_string(),
                    level: "P5".to_string(),
                    is_main: false,
                    bank_account: "6217 0001 **** 1234".to_string(),
                    bank_name: "建设银行上海分行".to_string(),
                },
            ],
            trips: Vec::new(),
            expenses: vec![
                Expense {
                    id: "expense::3".to_string(),
                    source: ExpenseSource::Personal,
                    category: "住宿".to_string(),
                    kind: "酒店".to_string(),
                    date: "2024-01-06".to_string(),
                    invoice_amount: 900.00,
                    reimbursable_amount: 800.00,
                    tax_rate: 6,
                    tax_amount: 50.94,
                    payee_id: "U2".to_string(),
                    description: "喀什商务酒店(超标自付100)".to_string(),
                    policy_status: PolicyStatus::Ok,
                    policy_message: None,
                    receipt: true,
                },
                Expense {
                    id: "expense::4".to_string(),
                    source: ExpenseSource::Personal,
                    category: "餐饮".to_string(),
                    kind: "工作餐".to_string(),
                    date: "2024-01-07".to_string(),
                    invoice_amount: 450.00,
                    reimbursable_amount: 450.00,
                    tax_rate: 0,
                    tax_amount: 0.0,
                    payee_id: "U1".to_string(),
                    description: "全组客户晚餐".to_string(),
                    policy_status: PolicyStatus::Ok,
                    policy_message: None,
                    receipt: false,
                },
            ],
            loans: vec![Loan {
                id: "loan::1".to_string(),
                order_no: "JK202312-0088".to_string(),
                total_amount: 5000.00,
                remaining_amount: 2000.00,
                clearing_amount: 0.0,
            }],
            category_filter: None,
            lookup: LookupStatus::Idle,
            next_id: 1,
        }
    }

    /// Apply one event, returning the next state. The current state is
    /// never mutated.
    pub fn apply(&self, event: FormEvent) -> FormState {
        let mut next = self.clone();
        match event {
            FormEvent::EditBasicInfo(edit) => next.edit_basic_info(edit),
            FormEvent::LookupStarted { token } => {
                next.lookup = LookupStatus::Pending { token };
            }
            FormEvent::LookupResolved {
                token,
                application_id,
            } => {
                if next.lookup != (LookupStatus::Pending { token }) {
                    // Superseded by a newer selection; drop the result.
                    return next;
                }
                next.lookup = LookupStatus::Idle;
                if let Some(application) = catalog::find_application(&application_id) {
                    next.merge_application(application);
                }
            }
            FormEvent::AddTraveler { name } => {
                let id = next.alloc_id("traveler");
                next.travelers.push(Traveler::fellow(id, name));
            }
            FormEvent::RemoveTraveler { id } => {
                let is_main = next
                    .travelers
                    .iter()
                    .any(|t| t.id == id && t.is_main);
                if !is_main {
                    next.travelers.retain(|t| t.id != id);
                }
            }
            FormEvent::AddTrip => {
                let id = next.alloc_id("trip");
                let main_id = next.main_traveler_id();
                let fellows = next.fellow_traveler_ids();
                next.trips.push(Trip::blank(id, main_id, fellows));
            }
            FormEvent::RemoveTrip { id } => next.trips.retain(|t| t.id != id),
            FormEvent::EditTrip { id, edit } => {
                if let Some(trip) = next.trips.iter_mut().find(|t| t.id == id) {
                    *trip = apply_trip_edit(trip, edit);
                }
            }
            FormEvent::RemoveExpense { id } => next.expenses.retain(|e| e.id != id),
            FormEvent::EditExpense { id, edit } => {
                if let Some(expense) = next.expenses.iter_mut().find(|e| e.id == id) {
                    *expense = apply_expense_edit(expense, edit);
                }
            }
            FormEvent::SetCategoryFilter(filter) => next.category_filter = filter,
            FormEvent::SetLoanClearing { id, amount } => {
                if let Some(loan) = next.loans.iter_mut().find(|l| l.id == id) {
                    loan.clearing_amount = amount.clamp(0.0, loan.remaining_amount);
                }
            }
        }
        next
    }

    fn edit_basic_info(&mut self, edit: BasicInfoEdit) {
        let info = &mut self.basic_info;
        match edit {
            BasicInfoEdit::DocDate(v) => info.doc_date = v,
            BasicInfoEdit::Creator(v) => info.creator = v,
            BasicInfoEdit::Reimburser(v) => info.reimburser = v,
            BasicInfoEdit::CostOrg(v) => info.cost_org = v,
            BasicInfoEdit::CostDept(v) => info.cost_dept = v,
            BasicInfoEdit::Description(v) => info.description = v,
            BasicInfoEdit::IsProject(v) => {
                info.is_project = v;
                if !v {
                    info.project_type = "非项目支出".to_string();
                    info.project_code.clear();
                }
            }
            BasicInfoEdit::ProjectType(v) => info.project_type = v,
            BasicInfoEdit::ProjectCode(v) => info.project_code = v,
            BasicInfoEdit::FundSource(v) => info.fund_source = v,
        }
    }

    /// Destructive, unconditional merge of a selected application:
    /// header fields are overwritten, the trip list is replaced (with
    /// party fields defaulted from the roster), and corp expenses are
    /// replaced while personal expenses survive untouched.
    fn merge_application(&mut self, application: crate::models::Application) {
        self.basic_info.request_id = application.id;
        self.basic_info.description = application.title;

        let main_id = self.main_traveler_id();
        let fellows = self.fellow_traveler_ids();
        self.trips = application
            .trips
            .into_iter()
            .map(|mut trip| {
                if trip.main_traveler_id.is_empty() {
                    trip.main_traveler_id = main_id.clone();
                }
                if trip.fellow_traveler_ids.is_empty() {
                    trip.fellow_traveler_ids = fellows.clone();
                }
                trip
            })
            .collect();

        self.expenses
            .retain(|e| e.source == ExpenseSource::Personal);
        self.expenses.extend(application.corp_expenses);
    }

    pub fn main_traveler(&self) -> Option<&Traveler> {
        self.travelers
            .iter()
            .find(|t| t.is_main)
            .or_else(|| self.travelers.first())
    }

    /// Id of the main traveler, or empty when the roster is empty.
    pub fn main_traveler_id(&self) -> String {
        self.main_traveler().map(|t| t.id.clone()).unwrap_or_default()
    }

    /// Every non-main roster member.
    pub fn fellow_traveler_ids(&self) -> Vec<String> {
        self.travelers
            .iter()
            .filter(|t| !t.is_main)
            .map(|t| t.id.clone())
            .collect()
    }

    /// Traveler credited with loan clearing: the roster member whose name
    /// matches the reimburser field, falling back to the main traveler.
    pub fn reimburser_id(&self) -> String {
        self.travelers
            .iter()
            .find(|t| t.name == self.basic_info.reimburser)
            .map(|t| t.id.clone())
            .unwrap_or_else(|| self.main_traveler_id())
    }

    pub fn traveler_name(&self, id: &str) -> Option<&str> {
        self.travelers
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
    }

    pub fn is_syncing(&self) -> bool {
        matches!(self.lookup, LookupStatus::Pending { .. })
    }

    /// Expense rows of one source, narrowed by the category filter.
    /// Pure display partition; the underlying list is untouched.
    pub fn visible_expenses(&self, source: ExpenseSource) -> Vec<&Expense> {
        self.expenses
            .iter()
            .filter(|e| e.source == source)
            .filter(|e| match &self.category_filter {
                Some(category) => &e.category == category,
                None => true,
            })
            .collect()
    }

    /// Distinct categories across both tables, in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for expense in &self.expenses {
            if !seen.contains(&expense.category) {
                seen.push(expense.category.clone());
            }
        }
        seen
    }

    fn alloc_id(&mut self, prefix: &str) -> String {
        let id = format!("{}::{}", prefix, self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_one_main_traveler() {
        let state = FormState::seed();
        assert_eq!(state.travelers.iter().filter(|t| t.is_main).count(), 1);
        assert_eq!(state.main_traveler_id(), "U1");
        assert_eq!(state.fellow_traveler_ids(), vec!["U2".to_string()]);
    }

    #[test]
    fn test_remove_main_traveler_is_a_noop() {
        let state = FormState::seed();
        let next = state.apply(FormEvent::RemoveTraveler {
            id: "U1".to_string(),
        });
        assert_eq!(next.travelers, state.travelers);
    }

    #[test]
    fn test_remove_fellow_traveler() {
        let state = FormState::seed();
        let next = state.apply(FormEvent::RemoveTraveler {
            id: "U2".to_string(),
        });
        assert_eq!(next.travelers.len(), 1);
        assert_eq!(next.travelers[0].id, "U1");
    }

    #[test]
    fn test_add_traveler_joins_as_fellow() {
        let state = FormState::seed();
        let next = state.apply(FormEvent::AddTraveler {
            name: "王五".to_string(),
        });
        assert_eq!(next.travelers.len(), 3);
        let added = next.travelers.last().unwrap();
        assert_eq!(added.name, "王五");
        assert!(!added.is_main);
    }

    #[test]
    fn test_add_trip_defaults_party_from_roster() {
        let state = FormState::seed();
        let next = state.apply(FormEvent::AddTrip);
        assert_eq!(next.trips.len(), 1);
        let trip = &next.trips[0];
        assert_eq!(trip.main_traveler_id, "U1");
        assert_eq!(trip.fellow_traveler_ids, vec!["U2".to_string()]);
        assert_eq!(trip.days, 1);
        assert_eq!(trip.start_time, "09:00");
    }

    #[test]
    fn test_project_toggle_resets_dependent_fields() {
        let state = FormState::seed();
        let state = state.apply(FormEvent::EditBasicInfo(BasicInfoEdit::ProjectCode(
            "RD-2024-AI-001".to_string(),
        )));
        let next = state.apply(FormEvent::EditBasicInfo(BasicInfoEdit::IsProject(false)));
        assert!(!next.basic_info.is_project);
        assert_eq!(next.basic_info.project_type, "非项目支出");
        assert!(next.basic_info.project_code.is_empty());
    }

    #[test]
    fn test_application_merge_replaces_trips_and_corp_expenses() {
        let state = FormState::seed();
        let state = state.apply(FormEvent::LookupStarted { token: 1 });
        assert!(state.is_syncing());

        let next = state.apply(FormEvent::LookupResolved {
            token: 1,
            application_id: "TRIP-2024-BJ001".to_string(),
        });
        assert!(!next.is_syncing());
        assert_eq!(next.basic_info.request_id, "TRIP-2024-BJ001");
        assert_eq!(next.trips.len(), 2);

        // Template trips take their party from the roster.
        assert!(next.trips.iter().all(|t| t.main_traveler_id == "U1"));
        assert!(next
            .trips
            .iter()
            .all(|t| t.fellow_traveler_ids == vec!["U2".to_string()]));

        // Personal expenses survive, corp expenses are the template's.
        let personal = next.visible_expenses(ExpenseSource::Personal);
        assert_eq!(personal.len(), 2);
        assert!(personal.iter().any(|e| e.id == "expense::3"));
        let corp = next.visible_expenses(ExpenseSource::Corp);
        assert_eq!(corp.len(), 2);
    }

    #[test]
    fn test_second_merge_replaces_previous_corp_expenses() {
        let state = FormState::seed()
            .apply(FormEvent::LookupStarted { token: 1 })
            .apply(FormEvent::LookupResolved {
                token: 1,
                application_id: "TRIP-2024-BJ001".to_string(),
            })
            .apply(FormEvent::LookupStarted { token: 2 })
            .apply(FormEvent::LookupResolved {
                token: 2,
                application_id: "TRIP-2024-XJ003".to_string(),
            });
        assert_eq!(state.trips.len(), 2);
        assert_eq!(state.visible_expenses(ExpenseSource::Corp).len(), 3);
        assert_eq!(state.visible_expenses(ExpenseSource::Personal).len(), 2);
    }

    #[test]
    fn test_stale_lookup_resolution_is_dropped() {
        let state = FormState::seed()
            .apply(FormEvent::LookupStarted { token: 1 })
            .apply(FormEvent::LookupStarted { token: 2 });

        // The first lookup resolves late; it must not merge anything.
        let next = state.apply(FormEvent::LookupResolved {
            token: 1,
            application_id: "TRIP-2024-BJ001".to_string(),
        });
        assert!(next.is_syncing());
        assert!(next.trips.is_empty());
        assert!(next.basic_info.request_id.is_empty());

        // The current one still lands.
        let next = next.apply(FormEvent::LookupResolved {
            token: 2,
            application_id: "TRIP-2024-SZ002".to_string(),
        });
        assert_eq!(next.basic_info.request_id, "TRIP-2024-SZ002");
        assert_eq!(next.trips.len(), 1);
    }

    #[test]
    fn test_unknown_application_clears_syncing_only() {
        let state = FormState::seed().apply(FormEvent::LookupStarted { token: 1 });
        let next = state.apply(FormEvent::LookupResolved {
            token: 1,
            application_id: "TRIP-9999-XX000".to_string(),
        });
        assert!(!next.is_syncing());
        assert!(next.trips.is_empty());
        assert!(next.basic_info.request_id.is_empty());
    }

    #[test]
    fn test_loan_clearing_clamps_to_remaining() {
        let state = FormState::seed();
        let next = state.apply(FormEvent::SetLoanClearing {
            id: "loan::1".to_string(),
            amount: 3500.0,
        });
        assert_eq!(next.loans[0].clearing_amount, 2000.0);

        let next = next.apply(FormEvent::SetLoanClearing {
            id: "loan::1".to_string(),
            amount: -50.0,
        });
        assert_eq!(next.loans[0].clearing_amount, 0.0);

        let next = next.apply(FormEvent::SetLoanClearing {
            id: "loan::1".to_string(),
            amount: 1000.0,
        });
        assert_eq!(next.loans[0].clearing_amount, 1000.0);
    }

    #[test]
    fn test_category_filter_partitions_both_tables() {
        let state = FormState::seed()
            .apply(FormEvent::LookupStarted { token: 1 })
            .apply(FormEvent::LookupResolved {
                token: 1,
                application_id: "TRIP-2024-BJ001".to_string(),
            })
            .apply(FormEvent::SetCategoryFilter(Some("住宿".to_string())));

        assert_eq!(state.visible_expenses(ExpenseSource::Personal).len(), 1);
        assert_eq!(state.visible_expenses(ExpenseSource::Corp).len(), 0);
        // Underlying list untouched.
        assert_eq!(state.expenses.len(), 4);

        let cleared = state.apply(FormEvent::SetCategoryFilter(None));
        assert_eq!(cleared.visible_expenses(ExpenseSource::Personal).len(), 2);
        assert_eq!(cleared.visible_expenses(ExpenseSource::Corp).len(), 2);
    }

    #[test]
    fn test_remove_expense_by_id() {
        let state = FormState::seed();
        let next = state.apply(FormEvent::RemoveExpense {
            id: "expense::4".to_string(),
        });
        assert_eq!(next.expenses.len(), 1);
        assert_eq!(next.expenses[0].id, "expense::3");
    }

    #[test]
    fn test_trip_edit_routes_through_transition() {
        let state = FormState::seed().apply(FormEvent::AddTrip);
        let trip_id = state.trips[0].id.clone();
        let next = state
            .apply(FormEvent::EditTrip {
                id: trip_id.clone(),
                edit: crate::trip::TripEdit::StartDate("2024-01-06".to_string()),
            })
            .apply(FormEvent::EditTrip {
                id: trip_id,
                edit: crate::trip::TripEdit::EndDate("2024-01-09".to_string()),
            });
        assert_eq!(next.trips[0].days, 3);
    }
}

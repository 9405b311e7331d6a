use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use shared::{
    round_currency, Expense, ExpenseEdit, ExpenseSource, FormEvent, FormState, PolicyStatus,
    Totals, MEAL_CATEGORY, MEAL_REIMBURSEMENT_CEILING, TAX_RATES,
};

use crate::components::filterable_header::FilterableHeader;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct ExpenseTablesProps {
    pub state: FormState,
    pub totals: Totals,
    pub on_event: Callback<FormEvent>,
}

/// The two expense tables: personal invoices (fully editable, policy
/// checked) and corporate prepaid orders (read-only apart from removal).
/// Both share the category filter held in form state.
#[function_component(ExpenseTables)]
pub fn expense_tables(props: &ExpenseTablesProps) -> Html {
    let state = &props.state;
    let totals = &props.totals;

    let on_filter = {
        let on_event = props.on_event.clone();
        Callback::from(move |category: Option<String>| {
            on_event.emit(FormEvent::SetCategoryFilter(category));
        })
    };

    let personal = state.visible_expenses(ExpenseSource::Personal);
    let corp = state.visible_expenses(ExpenseSource::Corp);
    let categories = state.categories();
    let allowance_payee = state
        .main_traveler()
        .map(|t| t.name.clone())
        .unwrap_or_default();

    html! {
        <>
            <section class="card expense-personal">
                <div class="card-header">
                    {"个人垫付费用明细"}
                    {if totals.warning_count > 0 {
                        html! {
                            <span class="warn-badge">
                                {format!("{} 项超标", totals.warning_count)}
                            </span>
                        }
                    } else { html! {} }}
                </div>
                <table class="expense-table">
                    <thead>
                        <tr>
                            <FilterableHeader
                                title="费用类别"
                                options={categories.clone()}
                                current={state.category_filter.clone()}
                                on_change={on_filter.clone()}
                            />
                            <th>{"日期"}</th>
                            <th>{"发票金额"}</th>
                            <th>{"税率"}</th>
                            <th>{"可抵扣税额"}</th>
                            <th>{"报销金额"}</th>
                            <th>{"收款人"}</th>
                            <th>{"票据"}</th>
                            <th>{"说明"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {for personal.iter().map(|expense| personal_row(
                            expense,
                            state,
                            &props.on_event,
                        ))}
                        {if totals.allowance_total > 0.0 {
                            html! {
                                <tr class="allowance-row">
                                    <td>{"出差补贴"}</td>
                                    <td colspan="4">
                                        {format!(
                                            "艰苦地区补贴 共{}天 (按行程段×人数自动计算)",
                                            totals.hardship_days,
                                        )}
                                    </td>
                                    <td class="amount">
                                        {format!("¥{:.2}", round_currency(totals.allowance_total))}
                                    </td>
                                    <td>{allowance_payee}</td>
                                    <td>{"—"}</td>
                                    <td>{"无需发票"}</td>
                                    <td></td>
                                </tr>
                            }
                        } else { html! {} }}
                    </tbody>
                    <tfoot>
                        <tr>
                            <td colspan="2">{"小计"}</td>
                            <td class="amount">
                                {format!("¥{:.2}", round_currency(totals.personal_invoice_total))}
                            </td>
                            <td></td>
                            <td class="amount">
                                {format!("¥{:.2}", round_currency(totals.total_tax))}
                            </td>
                            <td class="amount">
                                {format!("¥{:.2}", round_currency(totals.personal_reimbursable_total))}
                            </td>
                            <td colspan="4"></td>
                        </tr>
                    </tfoot>
                </table>
                <div class="upload-dropzone">
                    {"点击或拖拽上传发票附件 (支持 PDF / JPG，OCR 识别暂未开放)"}
                </div>
            </section>
            <section class="card expense-corp">
                <div class="card-header">{"商旅订单 (对公结算)"}</div>
                {if corp.is_empty() {
                    html! {
                        <div class="corp-empty">{"选择出差申请单后自动带出商旅订单"}</div>
                    }
                } else {
                    html! {
                        <table class="expense-table">
                            <thead>
                                <tr>
                                    <FilterableHeader
                                        title="费用类别"
                                        options={categories}
                                        current={state.category_filter.clone()}
                                        on_change={on_filter}
                                    />
                                    <th>{"日期"}</th>
                                    <th>{"订单金额"}</th>
                                    <th>{"税额"}</th>
                                    <th>{"说明"}</th>
                                    <th>{"结算方式"}</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {for corp.iter().map(|expense| corp_row(expense, &props.on_event))}
                            </tbody>
                            <tfoot>
                                <tr>
                                    <td colspan="2">{"小计"}</td>
                                    <td class="amount">
                                        {format!("¥{:.2}", round_currency(totals.corp_total))}
                                    </td>
                                    <td colspan="4"></td>
                                </tr>
                            </tfoot>
                        </table>
                    }
                }}
            </section>
        </>
    }
}

fn personal_row(expense: &Expense, state: &FormState, on_event: &Callback<FormEvent>) -> Html {
    let id = expense.id.clone();

    let edit = {
        let on_event = on_event.clone();
        let id = id.clone();
        Callback::from(move |edit: ExpenseEdit| {
            on_event.emit(FormEvent::EditExpense {
                id: id.clone(),
                edit,
            });
        })
    };

    let on_invoice = {
        let edit = edit.clone();
        let category = expense.category.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let amount: f64 = input.value().trim().parse().unwrap_or(0.0);
            if category == MEAL_CATEGORY && amount > MEAL_REIMBURSEMENT_CEILING {
                Logger::warn_with_component(
                    "expense-table",
                    &format!("meal invoice {} over ceiling, reimbursable capped", amount),
                );
            }
            edit.emit(ExpenseEdit::InvoiceAmount(amount));
        })
    };

    let on_reimbursable = {
        let edit = edit.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit.emit(ExpenseEdit::ReimbursableAmount(
                input.value().trim().parse().unwrap_or(0.0),
            ));
        })
    };

    let on_tax_rate = {
        let edit = edit.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            edit.emit(ExpenseEdit::TaxRate(
                select.value().trim().parse().unwrap_or(0),
            ));
        })
    };

    let on_payee = {
        let edit = edit.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            edit.emit(ExpenseEdit::Payee(select.value()));
        })
    };

    let on_description = {
        let edit = edit.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit.emit(ExpenseEdit::Description(input.value()));
        })
    };

    let remove = {
        let on_event = on_event.clone();
        let id = id.clone();
        Callback::from(move |_: MouseEvent| {
            on_event.emit(FormEvent::RemoveExpense { id: id.clone() });
        })
    };

    let warn = expense.policy_status == PolicyStatus::Warn;

    html! {
        <tr key={id} class={classes!(warn.then_some("row-warn"))}>
            <td>
                <span class="expense-category">{&expense.category}</span>
                <span class="expense-kind">{&expense.kind}</span>
            </td>
            <td>{&expense.date}</td>
            <td>
                <input
                    type="number"
                    class="amount-input"
                    value={expense.invoice_amount.to_string()}
                    onchange={on_invoice}
                />
            </td>
            <td>
                <select value={expense.tax_rate.to_string()} onchange={on_tax_rate}>
                    {for TAX_RATES.iter().map(|rate| html! {
                        <option value={rate.to_string()} selected={expense.tax_rate == *rate}>
                            {format!("{}%", rate)}
                        </option>
                    })}
                </select>
            </td>
            <td class="amount">{format!("¥{:.2}", expense.tax_amount)}</td>
            <td>
                <input
                    type="number"
                    class="amount-input"
                    value={expense.reimbursable_amount.to_string()}
                    onchange={on_reimbursable}
                />
                {if warn {
                    html! {
                        <div class="policy-message">
                            {expense.policy_message.clone().unwrap_or_default()}
                        </div>
                    }
                } else { html! {} }}
            </td>
            <td>
                <select value={expense.payee_id.clone()} onchange={on_payee}>
                    {for state.travelers.iter().map(|t| html! {
                        <option value={t.id.clone()} selected={expense.payee_id == t.id}>
                            {&t.name}
                        </option>
                    })}
                </select>
            </td>
            <td class="receipt-cell">
                {if expense.receipt {
                    html! { <span class="receipt-ok" title="已附票据">{"📎"}</span> }
                } else {
                    html! { <span class="receipt-missing" title="缺少票据">{"缺票据"}</span> }
                }}
            </td>
            <td>
                <input
                    value={expense.description.clone()}
                    onchange={on_description}
                />
            </td>
            <td>
                <button type="button" class="row-remove" onclick={remove}>{"删除"}</button>
            </td>
        </tr>
    }
}

fn corp_row(expense: &Expense, on_event: &Callback<FormEvent>) -> Html {
    let remove = {
        let on_event = on_event.clone();
        let id = expense.id.clone();
        Callback::from(move |_: MouseEvent| {
            on_event.emit(FormEvent::RemoveExpense { id: id.clone() });
        })
    };

    html! {
        <tr key={expense.id.clone()}>
            <td>
                <span class="expense-category">{&expense.category}</span>
                <span class="expense-kind">{&expense.kind}</span>
            </td>
            <td>{&expense.date}</td>
            <td class="amount">{format!("¥{:.2}", expense.invoice_amount)}</td>
            <td class="amount">{format!("¥{:.2}", expense.tax_amount)}</td>
            <td>{&expense.description}</td>
            <td><span class="corp-tag">{"公司月结"}</span></td>
            <td>
                <button type="button" class="row-remove" onclick={remove}>{"移除"}</button>
            </td>
        </tr>
    }
}

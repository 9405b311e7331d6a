use web_sys::HtmlInputElement;
use yew::prelude::*;

use shared::{round_currency, FormEvent, FormState, Totals};

use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct SettlementPanelProps {
    pub state: FormState,
    pub totals: Totals,
    pub on_event: Callback<FormEvent>,
}

/// Funds-settlement section: outstanding loans with their clearing inputs
/// and the derived per-traveler payout list.
#[function_component(SettlementPanel)]
pub fn settlement_panel(props: &SettlementPanelProps) -> Html {
    let state = &props.state;
    let totals = &props.totals;

    html! {
        <section class="card settlement-panel">
            <div class="card-header">{"资金结算信息"}</div>
            <div class="card-body">
                {if !state.loans.is_empty() {
                    html! {
                        <div class="loan-section">
                            <div class="section-title">{"冲销借款"}</div>
                            <table class="loan-table">
                                <thead>
                                    <tr>
                                        <th>{"借款单号"}</th>
                                        <th>{"借款总额"}</th>
                                        <th>{"未还金额"}</th>
                                        <th>{"本次冲销"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {for state.loans.iter().map(|loan| {
                                        let on_clearing = {
                                            let on_event = props.on_event.clone();
                                            let id = loan.id.clone();
                                            Callback::from(move |e: Event| {
                                                let input: HtmlInputElement =
                                                    e.target_unchecked_into();
                                                let amount = input
                                                    .value()
                                                    .trim()
                                                    .parse()
                                                    .unwrap_or(0.0);
                                                Logger::debug_with_component(
                                                    "settlement",
                                                    &format!("clearing {} -> {}", id, amount),
                                                );
                                                on_event.emit(FormEvent::SetLoanClearing {
                                                    id: id.clone(),
                                                    amount,
                                                });
                                            })
                                        };
                                        html! {
                                            <tr key={loan.id.clone()}>
                                                <td>{&loan.order_no}</td>
                                                <td class="amount">
                                                    {format!("¥{:.2}", loan.total_amount)}
                                                </td>
                                                <td class="amount">
                                                    {format!("¥{:.2}", loan.remaining_amount)}
                                                </td>
                                                <td>
                                                    <input
                                                        type="number"
                                                        class="amount-input"
                                                        value={loan.clearing_amount.to_string()}
                                                        max={loan.remaining_amount.to_string()}
                                                        onchange={on_clearing}
                                                    />
                                                </td>
                                            </tr>
                                        }
                                    })}
                                </tbody>
                            </table>
                        </div>
                    }
                } else { html! {} }}
                <div class="payout-section">
                    <div class="section-title">
                        {format!("收款明细 ({}人)", totals.settlement_entry_count())}
                    </div>
                    {for state.travelers.iter().filter_map(|traveler| {
                        let amount = totals.settlement_for(&traveler.id);
                        if amount <= 0.0 {
                            return None;
                        }
                        Some(html! {
                            <div class="payout-row" key={traveler.id.clone()}>
                                <div class="payout-who">
                                    <span class="payout-name">{&traveler.name}</span>
                                    <span class="payout-bank">
                                        {format!("{} {}", traveler.bank_name, traveler.bank_account)}
                                    </span>
                                </div>
                                <div class="payout-amount">
                                    {format!("¥{:.2}", round_currency(amount))}
                                </div>
                            </div>
                        })
                    })}
                    {if totals.cleared_loan_total > 0.0 {
                        html! {
                            <div class="payout-note">
                                {format!(
                                    "已冲销借款 ¥{:.2}",
                                    round_currency(totals.cleared_loan_total),
                                )}
                            </div>
                        }
                    } else { html! {} }}
                    <div class="payout-footer">
                        <span>{"应付总额"}</span>
                        <span class="payout-total">
                            {format!("¥{:.2}", round_currency(totals.total_payable))}
                        </span>
                    </div>
                </div>
            </div>
        </section>
    }
}

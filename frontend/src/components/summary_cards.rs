use shared::Totals;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryCardsProps {
    pub totals: Totals,
}

/// Dashboard row across the top of the form: grand total, amount payable
/// to employees, corp-settled total, and deductible tax.
#[function_component(SummaryCards)]
pub fn summary_cards(props: &SummaryCardsProps) -> Html {
    let totals = &props.totals;
    html! {
        <div class="summary-cards">
            <div class="summary-card summary-card-dark">
                <span class="summary-label">{"总金额合计"}</span>
                <div class="summary-value">{format!("¥ {:.2}", totals.grand_total)}</div>
                <p class="summary-hint">{format!(
                    "商旅 {:.2} + 垫付 {:.2} + 补贴",
                    totals.corp_total, totals.personal_invoice_total
                )}</p>
            </div>
            <div class="summary-card">
                <span class="summary-label">{"应付员工合计"}</span>
                <div class="summary-value payable">{format!("¥ {:.2}", totals.total_payable)}</div>
                <p class="summary-hint">{format!(
                    "可报销垫付 ¥{:.2} + 艰苦补贴",
                    totals.personal_reimbursable_total
                )}</p>
            </div>
            <div class="summary-card">
                <span class="summary-label">{"商旅支付"}</span>
                <div class="summary-value corp">{format!("¥ {:.2}", totals.corp_total)}</div>
                <p class="summary-hint">{"公司直接结算"}</p>
            </div>
            <div class="summary-card">
                <span class="summary-label">{"进项税额汇总"}</span>
                <div class="summary-value tax">{format!("¥ {:.2}", totals.total_tax)}</div>
                <p class="summary-hint">{"专票/客票可抵扣总额"}</p>
            </div>
        </div>
    }
}

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub doc_no: String,
}

/// Sticky toolbar with the document number and the (inert) draft/submit
/// actions — there is no approval workflow behind them.
#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <div class="toolbar">
            <div class="toolbar-title">
                <h1>{"国内出差报销单"}</h1>
                <p class="doc-no">{"单据编号: "}<span>{&props.doc_no}</span></p>
            </div>
            <div class="toolbar-actions">
                <button type="button" class="btn btn-secondary">{"存草稿"}</button>
                <button type="button" class="btn btn-primary">{"提交审批"}</button>
            </div>
        </div>
    }
}

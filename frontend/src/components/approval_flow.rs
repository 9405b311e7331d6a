use yew::prelude::*;

const STEPS: [(&str, &str); 3] = [
    ("发起人", "提交报销单"),
    ("项目经理", "审批行程与费用"),
    ("财务初审", "复核票据与结算"),
];

/// Static preview of the approval chain the document enters on submit.
#[function_component(ApprovalFlow)]
pub fn approval_flow() -> Html {
    html! {
        <section class="card approval-flow">
            <div class="card-header">{"审批流程预览"}</div>
            <div class="flow-steps">
                {for STEPS.iter().enumerate().map(|(index, (role, action))| html! {
                    <>
                        {if index > 0 {
                            html! { <span class="flow-arrow">{"→"}</span> }
                        } else { html! {} }}
                        <div class="flow-step">
                            <div class="flow-role">{*role}</div>
                            <div class="flow-action">{*action}</div>
                        </div>
                    </>
                })}
            </div>
        </section>
    }
}

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use shared::{catalog, BasicInfo, BasicInfoEdit, FormEvent};

use crate::components::project_picker::ProjectPicker;

#[derive(Properties, PartialEq)]
pub struct BasicInfoFormProps {
    pub basic_info: BasicInfo,
    /// Application lookup in flight
    pub syncing: bool,
    pub on_event: Callback<FormEvent>,
    /// Kicks off the simulated application lookup
    pub on_select_application: Callback<String>,
}

/// Document header section: metadata fields, the project cascade, and the
/// travel-application selector that pulls in template data.
#[function_component(BasicInfoForm)]
pub fn basic_info_form(props: &BasicInfoFormProps) -> Html {
    let info = &props.basic_info;

    let edit = |f: fn(String) -> BasicInfoEdit| {
        let on_event = props.on_event.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_event.emit(FormEvent::EditBasicInfo(f(input.value())));
        })
    };

    let select_edit = |f: fn(String) -> BasicInfoEdit| {
        let on_event = props.on_event.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_event.emit(FormEvent::EditBasicInfo(f(select.value())));
        })
    };

    let set_is_project = |value: bool| {
        let on_event = props.on_event.clone();
        Callback::from(move |_: Event| {
            on_event.emit(FormEvent::EditBasicInfo(BasicInfoEdit::IsProject(value)));
        })
    };

    let on_project_code = {
        let on_event = props.on_event.clone();
        Callback::from(move |code: String| {
            on_event.emit(FormEvent::EditBasicInfo(BasicInfoEdit::ProjectCode(code)));
        })
    };

    let on_application_change = {
        let on_select_application = props.on_select_application.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_select_application.emit(select.value());
        })
    };

    html! {
        <section class="card basic-info">
            <div class="card-header">{"单据基本信息"}</div>
            <div class="card-body field-grid">
                <div class="field">
                    <label>{"单据编号"}</label>
                    <div class="field-static">{&info.doc_no}</div>
                </div>
                <div class="field">
                    <label>{"单据日期"}</label>
                    <input type="date" value={info.doc_date.clone()}
                        onchange={edit(BasicInfoEdit::DocDate)} />
                </div>
                <div class="field">
                    <label>{"创建人"}</label>
                    <input value={info.creator.clone()} onchange={edit(BasicInfoEdit::Creator)} />
                </div>
                <div class="field">
                    <label>{"报销人"}</label>
                    <input value={info.reimburser.clone()}
                        onchange={edit(BasicInfoEdit::Reimburser)} />
                </div>
                <div class="field">
                    <label>{"费用承担组织"}</label>
                    <input value={info.cost_org.clone()} onchange={edit(BasicInfoEdit::CostOrg)} />
                </div>
                <div class="field">
                    <label>{"费用承担部门"}</label>
                    <input value={info.cost_dept.clone()}
                        onchange={edit(BasicInfoEdit::CostDept)} />
                </div>
                <div class="field">
                    <label>{"是否项目关联"}</label>
                    <div class="radio-row">
                        <label>
                            <input type="radio" name="is-project" checked={info.is_project}
                                onchange={set_is_project(true)} />
                            {"是"}
                        </label>
                        <label>
                            <input type="radio" name="is-project" checked={!info.is_project}
                                onchange={set_is_project(false)} />
                            {"否"}
                        </label>
                    </div>
                </div>
                {if info.is_project {
                    html! {
                        <>
                            <div class="field">
                                <label>{"项目类型"}</label>
                                <select value={info.project_type.clone()}
                                    onchange={select_edit(BasicInfoEdit::ProjectType)}>
                                    <option value="科研项目" selected={info.project_type == "科研项目"}>{"科研项目"}</option>
                                    <option value="非科研项目" selected={info.project_type == "非科研项目"}>{"非科研项目"}</option>
                                    <option value="非项目支出" selected={info.project_type == "非项目支出"}>{"非项目支出"}</option>
                                </select>
                            </div>
                            {if info.project_type != "非项目支出" {
                                html! {
                                    <>
                                        <div class="field">
                                            <label>{"资金来源"}</label>
                                            <select value={info.fund_source.clone()}
                                                onchange={select_edit(BasicInfoEdit::FundSource)}>
                                                <option value="自筹" selected={info.fund_source == "自筹"}>{"自筹资金"}</option>
                                                <option value="专项资金" selected={info.fund_source == "专项资金"}>{"专项资金"}</option>
                                            </select>
                                        </div>
                                        <div class="field">
                                            <label>{"选择关联项目"}</label>
                                            <ProjectPicker
                                                value={info.project_code.clone()}
                                                placeholder="输入编号或名称..."
                                                on_change={on_project_code}
                                            />
                                        </div>
                                    </>
                                }
                            } else { html! {} }}
                        </>
                    }
                } else { html! {} }}
                <div class="field field-wide">
                    <label>{"出差申请单 (单号)"}</label>
                    <div class="application-select">
                        <select value={info.request_id.clone()} onchange={on_application_change}>
                            <option value="" selected={info.request_id.is_empty()}>
                                {"请选择出差申请 (带出行程与商旅订单)"}
                            </option>
                            {for catalog::applications().iter().map(|app| html! {
                                <option value={app.id.clone()}
                                    selected={info.request_id == app.id}>
                                    {format!("{} - {}", app.id, app.title)}
                                </option>
                            })}
                        </select>
                        {if props.syncing {
                            html! { <span class="syncing-indicator" title="数据带出中">{"⟳"}</span> }
                        } else { html! {} }}
                    </div>
                </div>
                <div class="field field-full">
                    <label>{"报销说明"}</label>
                    <input value={info.description.clone()} placeholder="请输入详细的报销事由..."
                        onchange={edit(BasicInfoEdit::Description)} />
                </div>
            </div>
        </section>
    }
}

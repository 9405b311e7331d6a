use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, HtmlInputElement};
use yew::prelude::*;

use shared::catalog;

#[derive(Properties, PartialEq)]
pub struct ProjectPickerProps {
    pub value: String,
    #[prop_or_default]
    pub placeholder: String,
    pub on_change: Callback<String>,
}

/// Project lookup with free-text fallback: typing commits the raw text
/// immediately, selecting a catalog entry commits "CODE (name)".
#[function_component(ProjectPicker)]
pub fn project_picker(props: &ProjectPickerProps) -> Html {
    let is_open = use_state(|| false);
    let search_term = use_state(|| props.value.clone());
    let wrapper_ref = use_node_ref();

    {
        let search_term = search_term.clone();
        let is_open = is_open.clone();
        use_effect_with(props.value.clone(), move |value| {
            if !*is_open {
                search_term.set(value.clone());
            }
        });
    }

    {
        let is_open = is_open.clone();
        let wrapper_ref = wrapper_ref.clone();
        use_effect_with(*is_open, move |open| {
            let listener = open.then(|| {
                EventListener::new(&window().unwrap(), "mousedown", move |event| {
                    let outside = match (
                        event.target().and_then(|t| t.dyn_into::<Element>().ok()),
                        wrapper_ref.cast::<Element>(),
                    ) {
                        (Some(target), Some(wrapper)) => !wrapper.contains(Some(&target)),
                        _ => false,
                    };
                    if outside {
                        is_open.set(false);
                    }
                })
            });
            move || drop(listener)
        });
    }

    let on_input = {
        let search_term = search_term.clone();
        let is_open = is_open.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            search_term.set(value.clone());
            on_change.emit(value);
            is_open.set(true);
        })
    };

    let on_focus = {
        let is_open = is_open.clone();
        Callback::from(move |_: FocusEvent| is_open.set(true))
    };

    let on_clear = {
        let search_term = search_term.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            search_term.set(String::new());
            on_change.emit(String::new());
        })
    };

    let select_project = {
        let search_term = search_term.clone();
        let is_open = is_open.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |project: shared::Project| {
            let display = format!("{} ({})", project.code, project.name);
            search_term.set(display.clone());
            on_change.emit(display);
            is_open.set(false);
        })
    };

    let matches = catalog::search_projects(&search_term);

    html! {
        <div class="project-picker" ref={wrapper_ref}>
            <div class="project-picker-field">
                <input
                    class="project-picker-input"
                    placeholder={props.placeholder.clone()}
                    value={(*search_term).clone()}
                    oninput={on_input}
                    onfocus={on_focus}
                />
                {if !search_term.is_empty() {
                    html! {
                        <button type="button" class="project-picker-clear" onclick={on_clear}>
                            {"×"}
                        </button>
                    }
                } else { html! {} }}
            </div>
            {if *is_open {
                html! {
                    <div class="project-picker-dropdown">
                        {if matches.is_empty() {
                            html! {
                                <p class="project-picker-empty">{"无匹配项目，支持手动输入"}</p>
                            }
                        } else {
                            html! {
                                <>
                                    {for matches.into_iter().map(|project| {
                                        let select_project = select_project.clone();
                                        let code = project.code.clone();
                                        let name = project.name.clone();
                                        html! {
                                            <div
                                                class="project-option"
                                                onclick={Callback::from(move |_: MouseEvent| {
                                                    select_project.emit(project.clone())
                                                })}
                                            >
                                                <div class="project-code">{code}</div>
                                                <div class="project-name">{name}</div>
                                            </div>
                                        }
                                    })}
                                </>
                            }
                        }}
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}

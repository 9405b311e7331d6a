use web_sys::window;
use yew::prelude::*;

use shared::{FormEvent, Traveler};

use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct TravelerRosterProps {
    pub travelers: Vec<Traveler>,
    pub on_event: Callback<FormEvent>,
}

/// Traveler chips with add/remove. The main traveler carries no remove
/// control; the reducer blocks removal regardless.
#[function_component(TravelerRoster)]
pub fn traveler_roster(props: &TravelerRosterProps) -> Html {
    let add_traveler = {
        let on_event = props.on_event.clone();
        Callback::from(move |_: MouseEvent| {
            let name = window()
                .and_then(|w| w.prompt_with_message("请输入同行人姓名:").ok())
                .flatten()
                .unwrap_or_default();
            if name.is_empty() {
                return;
            }
            Logger::debug_with_component("traveler-roster", &format!("adding {}", name));
            on_event.emit(FormEvent::AddTraveler { name });
        })
    };

    html! {
        <div class="traveler-roster">
            <div class="roster-header">
                <label>{format!("同行人员名册 ({}人)", props.travelers.len())}</label>
                <span class="roster-hint">{"* 系统将根据职级 (Level) 自动匹配差旅标准"}</span>
            </div>
            <div class="roster-chips">
                {for props.travelers.iter().map(|traveler| {
                    let remove = {
                        let on_event = props.on_event.clone();
                        let id = traveler.id.clone();
                        Callback::from(move |_: MouseEvent| {
                            on_event.emit(FormEvent::RemoveTraveler { id: id.clone() });
                        })
                    };
                    html! {
                        <div class={classes!("traveler-chip", traveler.is_main.then_some("main"))}>
                            <span class="traveler-level" title={format!("职级: {}", traveler.level)}>
                                {&traveler.level}
                            </span>
                            <span class="traveler-name">{&traveler.name}</span>
                            {if !traveler.is_main {
                                html! {
                                    <button type="button" class="chip-remove" onclick={remove}>
                                        {"×"}
                                    </button>
                                }
                            } else { html! {} }}
                        </div>
                    }
                })}
                <button type="button" class="chip-add" onclick={add_traveler}>{"+"}</button>
            </div>
        </div>
    }
}

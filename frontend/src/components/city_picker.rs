use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, HtmlInputElement};
use yew::prelude::*;

use shared::catalog;

#[derive(Properties, PartialEq)]
pub struct CityPickerProps {
    /// Committed city name
    pub value: String,
    #[prop_or_default]
    pub placeholder: String,
    /// Fires on selection with the city name and its hardship
    /// designation; free text never commits.
    pub on_select: Callback<(String, bool)>,
}

/// City lookup with autocomplete: hot cities before any input, then
/// name/pinyin matches. Selecting a city reports its hardship flag so the
/// trip row can pick it up.
#[function_component(CityPicker)]
pub fn city_picker(props: &CityPickerProps) -> Html {
    let is_open = use_state(|| false);
    let input_value = use_state(|| props.value.clone());
    let wrapper_ref = use_node_ref();

    // Keep the local input in sync with the committed value.
    {
        let input_value = input_value.clone();
        use_effect_with(props.value.clone(), move |value| {
            input_value.set(value.clone());
        });
    }

    // Close on click outside, resetting uncommitted input. Keyed on the
    // committed value too, so the listener never resets to a stale city.
    {
        let is_open = is_open.clone();
        let input_value = input_value.clone();
        let wrapper_ref = wrapper_ref.clone();
        use_effect_with((*is_open, props.value.clone()), move |(open, committed)| {
            let committed = committed.clone();
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
                        if !committed.is_empty() {
                            input_value.set(committed.clone());
                        }
                    }
                })
            });
            move || drop(listener)
        });
    }

    let on_input = {
        let input_value = input_value.clone();
        let is_open = is_open.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            input_value.set(input.value());
            is_open.set(true);
        })
    };

    let on_focus = {
        let is_open = is_open.clone();
        Callback::from(move |_: FocusEvent| is_open.set(true))
    };

    let select_city = {
        let input_value = input_value.clone();
        let is_open = is_open.clone();
        let on_select = props.on_select.clone();
        Callback::from(move |city: shared::City| {
            input_value.set(city.name.clone());
            on_select.emit((city.name, city.hardship));
            is_open.set(false);
        })
    };

    let city_button = |city: shared::City| {
        let select_city = select_city.clone();
        let label = city.name.clone();
        let hardship = city.hardship;
        html! {
            <button
                type="button"
                class="city-option"
                onclick={Callback::from(move |_: MouseEvent| select_city.emit(city.clone()))}
            >
                {label}
                {if hardship { html! { <span class="hardship-mark">{"艰苦"}</span> } } else { html! {} }}
            </button>
        }
    };

    let matches = catalog::search_cities(&input_value);

    html! {
        <div class="city-picker" ref={wrapper_ref}>
            <input
                type="text"
                class="city-picker-input"
                placeholder={props.placeholder.clone()}
                value={(*input_value).clone()}
                oninput={on_input}
                onfocus={on_focus}
            />
            {if *is_open {
                html! {
                    <div class="city-picker-dropdown">
                        {if input_value.is_empty() {
                            html! {
                                <div class="city-picker-section">
                                    <p class="city-picker-heading">{"热门城市"}</p>
                                    <div class="city-grid">
                                        {for catalog::hot_cities().into_iter().map(&city_button)}
                                    </div>
                                </div>
                            }
                        } else { html! {} }}
                        <p class="city-picker-heading">
                            {if input_value.is_empty() { "所有城市" } else { "匹配结果" }}
                        </p>
                        {if matches.is_empty() {
                            html! { <p class="city-picker-empty">{"无匹配城市"}</p> }
                        } else {
                            html! {
                                <div class="city-grid">
                                    {for matches.into_iter().map(&city_button)}
                                </div>
                            }
                        }}
                    </div>
                }
            } else { html! {} }}
        </div>
    }
}

use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FilterableHeaderProps {
    pub title: String,
    /// Distinct categories offered by the filter
    pub options: Vec<String>,
    /// `None` shows every category
    pub current: Option<String>,
    pub on_change: Callback<Option<String>>,
}

/// Table column header with an embedded category filter. Purely
/// display-side: it only reports the chosen category upward.
#[function_component(FilterableHeader)]
pub fn filterable_header(props: &FilterableHeaderProps) -> Html {
    let onchange = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            on_change.emit(if value == "all" { None } else { Some(value) });
        })
    };

    let active = props.current.is_some();
    let current_value = props.current.clone().unwrap_or_else(|| "all".to_string());

    html! {
        <th class={classes!("filterable-header", active.then_some("filter-active"))}>
            <span>{&props.title}</span>
            <select title="点击筛选费用类别" value={current_value.clone()} {onchange}>
                <option value="all" selected={!active}>{"全部类别"}</option>
                {for props.options.iter().map(|option| html! {
                    <option value={option.clone()} selected={current_value == *option}>
                        {option}
                    </option>
                })}
            </select>
        </th>
    }
}

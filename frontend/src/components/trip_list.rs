use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use shared::{FormEvent, Traveler, Trip, TripEdit};

use crate::components::city_picker::CityPicker;

#[derive(Properties, PartialEq)]
pub struct TripListProps {
    pub trips: Vec<Trip>,
    pub travelers: Vec<Traveler>,
    pub on_event: Callback<FormEvent>,
}

/// The itinerary editor: one row per segment with city pickers, the
/// date/time range driving the day count, the hardship controls, and the
/// allowance party for the segment.
#[function_component(TripList)]
pub fn trip_list(props: &TripListProps) -> Html {
    let add_trip = {
        let on_event = props.on_event.clone();
        Callback::from(move |_: MouseEvent| on_event.emit(FormEvent::AddTrip))
    };

    html! {
        <div class="trip-list">
            {if props.trips.is_empty() {
                html! {
                    <div class="trip-empty">{"暂无行程，请选择出差申请单或手动添加"}</div>
                }
            } else { html! {} }}
            {for props.trips.iter().enumerate().map(|(index, trip)| html! {
                <TripRow
                    key={trip.id.clone()}
                    index={index}
                    trip={trip.clone()}
                    travelers={props.travelers.clone()}
                    on_event={props.on_event.clone()}
                />
            })}
            <button type="button" class="trip-add" onclick={add_trip}>{"+ 增加行程段"}</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TripRowProps {
    index: usize,
    trip: Trip,
    travelers: Vec<Traveler>,
    on_event: Callback<FormEvent>,
}

fn hours() -> Vec<String> {
    (0..24).map(|h| format!("{:02}:00", h)).collect()
}

#[function_component(TripRow)]
fn trip_row(props: &TripRowProps) -> Html {
    let trip = &props.trip;
    let trip_id = trip.id.clone();

    let edit = {
        let on_event = props.on_event.clone();
        let id = trip_id.clone();
        Callback::from(move |edit: TripEdit| {
            on_event.emit(FormEvent::EditTrip {
                id: id.clone(),
                edit,
            });
        })
    };

    let text_edit = |f: fn(String) -> TripEdit| {
        let edit = edit.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit.emit(f(input.value()));
        })
    };

    let time_edit = |f: fn(String) -> TripEdit| {
        let edit = edit.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            edit.emit(f(select.value()));
        })
    };

    let on_from = {
        let edit = edit.clone();
        Callback::from(move |(city, _): (String, bool)| edit.emit(TripEdit::From(city)))
    };

    // Only the destination carries the hardship designation upward.
    let on_to = {
        let edit = edit.clone();
        Callback::from(move |(city, hardship): (String, bool)| {
            edit.emit(TripEdit::Destination {
                city,
                hardship: Some(hardship),
            })
        })
    };

    let on_days = {
        let edit = edit.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            edit.emit(TripEdit::Days(input.value().trim().parse().unwrap_or(0)));
        })
    };

    let on_hardship = {
        let edit = edit.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            edit.emit(TripEdit::Hardship(select.value() == "yes"));
        })
    };

    let on_main_traveler = {
        let edit = edit.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            edit.emit(TripEdit::MainTraveler(select.value()));
        })
    };

    let toggle_fellow = |fellow_id: String| {
        let edit = edit.clone();
        let current = trip.fellow_traveler_ids.clone();
        Callback::from(move |_: Event| {
            let mut next = current.clone();
            if let Some(pos) = next.iter().position(|id| *id == fellow_id) {
                next.remove(pos);
            } else {
                next.push(fellow_id.clone());
            }
            edit.emit(TripEdit::FellowTravelers(next));
        })
    };

    let remove = {
        let on_event = props.on_event.clone();
        let id = trip_id.clone();
        Callback::from(move |_: MouseEvent| {
            on_event.emit(FormEvent::RemoveTrip { id: id.clone() });
        })
    };

    html! {
        <div class="trip-row">
            <div class="trip-index">{format!("#{}", props.index + 1)}</div>
            <div class="trip-cities">
                <CityPicker value={trip.from.clone()} placeholder="出发城市" on_select={on_from} />
                <span class="trip-arrow">{"→"}</span>
                <CityPicker value={trip.to.clone()} placeholder="目的城市" on_select={on_to} />
            </div>
            <div class="trip-schedule">
                <div class="trip-schedule-row">
                    <span>{"开始"}</span>
                    <input type="date" value={trip.start_date.clone()}
                        onchange={text_edit(TripEdit::StartDate)} />
                    <select value={trip.start_time.clone()} onchange={time_edit(TripEdit::StartTime)}>
                        {for hours().into_iter().map(|h| html! {
                            <option value={h.clone()} selected={trip.start_time == h}>{h.clone()}</option>
                        })}
                    </select>
                </div>
                <div class="trip-schedule-row">
                    <span>{"结束"}</span>
                    <input type="date" value={trip.end_date.clone()}
                        onchange={text_edit(TripEdit::EndDate)} />
                    <select value={trip.end_time.clone()} onchange={time_edit(TripEdit::EndTime)}>
                        {for hours().into_iter().map(|h| html! {
                            <option value={h.clone()} selected={trip.end_time == h}>{h.clone()}</option>
                        })}
                    </select>
                </div>
            </div>
            <div class="trip-days">
                <input type="number" value={trip.days.to_string()} onchange={on_days} />
                <span>{"天"}</span>
            </div>
            <div class="trip-hardship">
                <span>{"艰苦地区:"}</span>
                <select value={if trip.is_hardship { "yes" } else { "no" }} onchange={on_hardship}>
                    <option value="no" selected={!trip.is_hardship}>{"否"}</option>
                    <option value="yes" selected={trip.is_hardship}>{"是"}</option>
                </select>
                <input
                    class="hardship-area"
                    placeholder="具体艰苦地区"
                    value={trip.specific_hardship_area.clone()}
                    onchange={text_edit(TripEdit::SpecificHardshipArea)}
                />
            </div>
            <div class="trip-party">
                <label>{"补贴归属"}</label>
                <select value={trip.main_traveler_id.clone()} onchange={on_main_traveler}>
                    {for props.travelers.iter().map(|t| html! {
                        <option value={t.id.clone()} selected={trip.main_traveler_id == t.id}>
                            {&t.name}
                        </option>
                    })}
                </select>
                <div class="trip-fellows">
                    {for props.travelers.iter()
                        .filter(|t| t.id != trip.main_traveler_id)
                        .map(|t| {
                            let checked = trip.fellow_traveler_ids.contains(&t.id);
                            html! {
                                <label class="fellow-check">
                                    <input type="checkbox" {checked}
                                        onchange={toggle_fellow(t.id.clone())} />
                                    {&t.name}
                                </label>
                            }
                        })}
                </div>
            </div>
            <button type="button" class="trip-remove" onclick={remove}>{"删除"}</button>
        </div>
    }
}

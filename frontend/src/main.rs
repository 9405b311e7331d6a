mod components;
mod hooks;
mod services;

use std::rc::Rc;

use yew::prelude::*;

use shared::{FormEvent, FormState, Totals};

use components::approval_flow::ApprovalFlow;
use components::basic_info_form::BasicInfoForm;
use components::expense_tables::ExpenseTables;
use components::header::Header;
use components::settlement_panel::SettlementPanel;
use components::summary_cards::SummaryCards;
use components::traveler_roster::TravelerRoster;
use components::trip_list::TripList;
use hooks::use_application_lookup::use_application_lookup;
use services::logging::Logger;

/// Reducer wrapper: all mutation funnels through `FormState::apply`.
struct AppState(FormState);

impl Reducible for AppState {
    type Action = FormEvent;

    fn reduce(self: Rc<Self>, action: FormEvent) -> Rc<Self> {
        Rc::new(AppState(self.0.apply(action)))
    }
}

#[function_component(App)]
fn app() -> Html {
    let state = use_reducer(|| AppState(FormState::seed()));

    let on_event = {
        let state = state.clone();
        Callback::from(move |event: FormEvent| state.dispatch(event))
    };

    let on_select_application = use_application_lookup(&on_event);

    let form = &state.0;
    // Derived fresh on every render; nothing is cached across events.
    let totals = Totals::derive(form);

    html! {
        <div class="page">
            <Header doc_no={form.basic_info.doc_no.clone()} />
            <main class="page-body">
                <SummaryCards totals={totals.clone()} />
                <BasicInfoForm
                    basic_info={form.basic_info.clone()}
                    syncing={form.is_syncing()}
                    on_event={on_event.clone()}
                    {on_select_application}
                />
                <section class="card travel-section">
                    <div class="card-header">{"出行人员与行程"}</div>
                    <div class="card-body">
                        <TravelerRoster
                            travelers={form.travelers.clone()}
                            on_event={on_event.clone()}
                        />
                        <TripList
                            trips={form.trips.clone()}
                            travelers={form.travelers.clone()}
                            on_event={on_event.clone()}
                        />
                    </div>
                </section>
                <ExpenseTables
                    state={form.clone()}
                    totals={totals.clone()}
                    on_event={on_event.clone()}
                />
                <SettlementPanel
                    state={form.clone()}
                    totals={totals}
                    on_event={on_event}
                />
                <ApprovalFlow />
            </main>
        </div>
    }
}

fn main() {
    Logger::info_with_component("app", "reimbursement form starting");
    yew::Renderer::<App>::new().render();
}

use gloo::timers::future::TimeoutFuture;
use shared::FormEvent;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::logging::Logger;

/// Simulated latency of the application lookup.
const LOOKUP_DELAY_MS: u32 = 600;

/// Returns a callback that kicks off the simulated application lookup.
///
/// Every invocation takes a fresh token and dispatches `LookupStarted`
/// immediately (the reducer raises its syncing flag), then dispatches
/// `LookupResolved` after the delay. The reducer drops resolutions whose
/// token has been superseded, so rapid re-selection cannot interleave.
#[hook]
pub fn use_application_lookup(on_event: &Callback<FormEvent>) -> Callback<String> {
    let next_token = use_mut_ref(|| 0u64);
    let on_event = on_event.clone();

    use_callback((), move |application_id: String, _| {
        if application_id.is_empty() {
            return;
        }
        let token = {
            let mut counter = next_token.borrow_mut();
            *counter += 1;
            *counter
        };
        Logger::info_with_component(
            "application-lookup",
            &format!("lookup {} started (token {})", application_id, token),
        );
        on_event.emit(FormEvent::LookupStarted { token });

        let on_event = on_event.clone();
        spawn_local(async move {
            TimeoutFuture::new(LOOKUP_DELAY_MS).await;
            on_event.emit(FormEvent::LookupResolved {
                token,
                application_id,
            });
        });
    })
}

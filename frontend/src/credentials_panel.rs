use crate::search::api::{fetch_credential_status, save_credentials};
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

/// Collapsible panel for the session's YouTube Data API keys. Keys are sent
/// to the backend and never shown again; only the stored count comes back.
#[function_component(CredentialsPanel)]
pub fn credentials_panel() -> Html {
    let expanded = use_state(|| false);
    let keys_blob = use_state(String::new);
    let key_count = use_state(|| None::<usize>);
    let error_message = use_state(|| None::<String>);
    let saving = use_state(|| false);
    let init_done = use_state(|| false);

    {
        let key_count = key_count.clone();
        let init_done = init_done.clone();
        use_effect(move || {
            if !*init_done {
                init_done.set(true);
                wasm_bindgen_futures::spawn_local(async move {
                    fetch_credential_status(key_count).await;
                });
            }
            || ()
        });
    }

    let on_input = {
        let keys_blob = keys_blob.clone();
        Callback::from(move |e: InputEvent| {
            let value = e.target_unchecked_into::<HtmlTextAreaElement>().value();
            keys_blob.set(value);
        })
    };

    let on_save = {
        let keys_blob = keys_blob.clone();
        let key_count = key_count.clone();
        let error_message = error_message.clone();
        let saving = saving.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default();
            saving.set(true);
            error_message.set(None);

            let blob = (*keys_blob).clone();
            let key_count = key_count.clone();
            let error_message = error_message.clone();
            let saving = saving.clone();
            wasm_bindgen_futures::spawn_local(async move {
                save_credentials(blob, key_count, error_message, saving).await;
            });
        })
    };

    let summary = match *key_count {
        Some(0) | None => "No API keys configured".to_string(),
        Some(1) => "1 API key configured".to_string(),
        Some(n) => format!("{n} API keys configured"),
    };

    html! {
        <div class="bg-gray-100 rounded-lg mb-6 overflow-hidden">
            <div class="bg-gray-200 p-3 flex justify-between items-center cursor-pointer"
                 onclick={let expanded = expanded.clone(); move |_| expanded.set(!*expanded)}>
                <span class="text-sm font-semibold text-gray-700">{ format!("🔑 {summary}") }</span>
                <span class="text-gray-600">{ if *expanded { "▼" } else { "▶" } }</span>
            </div>
            {
                if *expanded {
                    html! {
                        <form onsubmit={on_save} class="p-3">
                            <p class="text-sm text-gray-600 mb-2">
                                { "Paste one or more YouTube Data API keys, separated by \
                                   commas or new lines. They are tried in order when one \
                                   runs out of quota." }
                            </p>
                            <textarea
                                rows="3"
                                class="w-full p-2 border border-gray-300 rounded font-mono text-sm"
                                placeholder="AIzaSy..., AIzaSy..."
                                value={(*keys_blob).clone()}
                                oninput={on_input}
                                disabled={*saving}
                            />
                            {
                                if let Some(msg) = &*error_message {
                                    html! { <p class="text-red-600 text-sm mb-2">{ msg }</p> }
                                } else {
                                    html! {}
                                }
                            }
                            <button
                                type="submit"
                                class="bg-gray-700 text-white px-4 py-2 rounded text-sm hover:bg-gray-800 disabled:opacity-50"
                                disabled={*saving}
                            >
                                { if *saving { "Saving..." } else { "Save keys" } }
                            </button>
                        </form>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

use crate::credentials_panel::CredentialsPanel;
use crate::env_variable_utils::get_app_name;
use crate::models::SearchResults;
use crate::search::api::execute_search;
use crate::search::components::{ResultsList, SearchBar};
use crate::search::options::{SearchMode, SearchOptionsDropdowns, TimeWindow};
use crate::search::utils::{get_mode_param, get_query_param, get_window_param, update_url_params};
use crate::video_page::VideoDetailPage;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/video/:id")]
    Video { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <ScoutApp /> },
        Route::Video { id } => html! { <VideoDetailPage id={id} /> },
        Route::NotFound => html! {
            <div class="min-h-screen flex items-center justify-center bg-gray-700">
                <div class="bg-white p-8 rounded-lg shadow-lg text-center">
                    <h1 class="text-2xl font-bold text-gray-800 mb-4">{"404 - Page Not Found"}</h1>
                    <Link<Route> to={Route::Home} classes="text-blue-600 hover:underline">
                        {"Go back to search"}
                    </Link<Route>>
                </div>
            </div>
        },
    }
}

#[function_component(ScoutApp)]
pub fn scout_app() -> Html {
    let search_query = use_state(|| get_query_param().unwrap_or_default());
    let search_results = use_state(|| None::<SearchResults>);
    let loading = use_state(|| false);
    let error_message = use_state(Option::<String>::default);
    let init_done = use_state(|| false);
    let mode = use_state(get_mode_param);
    let window = use_state(get_window_param);

    // Helper to run a search with the current selectors; a page token extends
    // the visible list instead of replacing it.
    let execute_current_search = {
        let search_results = search_results.clone();
        let loading = loading.clone();
        let error_message = error_message.clone();
        let mode = mode.clone();
        let window = window.clone();

        move |query: String, page_token: Option<String>| {
            let search_results = search_results.clone();
            let loading = loading.clone();
            let error_message = error_message.clone();

            loading.set(true);
            error_message.set(None);

            let current_mode = *mode;
            let current_window = *window;
            update_url_params(&query, current_mode, current_window);

            wasm_bindgen_futures::spawn_local(async move {
                execute_search(
                    query,
                    current_mode,
                    current_window,
                    page_token,
                    search_results,
                    error_message,
                    loading,
                )
                .await;
            });
        }
    };

    // Re-run the query from the URL on first render.
    {
        let search_query = search_query.clone();
        let init_done = init_done.clone();
        let execute_search_fn = execute_current_search.clone();

        use_effect(move || {
            if !*init_done {
                if let Some(query) = get_query_param() {
                    search_query.set(query.clone());
                    execute_search_fn(query, None);
                }
                init_done.set(true);
            }
            || ()
        });
    }

    let on_search = {
        let search_query = search_query.clone();
        let execute_search_fn = execute_current_search.clone();

        Callback::from(move |query: String| {
            search_query.set(query.clone());
            execute_search_fn(query, None);
        })
    };

    let on_load_more = {
        let search_query = search_query.clone();
        let execute_search_fn = execute_current_search.clone();

        Callback::from(move |page_token: String| {
            let query = (*search_query).clone();
            execute_search_fn(query, Some(page_token));
        })
    };

    // Selector changes only update state; the next submit picks them up.
    let on_mode_change = {
        let mode = mode.clone();
        Callback::from(move |new_mode: SearchMode| {
            mode.set(new_mode);
        })
    };

    let on_window_change = {
        let window = window.clone();
        Callback::from(move |new_window: TimeWindow| {
            window.set(new_window);
        })
    };

    html! {
        <div class="min-h-screen flex flex-col items-center bg-gray-700 p-4">
            <div class="bg-white p-8 rounded-lg shadow-lg w-full max-w-3xl">
                <h1 class="text-3xl font-bold text-center text-gray-800 mb-2">
                    { get_app_name() }
                </h1>
                <p class="text-center text-gray-500 text-sm mb-6">
                    { "Find Shorts and channels that are blowing up right now" }
                </p>

                <CredentialsPanel />

                <SearchBar
                    query={(*search_query).clone()}
                    loading={*loading}
                    on_search={on_search}
                />

                <SearchOptionsDropdowns
                    mode={*mode}
                    window={*window}
                    on_mode_change={on_mode_change}
                    on_window_change={on_window_change}
                />

                {
                    if let Some(msg) = &*error_message {
                        html! {
                            <p class="text-red-600 text-center mb-4">{ format!("Error: {msg}") }</p>
                        }
                    } else {
                        html! {}
                    }
                }

                <ResultsList
                    results={(*search_results).clone()}
                    loading={*loading}
                    error={(*error_message).clone()}
                    query={(*search_query).clone()}
                    on_load_more={on_load_more}
                />
            </div>
        </div>
    }
}

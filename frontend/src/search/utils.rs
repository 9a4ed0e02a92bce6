use crate::search::options::{SearchMode, TimeWindow};

pub fn get_query_param() -> Option<String> {
    let href = web_sys::window()?.location().href().ok()?;
    let url = web_sys::Url::new(&href).ok()?;
    url.search_params().get("q").filter(|q| !q.is_empty())
}

pub fn get_mode_param() -> SearchMode {
    param("mode")
        .map(|value| SearchMode::from_key(&value))
        .unwrap_or(SearchMode::Videos)
}

pub fn get_window_param() -> TimeWindow {
    param("t")
        .map(|value| TimeWindow::from_key(&value))
        .unwrap_or(TimeWindow::ThreeDays)
}

fn param(key: &str) -> Option<String> {
    let href = web_sys::window()?.location().href().ok()?;
    let url = web_sys::Url::new(&href).ok()?;
    url.search_params().get(key)
}

/// Mirrors the current search into the address bar without reloading.
pub fn update_url_params(query: &str, mode: SearchMode, window: TimeWindow) {
    if let Some(win) = web_sys::window() {
        let location = win.location();
        let Ok(href) = location.href() else { return };
        let Ok(url) = web_sys::Url::new(&href) else { return };

        let search_params = url.search_params();
        search_params.set("q", query);
        search_params.set("mode", mode.key());
        search_params.set("t", window.key());

        if let Ok(history) = win.history() {
            let _ = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url.href()));
        }
    }
}

use js_sys::Reflect;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;
use web_sys::Event;
use yew::{function_component, html, Callback, Html, Properties};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SearchMode {
    Videos,
    Channels,
}

impl SearchMode {
    pub fn key(&self) -> &'static str {
        match self {
            SearchMode::Videos => "videos",
            SearchMode::Channels => "channels",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SearchMode::Videos => "Viral videos",
            SearchMode::Channels => "Channel scouting",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "channels" => SearchMode::Channels,
            _ => SearchMode::Videos,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimeWindow {
    Day,
    ThreeDays,
    Week,
    Month,
    All,
}

impl TimeWindow {
    pub fn key(&self) -> &'static str {
        match self {
            TimeWindow::Day => "24h",
            TimeWindow::ThreeDays => "72h",
            TimeWindow::Week => "7d",
            TimeWindow::Month => "30d",
            TimeWindow::All => "all",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TimeWindow::Day => "Last 24 hours",
            TimeWindow::ThreeDays => "Last 3 days",
            TimeWindow::Week => "Last 7 days",
            TimeWindow::Month => "Last 30 days",
            TimeWindow::All => "Any time",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "24h" => TimeWindow::Day,
            "72h" => TimeWindow::ThreeDays,
            "7d" => TimeWindow::Week,
            "30d" => TimeWindow::Month,
            _ => TimeWindow::All,
        }
    }

    pub fn all_variants() -> Vec<Self> {
        vec![
            TimeWindow::Day,
            TimeWindow::ThreeDays,
            TimeWindow::Week,
            TimeWindow::Month,
            TimeWindow::All,
        ]
    }
}

// Helper to read "value" from any event target without HtmlSelectElement.
fn event_value(e: &Event) -> Option<String> {
    let target = e.target()?;
    let js_value = Reflect::get(target.as_ref(), &JsValue::from_str("value")).ok()?;
    js_value.as_string()
}

#[derive(Properties, PartialEq)]
pub struct SearchOptionsProps {
    pub mode: SearchMode,
    pub window: TimeWindow,
    pub on_mode_change: Callback<SearchMode>,
    pub on_window_change: Callback<TimeWindow>,
}

#[function_component(SearchOptionsDropdowns)]
pub fn search_options(props: &SearchOptionsProps) -> Html {
    let on_mode_change_cb = props.on_mode_change.clone();
    let on_mode_change = Callback::from(move |e: Event| {
        if let Some(value) = event_value(&e) {
            on_mode_change_cb.emit(SearchMode::from_key(&value));
        }
    });

    let on_window_change_cb = props.on_window_change.clone();
    let on_window_change = Callback::from(move |e: Event| {
        if let Some(value) = event_value(&e) {
            on_window_change_cb.emit(TimeWindow::from_key(&value));
        }
    });

    // The recency window only applies to video mode; channel scouting always
    // looks at the last 30 days server-side.
    let window_disabled = props.mode == SearchMode::Channels;

    html! {
        <div class="flex items-center justify-center gap-4 mb-4">
            <label class="text-sm text-gray-700">
                { "Mode " }
                <select value={props.mode.key()} onchange={on_mode_change}
                        class="ml-1 p-2 border border-gray-300 rounded">
                    <option value="videos" selected={props.mode == SearchMode::Videos}>
                        { SearchMode::Videos.display_name() }
                    </option>
                    <option value="channels" selected={props.mode == SearchMode::Channels}>
                        { SearchMode::Channels.display_name() }
                    </option>
                </select>
            </label>

            <label class="text-sm text-gray-700">
                { "Posted " }
                <select value={props.window.key()} onchange={on_window_change}
                        disabled={window_disabled}
                        class="ml-1 p-2 border border-gray-300 rounded disabled:opacity-50">
                    {
                        for TimeWindow::all_variants().into_iter().map(|window| {
                            html! {
                                <option value={window.key()} selected={window == props.window}>
                                    { window.display_name() }
                                </option>
                            }
                        })
                    }
                </select>
            </label>
        </div>
    }
}

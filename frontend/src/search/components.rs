use crate::models::{ChannelRecord, SearchResults, VideoRecord};
use crate::router::Route;
use crate::utils::{format_count, format_hours};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SearchBarProps {
    pub query: String,
    pub loading: bool,
    pub on_search: Callback<String>,
}

#[function_component(SearchBar)]
pub fn search_bar(props: &SearchBarProps) -> Html {
    let current_input = use_state(|| props.query.clone());

    let on_input = {
        let current_input = current_input.clone();
        Callback::from(move |e: InputEvent| {
            let input_value = e.target_unchecked_into::<HtmlInputElement>().value();
            current_input.set(input_value);
        })
    };

    let on_submit = {
        let on_search = props.on_search.clone();
        let current_input = current_input.clone();
        Callback::from(move |e: web_sys::SubmitEvent| {
            e.prevent_default(); // Prevent default form submission (page reload)
            on_search.emit((*current_input).clone());
        })
    };

    html! {
        <form onsubmit={on_submit} class="flex mb-4">
            <input
                type="text"
                class="flex-grow p-3 border border-gray-300 rounded-l-lg focus:outline-none focus:ring-2 focus:ring-red-500"
                placeholder="Topic to scout, e.g. \"home workout\"..."
                value={(*current_input).clone()}
                oninput={on_input}
                disabled={props.loading}
            />
            <button
                type="submit"
                class="bg-red-600 text-white p-3 rounded-r-lg hover:bg-red-700 focus:outline-none focus:ring-2 focus:ring-red-500 disabled:opacity-50"
                disabled={props.loading}
            >
                { if props.loading { "Scouting..." } else { "Scout" } }
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct VideoCardProps {
    pub video: VideoRecord,
}

#[function_component(VideoCard)]
pub fn video_card(props: &VideoCardProps) -> Html {
    let video = &props.video;

    html! {
        <div class="bg-white rounded-lg shadow overflow-hidden">
            <a href={format!("https://www.youtube.com/watch?v={}", video.video_id)} target="_blank">
                <img src={video.thumbnail.clone()} alt={video.title.clone()} class="w-full" />
            </a>
            <div class="p-3">
                <a href={format!("https://www.youtube.com/watch?v={}", video.video_id)}
                   target="_blank"
                   class="font-semibold text-gray-800 hover:underline">
                    { &video.title }
                </a>
                <p class="text-sm text-gray-500 mt-1">
                    <a href={format!("https://www.youtube.com/channel/{}", video.channel_id)}
                       target="_blank"
                       class="hover:underline">
                        { &video.channel_name }
                    </a>
                </p>
                <div class="flex flex-wrap gap-3 text-sm text-gray-600 mt-2">
                    <span>{ format!("👁️ {}", format_count(video.views)) }</span>
                    <span class="text-red-600 font-semibold">
                        { format!("🔥 {}/h", format_count(video.views_per_hour)) }
                    </span>
                    <span>{ format!("⏳ {}", format_hours(video.hours_live)) }</span>
                </div>
                <Link<Route> to={Route::Video { id: video.video_id.clone() }}
                             classes="text-sm text-blue-600 hover:underline">
                    { "Inspect" }
                </Link<Route>>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ChannelCardProps {
    pub channel: ChannelRecord,
}

#[function_component(ChannelCard)]
pub fn channel_card(props: &ChannelCardProps) -> Html {
    let channel = &props.channel;

    html! {
        <div class="bg-white rounded-lg shadow p-4 flex gap-4">
            <img src={channel.thumbnail.clone()} alt={channel.title.clone()}
                 class="w-16 h-16 rounded-full" />
            <div class="flex-grow">
                <a href={format!("https://www.youtube.com/channel/{}", channel.channel_id)}
                   target="_blank"
                   class="font-semibold text-gray-800 hover:underline">
                    { &channel.title }
                </a>
                <div class="flex flex-wrap gap-3 text-sm text-gray-600 mt-1">
                    <span>{ format!("👥 {} subs", format_count(channel.subscribers)) }</span>
                    <span>{ format!("👁️ {} total", format_count(channel.total_views)) }</span>
                    <span>{ format!("🎬 {} videos", format_count(channel.video_count)) }</span>
                </div>
                <p class="text-sm text-gray-500 mt-2">
                    { "Best recent Short: " }
                    <a href={format!("https://www.youtube.com/watch?v={}", channel.top_video.video_id)}
                       target="_blank"
                       class="text-blue-600 hover:underline">
                        { &channel.top_video.title }
                    </a>
                    { format!(" ({} views)", format_count(channel.top_video.views)) }
                </p>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultsListProps {
    pub results: Option<SearchResults>,
    pub loading: bool,
    pub error: Option<String>,
    pub query: String,
    pub on_load_more: Callback<String>,
}

#[function_component(ResultsList)]
pub fn results_list(props: &ResultsListProps) -> Html {
    let Some(results) = &props.results else {
        return html! {};
    };

    let is_empty = match results {
        SearchResults::Videos { videos, .. } => videos.is_empty(),
        SearchResults::Channels { channels } => channels.is_empty(),
    };
    if is_empty && !props.loading && props.error.is_none() && !props.query.is_empty() {
        return html! {
            <p class="text-center text-gray-500">
                { "No results found. Try a longer time window or a broader topic." }
            </p>
        };
    }

    match results {
        SearchResults::Videos {
            videos,
            next_page_token,
        } => {
            let load_more = next_page_token.clone().map(|token| {
                let on_load_more = props.on_load_more.clone();
                html! {
                    <div class="mt-6 flex justify-center">
                        <button
                            onclick={move |_| on_load_more.emit(token.clone())}
                            disabled={props.loading}
                            class="px-4 py-2 text-sm bg-red-600 text-white rounded hover:bg-red-700 disabled:opacity-50"
                        >
                            { "Load more" }
                        </button>
                    </div>
                }
            });

            html! {
                <div class="mt-8">
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        { for videos.iter().map(|video| html! {
                            <VideoCard video={video.clone()} />
                        })}
                    </div>
                    { load_more.unwrap_or_default() }
                </div>
            }
        }
        SearchResults::Channels { channels } => html! {
            <div class="mt-8 space-y-4">
                { for channels.iter().map(|channel| html! {
                    <ChannelCard channel={channel.clone()} />
                })}
            </div>
        },
    }
}

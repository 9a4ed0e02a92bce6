use crate::models::VideoDetail;
use crate::router::Route;
use crate::search::api::fetch_video_detail;
use crate::search::components::VideoCard;
use crate::utils::{format_count, format_hours, format_iso8601_date, format_number};
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct VideoDetailPageProps {
    pub id: String,
}

#[function_component(VideoDetailPage)]
pub fn video_detail_page(props: &VideoDetailPageProps) -> Html {
    let detail = use_state(|| None::<VideoDetail>);
    let error_message = use_state(|| None::<String>);
    let loading = use_state(|| true);

    {
        let video_id = props.id.clone();
        let detail = detail.clone();
        let error_message = error_message.clone();
        let loading = loading.clone();
        let prev_video_id = use_state(String::new);

        use_effect(move || {
            if *prev_video_id != video_id {
                prev_video_id.set(video_id.clone());
                loading.set(true);
                error_message.set(None);

                wasm_bindgen_futures::spawn_local(async move {
                    fetch_video_detail(video_id, detail, error_message, loading).await;
                });
            }
            || ()
        });
    }

    html! {
        <div class="min-h-screen bg-gray-700 p-4">
            <div class="bg-white p-8 rounded-lg shadow-lg w-full max-w-3xl mx-auto">
                <Link<Route> to={Route::Home} classes="text-blue-600 hover:underline text-sm">
                    { "← Back to search" }
                </Link<Route>>

                {
                    if let Some(msg) = &*error_message {
                        html! { <p class="text-red-600 text-center my-4">{ format!("Error: {msg}") }</p> }
                    } else {
                        html! {}
                    }
                }
                {
                    if *loading {
                        html! { <p class="text-center text-gray-500 my-4">{ "Loading..." }</p> }
                    } else {
                        html! {}
                    }
                }

                {
                    if let Some(detail) = &*detail {
                        let video = &detail.video;
                        html! {
                            <div class="mt-4">
                                <a href={format!("https://www.youtube.com/watch?v={}", video.video_id)} target="_blank">
                                    <img src={video.thumbnail.clone()} alt={video.title.clone()} class="w-full rounded" />
                                </a>
                                <h1 class="text-2xl font-bold text-gray-800 mt-4">{ &video.title }</h1>
                                <p class="text-gray-500 mt-1">
                                    <a href={format!("https://www.youtube.com/channel/{}", video.channel_id)}
                                       target="_blank"
                                       class="hover:underline">
                                        { &video.channel_name }
                                    </a>
                                    { format!(" · published {}", format_iso8601_date(&video.published_at)) }
                                </p>
                                <div class="flex flex-wrap gap-4 text-gray-700 mt-4">
                                    <span>{ format!("👁️ {} views", format_number(video.views)) }</span>
                                    <span>{ format!("👍 {} likes", format_number(detail.likes)) }</span>
                                    <span class="text-red-600 font-semibold">
                                        { format!("🔥 {} views/h", format_count(video.views_per_hour)) }
                                    </span>
                                    <span>{ format!("⏳ live for {}", format_hours(video.hours_live)) }</span>
                                </div>
                                {
                                    if !detail.tags.is_empty() {
                                        html! {
                                            <div class="flex flex-wrap gap-2 mt-4">
                                                { for detail.tags.iter().map(|tag| html! {
                                                    <span class="bg-gray-200 text-gray-700 text-xs px-2 py-1 rounded">
                                                        { format!("#{tag}") }
                                                    </span>
                                                })}
                                            </div>
                                        }
                                    } else {
                                        html! {}
                                    }
                                }
                                {
                                    if !detail.recent_uploads.is_empty() {
                                        html! {
                                            <div class="mt-8">
                                                <h2 class="text-lg font-semibold text-gray-800 mb-4">
                                                    { "Latest Shorts from this channel" }
                                                </h2>
                                                <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                                                    { for detail.recent_uploads.iter().map(|upload| html! {
                                                        <VideoCard video={upload.clone()} />
                                                    })}
                                                </div>
                                            </div>
                                        }
                                    } else {
                                        html! {}
                                    }
                                }
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}

pub mod channel_search;
pub mod credential_store;
pub mod rotation;
pub mod video_search;
pub mod youtube;

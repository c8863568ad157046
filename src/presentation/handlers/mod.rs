mod activity_types;
mod continue_text;
mod create_activity;
mod create_question;
mod create_room;
mod create_room_from_audio;
mod delete_activity;
mod delete_room;
mod generate_summary;
mod get_activities;
mod get_activity;
mod get_audio_chunks;
mod get_questions;
mod get_room;
mod get_rooms;
mod health;
mod submit_activity;
mod update_room;
mod upload_audio;

pub use continue_text::continue_text_handler;
pub use create_activity::create_activity_handler;
pub use create_question::create_question_handler;
pub use create_room::create_room_handler;
pub use create_room_from_audio::create_room_from_audio_handler;
pub use delete_activity::delete_activity_handler;
pub use delete_room::delete_room_handler;
pub use generate_summary::generate_summary_handler;
pub use get_activities::get_activities_handler;
pub use get_activity::get_activity_handler;
pub use get_audio_chunks::get_audio_chunks_handler;
pub use get_questions::get_questions_handler;
pub use get_room::get_room_handler;
pub use get_rooms::get_rooms_handler;
pub use health::health_handler;
pub use submit_activity::submit_activity_handler;
pub use update_room::update_room_handler;
pub use upload_audio::upload_audio_handler;

use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

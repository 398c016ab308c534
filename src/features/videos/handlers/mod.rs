pub mod video_handler;

pub use video_handler::{
    create_video, delete_video, edit_video_page, list_videos, new_video_page, show_video,
    update_video,
};

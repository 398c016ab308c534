mod video;

pub use video::{Video, VideoProjectRef};

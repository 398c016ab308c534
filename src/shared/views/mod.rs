mod engine;

pub use engine::page;

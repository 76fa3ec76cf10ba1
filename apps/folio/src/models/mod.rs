pub mod content;
pub mod resume;

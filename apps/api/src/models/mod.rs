pub mod analytics;
pub mod profile;
pub mod resume;

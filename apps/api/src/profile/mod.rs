pub mod completeness;
pub mod dates;
pub mod handlers;
pub mod sections;

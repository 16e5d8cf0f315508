pub mod ats;
pub mod cover_letter;
pub mod generator;
pub mod handlers;
pub mod prompts;

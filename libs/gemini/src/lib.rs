pub mod models;

pub use models::{generate_content::GenerateContent, Models};

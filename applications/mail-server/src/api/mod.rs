/// API route modules
pub mod health;
pub mod oauth;
pub mod summarize;

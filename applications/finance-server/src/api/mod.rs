/// API route modules
pub mod academic_years;
pub mod auth;
pub mod health;
pub mod students;
pub mod transactions;
pub mod users;

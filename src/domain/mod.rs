pub mod filters;
pub mod models;
pub mod rank;
pub mod score;

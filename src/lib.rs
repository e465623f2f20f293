pub mod app;
pub mod domain;
pub mod storage;

pub use domain::models::{Candidate, Rankable};
pub use domain::rank::{rank, rank_scored, Ranked};
pub use domain::score::score;

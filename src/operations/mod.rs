pub mod crossings;
pub mod export;
pub mod query;

pub mod query;
pub mod reservation;

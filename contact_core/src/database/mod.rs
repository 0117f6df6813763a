pub mod connection;
pub mod repository;

pub use connection::get_database_pool;
pub use repository::{ContactRepository, DATABASE_NOT_CONFIGURED};

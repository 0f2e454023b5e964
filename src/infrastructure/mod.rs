// Infrastructure layer module
// Contains database adapters and storage implementations

pub mod database;
pub mod query;
pub mod repositories;
pub mod seed;
pub mod unit_of_work;

//! PostgreSQL persistence adapters built on Diesel and bb8.

mod diesel_project_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod roster_slots;
mod schema;

pub use diesel_project_repository::DieselProjectRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

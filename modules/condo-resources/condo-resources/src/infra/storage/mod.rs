pub mod entity;
mod mapper;
mod memory;
pub mod migrations;
mod sea_orm_repo;

pub use memory::InMemoryStore;
pub use sea_orm_repo::SeaOrmStore;

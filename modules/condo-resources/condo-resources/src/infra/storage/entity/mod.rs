pub mod resource;
pub mod unit;

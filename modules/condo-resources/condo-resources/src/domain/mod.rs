pub mod error;
pub mod events;
pub mod insights;
pub mod list_coordinator;
pub mod local_client;
pub mod navigation;
pub mod ports;
pub mod registry;
pub mod repo;
pub mod resync;
pub mod scope;
pub mod service;
pub mod single_flight;

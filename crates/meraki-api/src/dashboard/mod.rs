pub mod client;
pub mod devices;
pub mod models;
pub mod networks;
pub mod organizations;

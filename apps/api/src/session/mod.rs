pub mod handlers;
pub mod navigation;
pub mod store;

pub mod handlers;
#[cfg(test)]
pub mod in_memory;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;

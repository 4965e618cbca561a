pub mod error;
pub mod query;
pub mod repo;
pub mod schema;
pub mod seed;
pub mod service;

#[cfg(test)]
mod service_test;

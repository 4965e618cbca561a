//! HTTP surface of the profile directory.
//!
//! Bodies are decoded as raw JSON and validated by
//! [`crate::domain::schema`] so that every violated field is reported at once.
//! Failures are rendered as RFC 9457 problem documents.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod problem;
pub mod response;
pub mod routes;

#[cfg(test)]
mod tests;

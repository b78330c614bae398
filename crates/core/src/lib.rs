//! Core library for the Gala seating console
//!
//! This crate contains the client-side business logic, including:
//! - Person, table and booking models
//! - Table availability and text filtering
//! - The booking confirmation flow
//! - Session storage
//! - Reservation and table administration

pub mod admin;
pub mod api;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod error;
pub mod model;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

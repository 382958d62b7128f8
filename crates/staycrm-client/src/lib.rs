//! Entity fetch layer for the StayCRM backend
//!
//! Reads leads, call logs, bookings, users and dashboard totals from the CRM
//! REST API. Any failed read is answered from a built-in mock dataset, and the
//! result says which of the two it came from.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs
)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod client;
pub mod error;
pub mod http;
pub mod mock;
pub mod source;
pub mod token;

pub use client::{CrmClient, Snapshot};
pub use error::{ClientError, ClientResult};
pub use http::HttpSource;
pub use mock::MockSource;
pub use source::{DataOrigin, EntitySource, Fetched, Resource};
pub use token::TokenStore;

#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for safely
//!
//! Every request goes through [`NetClient`], which prefixes the API path,
//! signs it and rejects any status other than 200. Nothing here retries.

mod api;
mod client;
mod part;

pub use client::{NetClient, NetConfig};
pub use part::{PartBody, PartRequest};

//! A small cluster API whose support code comes from `kindgen`.
//!
//! [`api`] holds the kinds together with their generated deep-copy, hash,
//! encode and helper impls; [`client::Client`] talks to a server exposing
//! them over REST.

pub mod api;
pub mod client;

pub use client::Client;

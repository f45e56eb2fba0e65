//! Typed client generated from the registries in [`crate::api`].
#![allow(clippy::pedantic, clippy::nursery)]

include!(concat!(env!("OUT_DIR"), "/zz_generated.client.rs"));

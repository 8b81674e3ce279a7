#![doc = "The `goaltrack` library crate."]
#![doc = ""]
#![doc = "This crate contains all the core business logic for the GoalTrack application:"]
#![doc = "credential handling, token issuance and validation, per-request identity"]
#![doc = "resolution, ownership-scoped resource access, domain models, routing"]
#![doc = "configuration, and error handling. It is used by the main binary (`main.rs`)"]
#![doc = "to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod ownership;
pub mod routes;

#![doc = "The `todoserve` library crate."]
#![doc = ""]
#![doc = "This crate contains the business logic, domain models, authentication and"]
#![doc = "session machinery, routing configuration, and error handling for the"]
#![doc = "todoserve application. It is used by the main binary (`main.rs`) to"]
#![doc = "construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

//! Backend for the house-construction configurator: plot/house selection,
//! pricing calculation, booking, and project dashboard data.
//!
//! The pricing engine ([`pricing`]) and progress derivation ([`progress`])
//! are pure functions; everything else is boundary plumbing around them.

pub mod api;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod pricing;
pub mod progress;
pub mod routes;
pub mod services;
pub mod storage;

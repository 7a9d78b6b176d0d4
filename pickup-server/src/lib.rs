//! Pickup-point ride planner server.
//!
//! A web service that answers: "Where nearby should I walk to so that a
//! car can pick me up, and what will each option cost?"

pub mod cache;
pub mod domain;
pub mod geo;
pub mod ors;
pub mod overpass;
pub mod pipeline;
pub mod pricing;
pub mod tomtom;
pub mod web;

//! # API Module
//!
//! Contains HTTP API implementation for the job queue service.
//!
//! ## Structure
//!
//! * `controllers` - Request handling and job submission
//! * `routes` - API endpoint definitions and routing

pub mod controllers;

pub mod routes;

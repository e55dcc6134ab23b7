//! Menu Bot - Conversational food-ordering frontend
//!
//! This crate implements the step-driven chat dialogue that onboards a
//! customer (language, phone), captures a geofenced delivery address and
//! hands off to the web menu.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

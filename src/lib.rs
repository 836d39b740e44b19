//! Marketplace - Request-outcome and domain-mutation core
//!
//! This crate implements the ownership-checked operations of an e-commerce
//! marketplace backend (products, vendors, addresses, credentials) behind a
//! uniform success/failure envelope.

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

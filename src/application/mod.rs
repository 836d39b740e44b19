//! Application layer - Handlers and request dispatch.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Each operation has one handler; `MarketplaceCore` routes tagged requests
//! to them.

pub mod dispatch;
pub mod handlers;

pub use dispatch::{CorePorts, MarketplaceCore, MarketplaceRequest, Response};

//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that applications call
//! - **Outbound (Driven)**: Capabilities the engine is constructed with

pub mod inbound;
pub mod outbound;

//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `explanation/`: OpenAI-compatible explanation provider
//!   - `marketdata/`: Option chain sources (JSON snapshots, in-memory)
//!
//! - **Wiring**
//!   - `config/`: Dependency injection container

pub mod config;
pub mod explanation;
pub mod marketdata;

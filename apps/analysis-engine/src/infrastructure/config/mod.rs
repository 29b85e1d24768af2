//! Application wiring.

mod container;

pub use container::{Container, ProductionContainer, build_pipeline};

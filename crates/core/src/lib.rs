//! Domain logic for the Corkboard board service.
//!
//! Pure, I/O-free building blocks shared by the persistence and API crates:
//! the sparse-position allocator, board roles and capability predicates,
//! input normalization, and the service error taxonomy.

pub mod cards;
pub mod columns;
pub mod error;
pub mod position;
pub mod roles;
pub mod types;

//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the requests that touch that entity
//! - Read-model rows for queries that join in derived fields (counts, role)
//!
//! Serialized shapes use camelCase field names, matching the wire contract.

pub mod board;
pub mod board_member;
pub mod card;
pub mod column;
pub mod user;

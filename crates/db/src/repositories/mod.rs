//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-row invariants (board
//! bootstrap, duplication, reorders, moves) run inside a single transaction
//! so partial writes are never observable.

pub mod board_member_repo;
pub mod board_repo;
pub mod card_repo;
pub mod column_repo;
pub mod user_repo;

pub use board_member_repo::BoardMemberRepo;
pub use board_repo::BoardRepo;
pub use card_repo::CardRepo;
pub use column_repo::ColumnRepo;
pub use user_repo::UserRepo;

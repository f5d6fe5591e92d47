//! Domain primitives shared by the database and API crates.
//!
//! Nothing in here touches the database or network: token generation,
//! hashing, validation rules and authorization predicates are plain
//! functions over plain data.

pub mod authorization;
pub mod error;
pub mod hashing;
pub mod tokens;
pub mod types;
pub mod workout;

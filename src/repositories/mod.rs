//! Repository layer for database operations.
//!
//! Repositories are stateless structs whose functions take any
//! `ConnectionTrait`, so the same call works on a pooled connection or inside
//! a transaction.
//!
//! * [`MemberJpaRepository`] issues fixed SQL strings with bound parameters.
//! * [`MemberRepository`] and [`TeamRepository`] build their queries with the
//!   SeaORM query builder.

pub mod member;
pub mod member_jpa;
pub mod team;

pub use member::MemberRepository;
pub use member_jpa::MemberJpaRepository;
pub use team::TeamRepository;

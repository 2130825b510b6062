//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`:
//! SeaORM repositories over Postgres, JWT + Argon2 authentication, and the
//! filesystem media store for uploaded thumbnails and avatars.

pub mod auth;
pub mod database;
pub mod media;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{PostgresPostRepository, PostgresUserRepository};
pub use media::FsMediaStore;

//! Typed views of libraries.io responses.
//!
//! Every facade returns raw JSON; these types are for callers (and the CLI)
//! that want to decode it with [`crate::Response::decode`].

mod platform;
mod project;
mod repository;
mod subscription;
mod user;

pub use platform::*;
pub use project::*;
pub use repository::*;
pub use subscription::*;
pub use user::*;

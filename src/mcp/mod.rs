//! MCP (Model Context Protocol) server and tool types.
//!
//! This module provides an MCP server for libraries.io, allowing AI
//! assistants to search packages, repositories and users and to manage
//! release subscriptions.
//!
//! # Example
//!
//! ```no_run
//! use librariesio::mcp::LibrariesServer;
//!
//! # fn main() -> librariesio::Result<()> {
//! let server = LibrariesServer::from_env()?;
//! // Server can now be used with rmcp transport
//! # Ok(())
//! # }
//! ```

mod params;
mod server;

pub use params::*;
pub use server::LibrariesServer;

//! # CLI Module
//!
//! This module provides the command-line interface layer for Wallify. It
//! implements all user-facing commands and coordinates between the HTTP
//! server, the client-side data layer, and user interaction.
//!
//! ## Commands
//!
//! ### Server
//!
//! - [`serve`] - Runs the Wallify API server (OAuth flow plus top-content
//!   routes) until interrupted.
//!
//! ### Authentication
//!
//! - [`login`] - Opens the server's `/login` route in the browser to start
//!   the OAuth flow; the redirect hands the user their session key.
//!
//! ### Content
//!
//! - [`top`] - Fetches and tabulates the user's top artists or tracks
//!   through the cached data layer.
//! - [`grid`] - Validates a grid configuration, resolves the items that
//!   would fill it, and prints the selection.
//!
//! ## Architecture Design
//!
//! The CLI commands are thin: they translate flags into typed
//! configuration, delegate to [`crate::management`] for data access, and
//! present results with tables and progress spinners. All network access
//! goes through the Wallify server, exactly like the browser front-end.

mod grid;
mod login;
mod serve;
mod top;

pub use grid::grid;
pub use login::login;
pub use serve::serve;
pub use top::top;

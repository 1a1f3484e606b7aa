//! HTTP rendering shell.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing, timeout)
//!     → resolve path against the Resolver
//!     → load view chain through the ViewCache
//!     → response.rs (compose layout + views, fallback, retry page)
//!     → pages.rs (askama documents)
//!     → Send to client
//! ```

pub mod pages;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};

//! Component and icon registration.
//!
//! # Data Flow
//! ```text
//! Bootstrap
//!     → components.rs (UI widget library installed)
//!     → icons.rs (every exported icon registered by name)
//!     → ComponentRegistry (frozen behind Arc)
//!     → shell renders menus, breadcrumbs, alerts, icons by name
//! ```
//!
//! # Design Decisions
//! - Registration iterates explicit static mappings, no discovery
//! - Icons are ordinary components, so route metadata names them directly
//! - The registry is mutable only during bootstrap

pub mod components;
pub mod icons;

pub use components::{Component, ComponentRegistry, Props};
pub use icons::register_icons;

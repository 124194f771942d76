//! Domain layer containing business entities and repository contracts.
//!
//! This module defines the core data model of the shortener and the storage
//! interface the application layer depends on. It has no knowledge of HTTP or
//! of any concrete database.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod repositories;

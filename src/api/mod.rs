//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into [`LinkService`](crate::application::services::LinkService)
//! calls and formats responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and request tracing middleware
//! - [`reserved`] - Codes that collide with the service's own routes
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod reserved;
pub mod routes;

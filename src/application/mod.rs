//! Application layer orchestrating the engine's two operations.
//!
//! This module defines the `PriceService` façade which validates update
//! requests, routes them to the scoped stores, and resolves lookups through
//! the domain precedence rules.

pub mod service;
pub mod validator;

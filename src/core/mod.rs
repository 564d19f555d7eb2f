//! Core domain models for blueprints
//!
//! This module defines the fundamental data structures that represent
//! blueprint scopes, scope configs, compiled plans and canonical domain
//! scopes.

pub mod config;
pub mod didgen;
pub mod error;
pub mod plan;
pub mod scope;

pub use didgen::*;
pub use error::*;
pub use plan::*;
pub use scope::*;

//! Read-side use-case services over store collections.
//!
//! # Responsibility
//! - Derive dashboard projections without touching store state.

pub mod stats_service;

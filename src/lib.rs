//! # Routiney
//!
//! Classroom slot allocation engine for an academic term.
//!
//! This crate assigns recurring time slots to (room, teacher, student group)
//! triples and guarantees that within one academic year no room, teacher, or
//! group is double-booked. The conflict check and the commit present as a
//! single atomic transition: the repository enforces slot uniqueness inside
//! its write path, so concurrent writers racing for the same slot are
//! decided by storage, not by the read-path scan.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: domain types and academic year resolution
//! - [`auth`]: explicit actor identity and role-based authorization
//! - [`db`]: repository traits and the in-memory local backend
//! - [`services`]: scheduling orchestration and conflict scanning
//! - [`http`]: axum-based REST API surface
//! - [`config`]: TOML + environment configuration

pub mod auth;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

//! # gatehub-entity
//!
//! Domain entity models for GateHub. Every struct in this crate represents
//! a database table row or a domain value object. Database entities derive
//! `sqlx::FromRow`.

pub mod approval;
pub mod gate_log;
pub mod profile;

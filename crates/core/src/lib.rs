//! Core business logic for Punktwerk.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `balance` - Balance-change validation and the deposit-to-points formula
//! - `achievements` - Static achievement rule set and its evaluation
//! - `auth` - Password hashing

pub mod achievements;
pub mod auth;
pub mod balance;

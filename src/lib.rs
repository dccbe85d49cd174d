//! Payroll simulation engine for university pay scales
//!
//! This crate models a university payroll: a catalog of positions with
//! rank-indexed pay scales, a roster of full-time and part-time employees,
//! a simulated clock that drives monthly pay cycles, statutory deductions,
//! part-time hour claims and a promotion workflow. An HTTP API exposes the
//! engine to operators.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod persistence;
pub mod presentation;

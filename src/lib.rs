//! Growth Insight Engine - KPI scoring, benchmarking and insight generation
//!
//! This crate turns a startup's diagnostic answers into a deterministic
//! growth report: normalized KPI scores, weighted axis scores, peer
//! comparisons, derived financial metrics, risk alerts, an action plan
//! and an executive digest.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;

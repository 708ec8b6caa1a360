//! QuoteCyber Lead Capture & Qualification API Library
//!
//! Core functionality for the cyber-insurance lead funnel: the deterministic
//! scoring/estimation/routing pipeline, persistence, and the external
//! integrations (AI risk scoring, Close CRM, notifications).
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `crm`: Close CRM sync client.
//! - `db`: Database connection and pool management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and the submission orchestrator.
//! - `models`: Core data models.
//! - `notifications`: Email/SMS notification formatting and dispatch.
//! - `premium`: Premium range estimation.
//! - `risk`: Rule-based fallback risk model.
//! - `risk_client`: AI risk scoring client.
//! - `routing`: Territory-based lead routing.
//! - `scoring`: Lead qualification scoring.
//! - `storage`: Lead persistence operations.

pub mod config;
pub mod crm;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod notifications;
pub mod premium;
pub mod risk;
pub mod risk_client;
pub mod routing;
pub mod scoring;
pub mod storage;

//! Companion Safety - Crisis detection and auto-moderation decision core
//!
//! This crate decides whether a chat message indicates elevated crisis risk
//! and whether a message or a user's recent message pattern warrants a
//! moderation action. Platform delivery, the content classifier, storage and
//! notification transport are reached through ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

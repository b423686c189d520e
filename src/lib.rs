//! Honeytrap - Conversational Honeypot Service
//!
//! This crate engages suspected scammers in multi-turn conversation using
//! fixed personas, silently harvests actionable intelligence from their
//! messages, and reports a final summary to an external evaluation
//! endpoint exactly once per conversation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

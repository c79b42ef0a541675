//! Hatflow - Structured Decision Workflow Engine
//!
//! This crate implements the Six Thinking Hats facilitation process for
//! structured decision making: a decision moves through a fixed sequence of
//! six reasoning stages, every stage's input is recorded in an append-only
//! event log, and the final synthesis is gated behind a real-input check.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

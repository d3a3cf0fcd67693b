//! Dispatch Trainer - Emergency Caller Simulation Core
//!
//! This crate implements the deterministic control layer around an external
//! text-generation backend: the caller's emotional state machine and the
//! response compliance pipeline that keeps generated utterances in character.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

//! Porter controller library.
//!
//! A line-following passenger porter: a guarded state machine decides
//! what the vehicle does, a countdown timer paces it and a line tracer
//! steers it.  Everything below `app` is pure logic; hardware arrives
//! through the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod fsm;

pub mod adapters;
pub mod drivers;
pub mod sensors;

//! Control primitives used by the porter state machine.

pub mod countdown;
pub mod line_tracer;

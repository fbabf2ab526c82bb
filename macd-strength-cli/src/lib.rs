//! Adapters around the signal engine: CSV bar loading, command handlers, and
//! logging setup for the `macd-strength` binary.

pub mod bars;
pub mod commands;
pub mod obs;

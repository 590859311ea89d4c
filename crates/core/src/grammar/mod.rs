/// The structured mode descriptor and its component types.
pub mod descriptor;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// JSON serialization helpers for the descriptor.
pub mod dump;
/// Emitter: converts a descriptor back to mode option text.
pub mod emit;
/// Parse error type.
pub mod error;
/// Trailing mode flag state machine.
mod flags;
/// Cursor and option tokenizer over borrowed input.
mod lexer;
/// Options clause parser.
pub mod options;
/// Clause dispatcher and clause scanners.
pub mod parser;
/// Re-exports of the named-mode and TV-norm registries.
pub mod tables;

//! Re-exports of the static registries used by the parser.

pub use vidmode_tables::{DisplayTiming, NAMED_MODES, NamedMode, TvNorm, named_mode};

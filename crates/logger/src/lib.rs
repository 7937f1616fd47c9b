//! Shared tracing setup for the Mission Control binaries.

mod tracing;

pub use self::tracing::{LogFormat, init as init_tracing, init_with_level, try_init};

//! Log-filter helpers scoped to this crate.
//!
//! The binary composes one global fmt subscriber; these helpers let it
//! raise the level for gateway events (upstream calls, fallbacks, mock
//! mode) independently of the rest of the process.

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Crate target prefix used in per-crate filter directives.
pub const TARGET_PREFIX: &str = "rag_gateway";

/// Builds a level directive for this crate only, e.g. `rag_gateway=debug`.
pub fn level_directive(level: Level) -> Directive {
    let s = format!("{TARGET_PREFIX}={}", level.as_str().to_lowercase());
    Directive::from_str(&s).expect("valid level directive")
}

/// `EnvFilter` from `RUST_LOG` (or `default` when unset), with this
/// crate's level raised to `level`.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    base.add_directive(level_directive(level))
}

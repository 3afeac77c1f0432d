//! Report configuration
//!
//! Three layers, later wins:
//! 1. Built-in defaults
//! 2. Config file (`--config`, JSON or TOML)
//! 3. CLI flags the user actually passed

mod defaults;
mod effective;
mod merge;
mod report;

pub use defaults::BuiltinDefaults;
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig};
pub use merge::{deep_merge, merge_layers};
pub use report::{EntityType, ReportConfig};

//! Configuration for GraphQL query diagnostics.
//!
//! Rule thresholds and enablement are read from a `.graphql-diagnostics.{yml,yaml,json,toml}`
//! file. Every rule is enabled with its defaults unless the file says otherwise:
//!
//! ```yaml
//! rules:
//!   complexity: on
//!   nestedQuery: [on, { max_depth: 10 }]
//!   excessiveFieldsRule:
//!     enabled: true
//!     options:
//!       threshold: 20
//!   unfilteredLists: off
//! ```

mod config;
mod error;
mod loader;

pub use config::{DiagnosticsConfig, RuleConfig};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILES};

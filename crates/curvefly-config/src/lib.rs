//! Curvefly Configuration Layer
//!
//! Explicit, file-backed configuration for a Curvefly run. Nothing here is
//! global: the CLI loads a [`PipelineConfig`], applies command-line
//! overrides, validates it and hands each engine its own section.
//!
//! # Example
//!
//! ```rust
//! use curvefly_config::{PipelineConfig, Validate};
//!
//! let config = PipelineConfig::from_toml_str(
//!     r#"
//!     [butterfly]
//!     window = 126
//!     "#,
//! )
//! .unwrap();
//!
//! assert!(config.is_valid());
//! assert_eq!(config.butterfly.window, 126);
//! assert_eq!(config.factors.n_components, 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod pipeline;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use pipeline::{DataConfig, PipelineConfig, MAX_LOOKBACK_YEARS};

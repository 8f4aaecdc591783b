//! Static pages for a blog whose posts come from an external content service.
//!
//! Every field authored in the content service is treated as untrusted:
//! rich text goes through [`sanitize::sanitize`], plain fields are escaped,
//! and structured data is embedded with [`sanitize::to_script_json`].

#[macro_use]
extern crate tracing;

pub mod build;
pub mod config;
pub mod content;
pub mod render;

pub use config::{Config, ConfigBuilder, ConfigError};

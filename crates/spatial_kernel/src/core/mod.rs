//! # Core Kernel Module
//!
//! Shared configuration used by applications embedding the kernel.

pub mod config;

// Re-export commonly used config types
pub use config::{Config, ConfigError, KernelConfig, TreeConfig};

//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `vendor/` - Vendor registry backed by configuration
//! - `sass/` - Stylesheet compiler (grass)
//! - `bundler/` - Directive-based script bundler
//! - `credentials/` - YAML secrets file
//! - `browser/` - Document-level HTTP browser

pub mod browser;
pub mod bundler;
pub mod credentials;
pub mod fs;
pub mod sass;
pub mod vendor;

// Re-export for convenience
pub use browser::{HttpBrowser, ReqwestTransport};
pub use bundler::DirectiveBundler;
pub use credentials::YamlCredentialSource;
pub use fs::LocalFs;
pub use sass::GrassCompiler;
pub use vendor::ConfigVendorRegistry;

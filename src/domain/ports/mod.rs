//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod browser;
pub mod credential_source;
pub mod file_system;
pub mod script_bundler;
pub mod stylesheet_compiler;
pub mod vendor_registry;

pub use browser::{Browser, BrowserError, BrowserResult};
pub use credential_source::{CredentialError, CredentialSource};
pub use file_system::{FileSystem, FsError, FsResult};
pub use script_bundler::{BundleConfig, ScriptBundler};
pub use stylesheet_compiler::{is_entry_point, OutputStyle, StylesheetCompiler};
pub use vendor_registry::VendorRegistry;

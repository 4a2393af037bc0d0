//! Optreg - Marker-Driven Options Registration
//!
//! Optreg wires caller-declared "option" types - plain structs holding
//! configuration values - into a configuration-backed object store. Each
//! type is described once by a marker (source kind, validation flags,
//! optional section key), grouped into named modules, discovered by the
//! scanner, bound against a [`figment::Figment`] root by the binder, and
//! registered by the registrar into any [`OptionsContainer`].
//!
//! # Architecture
//!
//! - **Marker** ([`marker`]): immutable metadata attached to a type
//! - **Module** ([`module`]): descriptors and caller-supplied groupings
//! - **Scanner** ([`scanner`]): candidate discovery with module exclusion
//! - **Binder** ([`binder`]): section-key and source resolution
//! - **Registrar** ([`registrar`]): the single registration entry point
//! - **Store** ([`store`]): the container seam and the shipped type map
//!
//! # Example
//!
//! ```ignore
//! use figment::Figment;
//! use figment::providers::{Env, Format, Yaml};
//! use optreg::{option_type, options_module, register_option_types, OptionsStore};
//!
//! let root = Figment::new()
//!     .merge(Yaml::file("app.yaml"))
//!     .merge(Env::prefixed("APP_").split("__"));
//!
//! let modules = vec![options_module!("app", [
//!     option_type!(ServerOptions, { source: Settings }),
//!     option_type!(LimitsOptions, { source: Settings, schema_validation: true }),
//!     option_type!(EndpointOptions, { source: Environment }),
//! ])];
//!
//! let mut store = OptionsStore::new();
//! register_option_types(&mut store, &root, &modules)?;
//!
//! let server = store.get::<ServerOptions>()?;
//! ```

pub mod binder;
pub mod error;
mod macros;
pub mod marker;
pub mod module;
pub mod registrar;
pub mod scanner;
pub mod store;

// Re-export the public surface for convenience
pub use error::RegistryError;
pub use marker::{OptionsMarker, SourceKind};
pub use module::{OptionsDescriptor, OptionsModule};
pub use registrar::register_option_types;
pub use store::{OptionsContainer, OptionsRegistration, OptionsStore};

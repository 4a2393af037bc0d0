//! Option type descriptors and caller-supplied modules.
//!
//! Descriptors are the registration table that replaces runtime type
//! discovery: each candidate type contributes its type identity, its
//! marker, and a monomorphized bind function, all erased behind a uniform
//! signature the registrar can invoke without knowing the concrete type.

use std::any::{self, Any, TypeId};
use std::sync::Arc;

use figment::Figment;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::RegistryError;
use crate::marker::OptionsMarker;

/// Type-erased bind function stored in a descriptor.
pub(crate) type BindFn = fn(&Figment) -> Result<Arc<dyn Any + Send + Sync>, RegistryError>;

/// Last path segment of a full type name, without generic arguments.
pub(crate) fn simple_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

fn bind_plain<T>(source: &Figment) -> Result<Arc<dyn Any + Send + Sync>, RegistryError>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    let value: T = source.extract().map_err(|error| RegistryError::Bind {
        type_name: simple_type_name(any::type_name::<T>()),
        source: error,
    })?;
    Ok(Arc::new(value))
}

fn bind_validated<T>(source: &Figment) -> Result<Arc<dyn Any + Send + Sync>, RegistryError>
where
    T: DeserializeOwned + Validate + Send + Sync + 'static,
{
    let value: T = source.extract().map_err(|error| RegistryError::Bind {
        type_name: simple_type_name(any::type_name::<T>()),
        source: error,
    })?;
    value
        .validate()
        .map_err(|errors| RegistryError::Validation {
            type_name: simple_type_name(any::type_name::<T>()),
            errors,
        })?;
    Ok(Arc::new(value))
}

/// A candidate option type: type identity, marker, and bind function.
///
/// Built once per type, usually through the [`option_type!`](crate::option_type)
/// macro, and grouped into an [`OptionsModule`] for discovery.
pub struct OptionsDescriptor {
    type_id: TypeId,
    type_name: &'static str,
    full_type_name: &'static str,
    marker: OptionsMarker,
    bind: BindFn,
    binder_validates: bool,
}

impl OptionsDescriptor {
    /// Descriptor for a type bound without schema validation.
    ///
    /// The marker is stored as given; a marker that demands schema
    /// validation on a descriptor built this way is rejected at
    /// registration time as an inconsistency.
    pub fn of<T>(marker: OptionsMarker) -> Self
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let full = any::type_name::<T>();
        Self {
            type_id: TypeId::of::<T>(),
            type_name: simple_type_name(full),
            full_type_name: full,
            marker,
            bind: bind_plain::<T>,
            binder_validates: false,
        }
    }

    /// Descriptor for a type whose bound value is schema-validated.
    ///
    /// Forces `use_schema_validation` on in the stored marker so marker
    /// and binder cannot disagree.
    pub fn validated<T>(marker: OptionsMarker) -> Self
    where
        T: DeserializeOwned + Validate + Send + Sync + 'static,
    {
        let full = any::type_name::<T>();
        Self {
            type_id: TypeId::of::<T>(),
            type_name: simple_type_name(full),
            full_type_name: full,
            marker: marker.with_schema_validation(true),
            bind: bind_validated::<T>,
            binder_validates: true,
        }
    }

    /// The described type's `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The described type's simple name (last path segment).
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The described type's full module path, for diagnostics.
    pub fn full_type_name(&self) -> &'static str {
        self.full_type_name
    }

    /// The marker metadata attached to this type.
    pub fn marker(&self) -> OptionsMarker {
        self.marker
    }

    /// Whether the stored bind function runs schema validation.
    pub fn binder_validates(&self) -> bool {
        self.binder_validates
    }

    pub(crate) fn bind_fn(&self) -> BindFn {
        self.bind
    }
}

impl std::fmt::Debug for OptionsDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsDescriptor")
            .field("type_name", &self.type_name)
            .field("marker", &self.marker)
            .field("binder_validates", &self.binder_validates)
            .finish()
    }
}

/// A named, caller-supplied collection of option type descriptors.
///
/// Modules are the unit of discovery: the scanner walks them in the
/// order supplied and yields descriptors in declaration order.
#[derive(Debug)]
pub struct OptionsModule {
    name: String,
    descriptors: Vec<OptionsDescriptor>,
}

impl OptionsModule {
    /// Create an empty module with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            descriptors: Vec::new(),
        }
    }

    /// Create a module from a list of descriptors.
    pub fn from_descriptors(
        name: impl Into<String>,
        descriptors: Vec<OptionsDescriptor>,
    ) -> Self {
        Self {
            name: name.into(),
            descriptors,
        }
    }

    /// Append a descriptor, preserving declaration order.
    pub fn with(mut self, descriptor: OptionsDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// The module's name, matched against the exclusion heuristic.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The descriptors declared in this module.
    pub fn descriptors(&self) -> &[OptionsDescriptor] {
        &self.descriptors
    }

    /// Whether the module declares no option types.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Number of option types declared in this module.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }
}

//! Container seam and the shipped type-map options store.
//!
//! The registrar only ever talks to [`OptionsContainer`]; the store here
//! is the default implementation backing resolution with bind-once lazy
//! cells keyed by type identity.

use std::any::{self, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use figment::Figment;
use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::RegistryError;
use crate::marker::OptionsMarker;
use crate::module::{simple_type_name, BindFn, OptionsDescriptor};

/// One candidate type paired with its resolved marker and resolved source.
///
/// Built by the registrar during a registration call and handed to the
/// container, which keeps it as the backing of its lazy entry.
pub struct OptionsRegistration {
    type_id: TypeId,
    type_name: &'static str,
    marker: OptionsMarker,
    source: Figment,
    bind: BindFn,
}

impl OptionsRegistration {
    pub(crate) fn new(descriptor: &OptionsDescriptor, source: Figment) -> Self {
        Self {
            type_id: descriptor.type_id(),
            type_name: descriptor.type_name(),
            marker: descriptor.marker(),
            source,
            bind: descriptor.bind_fn(),
        }
    }

    /// The registered type's `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The registered type's simple name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The marker metadata resolved for this registration.
    pub fn marker(&self) -> OptionsMarker {
        self.marker
    }

    /// The configuration source this registration binds against.
    pub fn source(&self) -> &Figment {
        &self.source
    }

    /// Run the registration's bind function against its resolved source.
    ///
    /// Extracts the concrete option value and, for schema-validated
    /// registrations, validates it before returning.
    pub fn bind(&self) -> Result<Arc<dyn Any + Send + Sync>, RegistryError> {
        (self.bind)(&self.source)
    }
}

impl std::fmt::Debug for OptionsRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionsRegistration")
            .field("type_name", &self.type_name)
            .field("marker", &self.marker)
            .finish()
    }
}

/// The seam the registrar mutates.
///
/// Implementors decide how registrations are stored and how the
/// `validate_on_start` pass-through is honored.
pub trait OptionsContainer {
    /// Accept one registration record.
    ///
    /// # Errors
    /// Implementations should reject duplicate type identities and must
    /// surface eager bind or validation failures when the registration's
    /// marker asks to validate on start.
    fn insert(&mut self, registration: OptionsRegistration) -> Result<(), RegistryError>;
}

struct StoreEntry {
    registration: OptionsRegistration,
    cell: OnceCell<Arc<dyn Any + Send + Sync>>,
}

impl StoreEntry {
    fn resolve(&self) -> Result<&Arc<dyn Any + Send + Sync>, RegistryError> {
        self.cell.get_or_try_init(|| {
            debug!(
                type_name = self.registration.type_name(),
                "binding option type"
            );
            self.registration.bind()
        })
    }
}

/// Type-map container resolving registered option types on demand.
///
/// Each entry binds at most once: the first successful [`OptionsStore::get`]
/// caches the shared value, later calls return the same `Arc`. Entries
/// registered with `validate_on_start` bind (and validate) during
/// [`OptionsContainer::insert`] instead.
///
/// Registration is single-threaded; reads after registration completes
/// are safe from any thread.
#[derive(Default)]
pub struct OptionsStore {
    entries: HashMap<TypeId, StoreEntry>,
}

impl OptionsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the registered value for `T`, binding it on first access.
    ///
    /// # Errors
    /// [`RegistryError::NotRegistered`] if `T` was never registered, or
    /// the bind/validation failure of the first access.
    pub fn get<T: Any + Send + Sync>(&self) -> Result<Arc<T>, RegistryError> {
        let entry = self
            .entries
            .get(&TypeId::of::<T>())
            .ok_or(RegistryError::NotRegistered {
                type_name: simple_type_name(any::type_name::<T>()),
            })?;
        let value = Arc::clone(entry.resolve()?);
        value
            .downcast::<T>()
            .map_err(|_| RegistryError::Inconsistent {
                type_name: simple_type_name(any::type_name::<T>()),
                reason: "stored value does not match its type identity",
            })
    }

    /// Whether a registration exists for `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered option types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no registrations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for OptionsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self
            .entries
            .values()
            .map(|e| e.registration.type_name())
            .collect();
        f.debug_struct("OptionsStore")
            .field("registered", &names)
            .finish()
    }
}

impl OptionsContainer for OptionsStore {
    fn insert(&mut self, registration: OptionsRegistration) -> Result<(), RegistryError> {
        if self.entries.contains_key(&registration.type_id()) {
            return Err(RegistryError::DuplicateType {
                type_name: registration.type_name(),
            });
        }

        debug!(
            type_name = registration.type_name(),
            validate_on_start = registration.marker().validate_on_start(),
            "registering option type"
        );

        let eager = registration.marker().validate_on_start();
        let entry = StoreEntry {
            registration,
            cell: OnceCell::new(),
        };
        let type_id = entry.registration.type_id();
        let outcome = if eager {
            entry.resolve().map(|_| ())
        } else {
            Ok(())
        };

        // The entry stays registered even when eager validation fails, so
        // later resolution reports the same deterministic error.
        self.entries.insert(type_id, entry);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::OptionsMarker;
    use figment::providers::{Format, Yaml};
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Window {
        height: u32,
    }

    #[derive(Debug, Deserialize, Validate)]
    struct Bounded {
        #[validate(range(min = 1, max = 8))]
        lanes: u32,
    }

    fn registration_for(descriptor: OptionsDescriptor, yaml: &str) -> OptionsRegistration {
        let root = Figment::new().merge(Yaml::string(yaml));
        let source = crate::binder::resolve_source(&descriptor, &root);
        OptionsRegistration::new(&descriptor, source)
    }

    #[test]
    fn test_get_before_registration_fails() {
        let store = OptionsStore::new();
        let result = store.get::<Window>();
        assert!(matches!(
            result,
            Err(RegistryError::NotRegistered { type_name: "Window" })
        ));
    }

    #[test]
    fn test_insert_then_get_binds_lazily() {
        let mut store = OptionsStore::new();
        let descriptor = OptionsDescriptor::of::<Window>(OptionsMarker::settings());
        store
            .insert(registration_for(descriptor, "Window:\n  height: 12\n"))
            .unwrap();

        let value = store.get::<Window>().unwrap();
        assert_eq!(*value, Window { height: 12 });
    }

    #[test]
    fn test_get_returns_the_cached_arc() {
        let mut store = OptionsStore::new();
        let descriptor = OptionsDescriptor::of::<Window>(OptionsMarker::settings());
        store
            .insert(registration_for(descriptor, "Window:\n  height: 12\n"))
            .unwrap();

        let first = store.get::<Window>().unwrap();
        let second = store.get::<Window>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_duplicate_type_is_rejected() {
        let mut store = OptionsStore::new();
        let yaml = "Window:\n  height: 12\n";
        store
            .insert(registration_for(
                OptionsDescriptor::of::<Window>(OptionsMarker::settings()),
                yaml,
            ))
            .unwrap();
        let result = store.insert(registration_for(
            OptionsDescriptor::of::<Window>(OptionsMarker::settings()),
            yaml,
        ));
        assert!(matches!(
            result,
            Err(RegistryError::DuplicateType { type_name: "Window" })
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_validate_on_start_surfaces_failure_at_insert() {
        let mut store = OptionsStore::new();
        let descriptor = OptionsDescriptor::validated::<Bounded>(
            OptionsMarker::settings().with_validate_on_start(true),
        );
        let result = store.insert(registration_for(
            descriptor,
            "Bounded:\n  lanes: 99\n",
        ));
        assert!(matches!(
            result,
            Err(RegistryError::Validation { type_name: "Bounded", .. })
        ));
        // Still registered; resolution repeats the same failure.
        assert!(store.contains::<Bounded>());
        assert!(store.get::<Bounded>().is_err());
    }

    #[test]
    fn test_deferred_validation_fails_on_first_get() {
        let mut store = OptionsStore::new();
        let descriptor = OptionsDescriptor::validated::<Bounded>(OptionsMarker::settings());
        store
            .insert(registration_for(
                descriptor,
                "Bounded:\n  lanes: 99\n",
            ))
            .unwrap();
        assert!(matches!(
            store.get::<Bounded>(),
            Err(RegistryError::Validation { type_name: "Bounded", .. })
        ));
    }

    #[test]
    fn test_bind_failure_reports_type_name() {
        let mut store = OptionsStore::new();
        let descriptor = OptionsDescriptor::of::<Window>(OptionsMarker::settings());
        store
            .insert(registration_for(
                descriptor,
                "Window:\n  height: not-a-number\n",
            ))
            .unwrap();
        assert!(matches!(
            store.get::<Window>(),
            Err(RegistryError::Bind { type_name: "Window", .. })
        ));
    }
}

use thiserror::Error;

/// Errors that can occur while registering or resolving option types
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No modules were supplied to the entry point
    #[error("no modules supplied: at least one options module is required")]
    NoModules,

    /// Extracting an option type from its configuration source failed
    #[error("failed to bind option type `{type_name}`: {source}")]
    Bind {
        /// Simple name of the option type that failed to bind
        type_name: &'static str,
        /// The underlying extraction error
        #[source]
        source: figment::Error,
    },

    /// Schema validation rejected a bound option value
    #[error("schema validation failed for option type `{type_name}`: {errors}")]
    Validation {
        /// Simple name of the option type that failed validation
        type_name: &'static str,
        /// Field-level validation failures
        errors: validator::ValidationErrors,
    },

    /// The container already holds a registration for this type identity
    #[error("option type `{type_name}` is already registered")]
    DuplicateType {
        /// Simple name of the duplicated option type
        type_name: &'static str,
    },

    /// Resolution was requested for a type that was never registered
    #[error("option type `{type_name}` is not registered")]
    NotRegistered {
        /// Simple name of the missing option type
        type_name: &'static str,
    },

    /// The registration table is self-contradictory for a descriptor
    ///
    /// Indicates a mis-built descriptor (e.g. a marker demanding schema
    /// validation on a descriptor constructed without a validating binder).
    /// Not reachable through the registration macros.
    #[error("registration table is inconsistent for `{type_name}`: {reason}")]
    Inconsistent {
        /// Simple name of the offending option type
        type_name: &'static str,
        /// What the table got wrong
        reason: &'static str,
    },

    /// One or more candidate registrations failed during a single call
    ///
    /// Failures are isolated per candidate: siblings that registered
    /// successfully stay registered.
    #[error("one or more option type registrations failed")]
    Aggregate(Vec<RegistryError>),
}

impl RegistryError {
    /// Returns the per-candidate failures collected during registration
    ///
    /// Empty for every variant except [`RegistryError::Aggregate`].
    pub fn registration_failures(&self) -> &[RegistryError] {
        match self {
            RegistryError::Aggregate(errors) => errors,
            _ => &[],
        }
    }
}

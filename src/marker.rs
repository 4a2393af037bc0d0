//! Marker metadata attached to option types.

/// Where an option type's values come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Bind from a named section of the configuration root.
    Settings,
    /// Bind from the full configuration root, as merged by the caller
    /// (typically environment providers).
    Environment,
}

/// Metadata identifying a type as registrable configuration.
///
/// One marker per descriptor. Immutable once built; read at registration
/// time only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionsMarker {
    source_kind: SourceKind,
    use_schema_validation: bool,
    validate_on_start: bool,
    section: Option<&'static str>,
}

impl OptionsMarker {
    /// Create a marker for the given source kind with validation off.
    pub const fn new(source_kind: SourceKind) -> Self {
        Self {
            source_kind,
            use_schema_validation: false,
            validate_on_start: false,
            section: None,
        }
    }

    /// Marker for a type bound from a named settings section.
    pub const fn settings() -> Self {
        Self::new(SourceKind::Settings)
    }

    /// Marker for a type bound from the full configuration root.
    pub const fn environment() -> Self {
        Self::new(SourceKind::Environment)
    }

    /// Override the section key used for `Settings` binding.
    ///
    /// Without an override the key is the type's simple name.
    pub const fn with_section(mut self, key: &'static str) -> Self {
        self.section = Some(key);
        self
    }

    /// Request declarative field validation after binding.
    pub const fn with_schema_validation(mut self, on: bool) -> Self {
        self.use_schema_validation = on;
        self
    }

    /// Request eager bind and validation at registration time.
    pub const fn with_validate_on_start(mut self, on: bool) -> Self {
        self.validate_on_start = on;
        self
    }

    /// The configured source kind.
    pub const fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    /// Whether schema validation should run on the bound value.
    pub const fn use_schema_validation(&self) -> bool {
        self.use_schema_validation
    }

    /// Whether bind and validation happen eagerly at registration.
    pub const fn validate_on_start(&self) -> bool {
        self.validate_on_start
    }

    /// The explicit section-key override, if any.
    pub const fn section(&self) -> Option<&'static str> {
        self.section
    }
}

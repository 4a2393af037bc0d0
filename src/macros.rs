//! Registration macros for option types.

/// Builds an [`OptionsDescriptor`](crate::OptionsDescriptor) declaratively.
///
/// The `source:` field is required; `section:`, `schema_validation:`, and
/// `validate_on_start:` are optional and default to off. Field order is
/// fixed. `schema_validation: true` selects the validating bind function
/// and therefore requires the type to implement `validator::Validate`.
///
/// # Example
///
/// ```ignore
/// let module = options_module!("app", [
///     option_type!(ServerOptions, { source: Settings }),
///     option_type!(LimitsOptions, {
///         source: Settings,
///         section: "Limits",
///         schema_validation: true,
///         validate_on_start: true,
///     }),
///     option_type!(EndpointOptions, { source: Environment }),
/// ]);
/// ```
#[macro_export]
macro_rules! option_type {
    ($ty:ty, {
        source: $kind:ident
        $(, section: $key:literal)?,
        schema_validation: true
        $(, validate_on_start: $eager:literal)?
        $(,)?
    }) => {
        $crate::OptionsDescriptor::validated::<$ty>(
            $crate::OptionsMarker::new($crate::SourceKind::$kind)
                $(.with_section($key))?
                $(.with_validate_on_start($eager))?,
        )
    };
    ($ty:ty, {
        source: $kind:ident
        $(, section: $key:literal)?,
        schema_validation: false
        $(, validate_on_start: $eager:literal)?
        $(,)?
    }) => {
        $crate::OptionsDescriptor::of::<$ty>(
            $crate::OptionsMarker::new($crate::SourceKind::$kind)
                $(.with_section($key))?
                $(.with_validate_on_start($eager))?,
        )
    };
    ($ty:ty, {
        source: $kind:ident
        $(, section: $key:literal)?
        $(, validate_on_start: $eager:literal)?
        $(,)?
    }) => {
        $crate::OptionsDescriptor::of::<$ty>(
            $crate::OptionsMarker::new($crate::SourceKind::$kind)
                $(.with_section($key))?
                $(.with_validate_on_start($eager))?,
        )
    };
}

/// Builds an [`OptionsModule`](crate::OptionsModule) from a name and a
/// list of descriptors, preserving declaration order.
///
/// # Example
///
/// ```ignore
/// let module = options_module!("billing", [
///     option_type!(InvoiceOptions, { source: Settings }),
/// ]);
/// ```
#[macro_export]
macro_rules! options_module {
    ($name:expr, [ $($descriptor:expr),* $(,)? ]) => {
        $crate::OptionsModule::from_descriptors($name, vec![$($descriptor),*])
    };
}

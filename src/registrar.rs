//! The registration entry point tying scanner, binder, and container together.

use figment::Figment;
use tracing::{debug, warn};

use crate::binder;
use crate::error::RegistryError;
use crate::module::{OptionsDescriptor, OptionsModule};
use crate::scanner;
use crate::store::{OptionsContainer, OptionsRegistration};

/// Register every option type declared in `modules` into `container`.
///
/// Discovers candidates, resolves each one's configuration source from
/// `root`, and inserts one registration per candidate. Failures are
/// isolated per candidate: each is logged at `warn` and collected, and
/// the call returns [`RegistryError::Aggregate`] listing all of them
/// while successful siblings stay registered.
///
/// Intended to run once during application start-up, before concurrent
/// traffic; the container is mutated in place and no locking is provided.
///
/// # Errors
/// [`RegistryError::NoModules`] when `modules` is empty, or
/// [`RegistryError::Aggregate`] when one or more candidates failed.
pub fn register_option_types<C>(
    container: &mut C,
    root: &Figment,
    modules: &[OptionsModule],
) -> Result<(), RegistryError>
where
    C: OptionsContainer + ?Sized,
{
    let candidates = scanner::discover(modules)?;

    let mut failures = Vec::new();
    for descriptor in candidates {
        if let Err(error) = register_one(container, root, descriptor) {
            warn!(
                type_name = descriptor.type_name(),
                %error,
                "option type registration failed"
            );
            failures.push(error);
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(RegistryError::Aggregate(failures))
    }
}

fn register_one<C>(
    container: &mut C,
    root: &Figment,
    descriptor: &OptionsDescriptor,
) -> Result<(), RegistryError>
where
    C: OptionsContainer + ?Sized,
{
    let marker = descriptor.marker();
    if marker.use_schema_validation() && !descriptor.binder_validates() {
        return Err(RegistryError::Inconsistent {
            type_name: descriptor.type_name(),
            reason: "marker requests schema validation but the descriptor has no validating binder",
        });
    }

    let source = binder::resolve_source(descriptor, root);
    debug!(
        type_name = descriptor.full_type_name(),
        section = binder::section_key(descriptor),
        "resolved option source"
    );
    container.insert(OptionsRegistration::new(descriptor, source))
}

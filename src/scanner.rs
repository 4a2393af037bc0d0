//! Discovery of candidate option types across modules.

use tracing::debug;

use crate::error::RegistryError;
use crate::module::{OptionsDescriptor, OptionsModule};

/// Module-name prefixes that are never scanned.
///
/// Covers this crate's own namespace and the configuration framework it
/// drives, so framework-internal module names cannot be pulled into
/// discovery by accident. Matched case-insensitively against the start of
/// the module name.
const RESERVED_MODULE_PREFIXES: [&str; 4] = ["optreg", "figment", "std", "core"];

fn is_reserved(name: &str) -> bool {
    let lowered = name.to_ascii_lowercase();
    RESERVED_MODULE_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
}

/// Enumerate the candidate descriptors of the supplied modules.
///
/// Skips modules matching the reserved-prefix heuristic and yields the
/// rest in module order, then intra-module declaration order. The order
/// only matters for deterministic testing; registrations do not interact.
///
/// # Errors
/// Returns [`RegistryError::NoModules`] if `modules` is empty.
pub fn discover(modules: &[OptionsModule]) -> Result<Vec<&OptionsDescriptor>, RegistryError> {
    if modules.is_empty() {
        return Err(RegistryError::NoModules);
    }

    let mut candidates = Vec::new();
    for module in modules {
        if is_reserved(module.name()) {
            debug!(module = module.name(), "skipping reserved module");
            continue;
        }
        candidates.extend(module.descriptors());
    }
    Ok(candidates)
}

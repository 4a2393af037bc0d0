//! Configuration-source resolution for discovered option types.

use figment::Figment;

use crate::marker::SourceKind;
use crate::module::OptionsDescriptor;

/// The section key an option type binds under.
///
/// The marker's explicit override wins; otherwise the type's simple name
/// is matched case-sensitively against section names in the root.
pub fn section_key(descriptor: &OptionsDescriptor) -> &'static str {
    descriptor
        .marker()
        .section()
        .unwrap_or_else(|| descriptor.type_name())
}

/// Resolve the configuration source an option type binds against.
///
/// `Environment` types bind the whole root; `Settings` types bind the
/// section named by [`section_key`]. Section lookup never fails: an
/// absent section focuses to an empty view, and extraction proceeds on
/// the target type's serde defaults.
pub fn resolve_source(descriptor: &OptionsDescriptor, root: &Figment) -> Figment {
    match descriptor.marker().source_kind() {
        SourceKind::Environment => root.clone(),
        SourceKind::Settings => root.focus(section_key(descriptor)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::OptionsMarker;
    use figment::providers::{Format, Yaml};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Corner {
        width: u32,
    }

    fn yaml_root(source: &str) -> Figment {
        Figment::new().merge(Yaml::string(source))
    }

    #[test]
    fn test_default_key_is_simple_type_name() {
        let descriptor = OptionsDescriptor::of::<Corner>(OptionsMarker::settings());
        assert_eq!(section_key(&descriptor), "Corner");
    }

    #[test]
    fn test_override_key_wins_over_type_name() {
        let descriptor =
            OptionsDescriptor::of::<Corner>(OptionsMarker::settings().with_section("Shape"));
        assert_eq!(section_key(&descriptor), "Shape");
    }

    #[test]
    fn test_settings_source_focuses_on_section() {
        let root = yaml_root("Corner:\n  width: 7\nwidth: 99\n");
        let descriptor = OptionsDescriptor::of::<Corner>(OptionsMarker::settings());
        let bound: Corner = resolve_source(&descriptor, &root).extract().unwrap();
        assert_eq!(bound, Corner { width: 7 });
    }

    #[test]
    fn test_environment_source_is_the_full_root() {
        let root = yaml_root("Corner:\n  width: 7\nwidth: 99\n");
        let descriptor = OptionsDescriptor::of::<Corner>(OptionsMarker::environment());
        let bound: Corner = resolve_source(&descriptor, &root).extract().unwrap();
        assert_eq!(bound, Corner { width: 99 });
    }

    #[test]
    fn test_absent_section_binds_serde_defaults() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Defaulted {
            #[serde(default = "default_width")]
            width: u32,
        }
        fn default_width() -> u32 {
            4
        }

        let root = yaml_root("Unrelated:\n  width: 1\n");
        let descriptor = OptionsDescriptor::of::<Defaulted>(OptionsMarker::settings());
        let bound: Defaulted = resolve_source(&descriptor, &root).extract().unwrap();
        assert_eq!(bound, Defaulted { width: 4 });
    }
}

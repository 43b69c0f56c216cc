pub mod battery;
pub mod clock;
pub mod date;
pub mod memory;
pub mod volume;

pub use battery::BatterySource;
pub use clock::ClockSource;
pub use date::DateSource;
pub use memory::MemorySource;
pub use volume::VolumeSource;

use obsidian_config::BarConfig;
use obsidian_core::{Producer, Registry};
use tracing::{info, warn};

/// Module kinds accepted in the `kind` field of the config.
pub const KINDS: [&str; 5] = ["clock", "date", "battery", "volume", "memory"];

/// Construct the source for a module kind, or `None` if the kind is unknown.
pub fn source_for(kind: &str) -> Option<Box<dyn Producer>> {
    let source: Box<dyn Producer> = match kind {
        "clock" => Box::new(ClockSource::new()),
        "date" => Box::new(DateSource::new()),
        "battery" => Box::new(BatterySource::new()),
        "volume" => Box::new(VolumeSource::new()),
        "memory" => Box::new(MemorySource::new()),
        _ => return None,
    };
    Some(source)
}

/// Build the module registry from the `left`, `center` and `right` lists.
///
/// Unknown kinds are skipped with a warning so one typo doesn't take the
/// whole bar down.
pub fn build_registry(config: &BarConfig) -> Registry {
    let mut builder = Registry::builder();

    for (zone, module) in config.modules() {
        match source_for(&module.kind) {
            Some(source) => {
                builder.add(&module.kind, zone, source);
            }
            None => warn!(
                "Unknown module kind '{}' in {zone} zone (expected one of {}); skipping",
                module.kind,
                KINDS.join(", ")
            ),
        }
    }

    let registry = builder.build();
    info!("Registered {} modules", registry.len());
    registry
}


#[cfg(test)]
mod tests {
    use super::*;
    use obsidian_config::ModuleConfig;
    use obsidian_core::{Module, Zone};

    #[test]
    fn every_listed_kind_has_a_source() {
        for kind in KINDS {
            assert!(source_for(kind).is_some(), "{kind}");
        }
        assert!(source_for("cpu").is_none());
    }

    #[test]
    fn default_config_builds_five_modules() {
        let registry = build_registry(&BarConfig::default());
        let layout: Vec<_> = registry.iter().map(|m| (m.name(), m.zone())).collect();
        assert_eq!(
            layout,
            [
                ("date", Zone::Left),
                ("clock", Zone::Center),
                ("battery", Zone::Right),
                ("volume", Zone::Right),
                ("memory", Zone::Right),
            ]
        );
    }

    #[test]
    fn unknown_kinds_are_skipped_and_duplicates_renamed() {
        let config = BarConfig {
            left: vec![ModuleConfig::new("clock"), ModuleConfig::new("weather")],
            center: vec![],
            right: vec![ModuleConfig::new("clock")],
            ..BarConfig::default()
        };
        let registry = build_registry(&config);
        let names: Vec<_> = registry.iter().map(Module::name).collect();
        assert_eq!(names, ["clock", "clock#2"]);
    }
}

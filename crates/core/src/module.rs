use crate::text::BoundedText;
use std::fmt;

/// Text stored by a module whose producer failed without producing a string
/// of its own.
pub const FALLBACK_TEXT: &str = "N/A";

/// Horizontal region of the bar a module is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Left,
    Center,
    Right,
}

impl Zone {
    /// Zones in the order a frame draws them.
    pub const ALL: [Zone; 3] = [Zone::Left, Zone::Center, Zone::Right];
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Zone::Left => "left",
            Zone::Center => "center",
            Zone::Right => "right",
        })
    }
}

/// Every module source must implement this trait.
///
/// Producers are queried once per tick and return the module's current text.
/// They recover from their own failures (missing probe, malformed data) by
/// returning a fallback string; an error never leaves `produce`.
pub trait Producer: Send + fmt::Debug {
    /// Produce the current text. May block on I/O.
    fn produce(&mut self) -> String;

    /// Text shown when `produce` panics.
    fn fallback(&self) -> &str {
        FALLBACK_TEXT
    }
}

/// One status fragment: a producer bound to a zone, plus its last output.
#[derive(Debug)]
pub struct Module {
    name: String,
    zone: Zone,
    producer: Box<dyn Producer>,
    buffer: BoundedText,
}

impl Module {
    pub fn new(name: impl Into<String>, zone: Zone, producer: Box<dyn Producer>) -> Self {
        Self {
            name: name.into(),
            zone,
            producer,
            buffer: BoundedText::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Text from the last refresh; empty before the first one.
    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    pub(crate) fn producer_mut(&mut self) -> &mut dyn Producer {
        self.producer.as_mut()
    }

    pub(crate) fn fallback(&self) -> &str {
        self.producer.fallback()
    }

    /// Replace the buffer as a whole.
    pub(crate) fn store(&mut self, text: BoundedText) {
        self.buffer = text;
    }
}

/// Ordered, fixed set of modules.
///
/// Insertion order is the draw order within a zone. There is no mutation API
/// besides the refresh engine updating buffers.
#[derive(Debug, Default)]
pub struct Registry {
    modules: Vec<Module>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter()
    }

    /// Modules of one zone, in registry order.
    pub fn zone(&self, zone: Zone) -> impl Iterator<Item = &Module> {
        self.modules.iter().filter(move |m| m.zone == zone)
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub(crate) fn modules_mut(&mut self) -> impl Iterator<Item = &mut Module> {
        self.modules.iter_mut()
    }
}

/// Collects modules at startup, keeping names unique.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    modules: Vec<Module>,
}

impl RegistryBuilder {
    /// Append a module. A name already taken gets a `#n` suffix
    /// (`clock`, `clock#2`, ...).
    pub fn add(&mut self, name: &str, zone: Zone, producer: Box<dyn Producer>) -> &mut Self {
        let unique = self.unique_name(name);
        self.modules.push(Module::new(unique, zone, producer));
        self
    }

    #[must_use]
    pub fn with(mut self, name: &str, zone: Zone, producer: Box<dyn Producer>) -> Self {
        self.add(name, zone, producer);
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            modules: self.modules,
        }
    }

    fn unique_name(&self, name: &str) -> String {
        let taken = |candidate: &str| self.modules.iter().any(|m| m.name == candidate);
        if !taken(name) {
            return name.to_string();
        }
        (2..)
            .map(|n| format!("{name}#{n}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(&'static str);

    impl Producer for Fixed {
        fn produce(&mut self) -> String {
            self.0.to_string()
        }
    }

    fn sample() -> Registry {
        Registry::builder()
            .with("date", Zone::Left, Box::new(Fixed("Mon 01 Jan")))
            .with("battery", Zone::Right, Box::new(Fixed("Bat: 1% 0h1m")))
            .with("clock", Zone::Center, Box::new(Fixed("12:00:00")))
            .with("volume", Zone::Right, Box::new(Fixed("Vol: 5%")))
            .build()
    }

    #[test]
    fn zone_iteration_keeps_registry_order() {
        let registry = sample();
        let right: Vec<_> = registry.zone(Zone::Right).map(Module::name).collect();
        assert_eq!(right, ["battery", "volume"]);
        assert_eq!(registry.zone(Zone::Center).count(), 1);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn duplicate_names_get_suffixes() {
        let registry = Registry::builder()
            .with("clock", Zone::Left, Box::new(Fixed("a")))
            .with("clock", Zone::Center, Box::new(Fixed("b")))
            .with("clock", Zone::Right, Box::new(Fixed("c")))
            .build();
        let names: Vec<_> = registry.iter().map(Module::name).collect();
        assert_eq!(names, ["clock", "clock#2", "clock#3"]);
    }

    #[test]
    fn buffers_start_empty() {
        let registry = sample();
        assert!(registry.iter().all(|m| m.text().is_empty()));
        assert_eq!(registry.get("clock").map(Module::zone), Some(Zone::Center));
    }

    #[test]
    fn default_fallback_is_na() {
        assert_eq!(Fixed("x").fallback(), FALLBACK_TEXT);
    }
}

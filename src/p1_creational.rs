// Pattern 1: Creational Patterns - Singleton, Factory
// Object creation: one lazily-built global instance, and variants picked by tag at runtime.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::{PatternError, Result};

// ============================================================================
// Example: Singleton Pattern with OnceLock
// ============================================================================

// The one and only instance. The constructor is private; go through
// `Singleton::instance`.
#[derive(Debug)]
pub struct Singleton {
    foo: &'static str,
}

impl Singleton {
    fn new() -> Self {
        debug!("constructing singleton");
        Self { foo: "bar" }
    }

    pub fn instance() -> &'static Singleton {
        static INSTANCE: OnceLock<Singleton> = OnceLock::new();
        INSTANCE.get_or_init(Singleton::new)
    }

    pub fn foo(&self) -> &str {
        self.foo
    }
}

pub fn get_instance() -> &'static Singleton {
    Singleton::instance()
}

// ============================================================================
// Example: Factory Pattern with a Variant Registry
// ============================================================================

pub const DEFAULT_SPEED: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    kind: String,
    speed: u32,
}

impl Ship {
    // A ship of `kind` that has not set its own speed.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            speed: DEFAULT_SPEED,
        }
    }

    pub fn with_speed(mut self, speed: u32) -> Self {
        self.speed = speed;
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn get_speed(&self) -> u32 {
        self.speed()
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (speed {})", self.kind, self.speed)
    }
}

pub type ShipConstructor = fn() -> Ship;

fn fighter() -> Ship {
    Ship::new("fighter").with_speed(15)
}

fn drone() -> Ship {
    Ship::new("drone").with_speed(10)
}

pub struct ShipFactory {
    registry: HashMap<String, ShipConstructor>,
}

impl ShipFactory {
    // Factory with the built-in `fighter` and `drone` variants.
    pub fn new() -> Self {
        let mut factory = Self::empty();
        factory.register("fighter", fighter);
        factory.register("drone", drone);
        factory
    }

    pub fn empty() -> Self {
        Self {
            registry: HashMap::new(),
        }
    }

    // Re-registering a tag replaces the previous constructor.
    pub fn register(&mut self, kind: impl Into<String>, constructor: ShipConstructor) {
        self.registry.insert(kind.into(), constructor);
    }

    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.registry.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn build<'a>(&self, kind: impl Into<Option<&'a str>>) -> Result<Ship> {
        let kind = match kind.into() {
            Some(kind) if !kind.is_empty() => kind,
            _ => return Err(PatternError::invalid_argument("type required")),
        };

        let constructor = self
            .registry
            .get(kind)
            .ok_or_else(|| PatternError::UnknownType(kind.to_string()))?;

        let ship = constructor();
        debug!(%ship, "built ship");
        Ok(ship)
    }
}

impl Default for ShipFactory {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::thread;

    #[test]
    fn test_singleton() {
        let first = Singleton::instance();
        let second = get_instance();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.foo(), "bar");
    }

    #[test]
    fn test_singleton_across_threads() {
        let addresses: Vec<usize> = (0..8)
            .map(|_| thread::spawn(|| Singleton::instance() as *const Singleton as usize))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        let expected = Singleton::instance() as *const Singleton as usize;
        assert!(addresses.iter().all(|&addr| addr == expected));
    }

    proptest! {
        #[test]
        fn test_singleton_n_calls(n in 1usize..64) {
            let first = Singleton::instance();
            for _ in 0..n {
                prop_assert!(std::ptr::eq(first, Singleton::instance()));
            }
        }
    }

    #[test]
    fn test_factory_builtin_speeds() {
        let factory = ShipFactory::new();
        assert_eq!(factory.build("fighter").unwrap().get_speed(), 15);
        assert_eq!(factory.build("drone").unwrap().get_speed(), 10);
    }

    #[test]
    fn test_factory_missing_type() {
        let factory = ShipFactory::new();
        assert!(matches!(
            factory.build(""),
            Err(PatternError::InvalidArgument(_))
        ));
        assert!(matches!(
            factory.build(None::<&str>),
            Err(PatternError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_factory_unknown_type() {
        let factory = ShipFactory::new();
        match factory.build("cruiser") {
            Err(PatternError::UnknownType(kind)) => assert_eq!(kind, "cruiser"),
            other => panic!("expected UnknownType, got {:?}", other),
        }
    }

    #[test]
    fn test_factory_default_speed() {
        let mut factory = ShipFactory::new();
        factory.register("shuttle", || Ship::new("shuttle"));

        let shuttle = factory.build(Some("shuttle")).unwrap();
        assert_eq!(shuttle.speed(), DEFAULT_SPEED);
        assert_eq!(shuttle.kind(), "shuttle");
        assert_eq!(factory.kinds(), vec!["drone", "fighter", "shuttle"]);
    }

    #[test]
    fn test_factory_builds_fresh_instances() {
        let factory = ShipFactory::new();
        let a = factory.build("drone").unwrap();
        let b = factory.build("drone").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "drone (speed 10)");
    }

    #[test]
    fn test_empty_factory_rejects_everything() {
        let factory = ShipFactory::empty();
        assert!(factory.kinds().is_empty());
        assert!(matches!(
            factory.build("fighter"),
            Err(PatternError::UnknownType(_))
        ));
    }
}

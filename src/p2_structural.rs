// Pattern 2: Structural Patterns - Decorator, Facade, Adapter, Composite
// Demonstrates patterns for organizing relationships between entities.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{PatternError, Result};

// ============================================================================
// Example: Decorator Pattern with a Named Registry
// ============================================================================

pub trait Decoration: Send + Sync {
    fn apply(&self, sugar: u32) -> u32;
}

pub struct Frosting;
impl Decoration for Frosting {
    fn apply(&self, sugar: u32) -> u32 {
        sugar.saturating_add(100)
    }
}

pub struct Sprinkles;
impl Decoration for Sprinkles {
    fn apply(&self, sugar: u32) -> u32 {
        sugar.saturating_add(50)
    }
}

impl<F> Decoration for F
where
    F: Fn(u32) -> u32 + Send + Sync,
{
    fn apply(&self, sugar: u32) -> u32 {
        self(sugar)
    }
}

pub struct DecorationRegistry {
    decorations: HashMap<String, Box<dyn Decoration>>,
}

impl DecorationRegistry {
    pub fn empty() -> Self {
        Self {
            decorations: HashMap::new(),
        }
    }

    // `frosting` and `sprinkles`.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register("frosting", Frosting);
        registry.register("sprinkles", Sprinkles);
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, decoration: impl Decoration + 'static) {
        self.decorations.insert(name.into(), Box::new(decoration));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Decoration> {
        self.decorations.get(name).map(|d| d.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decorations.contains_key(name)
    }
}

impl Default for DecorationRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// Grams of sugar; displays as `300g`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sugar(pub u32);

impl fmt::Display for Sugar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}g", self.0)
    }
}

pub struct Cake {
    base_sugar: u32,
    decorations: Vec<String>,
    registry: DecorationRegistry,
}

impl Cake {
    pub fn new() -> Self {
        Self::with_registry(300, DecorationRegistry::standard())
    }

    pub fn with_registry(base_sugar: u32, registry: DecorationRegistry) -> Self {
        Self {
            base_sugar,
            decorations: Vec::new(),
            registry,
        }
    }

    // Applying an already-applied decoration is a no-op.
    pub fn decorate(&mut self, name: &str) -> Result<()> {
        if !self.registry.contains(name) {
            return Err(PatternError::NotFound(format!("decorator {}", name)));
        }
        if !self.decorations.iter().any(|d| d == name) {
            debug!(decoration = name, "decorating cake");
            self.decorations.push(name.to_string());
        }
        Ok(())
    }

    pub fn undecorate(&mut self, name: &str) {
        self.decorations.retain(|d| d != name);
    }

    pub fn decorations(&self) -> &[String] {
        &self.decorations
    }

    pub fn sugar(&self) -> Sugar {
        let total = self
            .decorations
            .iter()
            .filter_map(|name| self.registry.get(name))
            .fold(self.base_sugar, |sugar, decoration| decoration.apply(sugar));
        Sugar(total)
    }

    pub fn get_sugar(&self) -> String {
        self.sugar().to_string()
    }
}

impl Default for Cake {
    fn default() -> Self {
        Self::new()
    }
}

pub fn make_cake() -> Cake {
    Cake::new()
}

// ============================================================================
// Example: Facade Pattern over Incompatible Mages
// ============================================================================

pub trait Cast {
    fn cast(&self, spell: &str) -> String;
}

pub trait Enchant {
    fn enchant(&self, spell: &str) -> String;
}

// Any actor the facade can wrap. Capabilities are opt-in.
pub trait Mage {
    fn name(&self) -> &str;

    fn as_caster(&self) -> Option<&dyn Cast> {
        None
    }

    fn as_enchanter(&self) -> Option<&dyn Enchant> {
        None
    }
}

pub struct Sorcerer {
    name: String,
}

impl Sorcerer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Cast for Sorcerer {
    fn cast(&self, spell: &str) -> String {
        format!("{} casts {}", self.name, spell)
    }
}

impl Mage for Sorcerer {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_caster(&self) -> Option<&dyn Cast> {
        Some(self)
    }
}

pub struct Enchanter {
    name: String,
}

impl Enchanter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Enchant for Enchanter {
    fn enchant(&self, spell: &str) -> String {
        format!("{} enchants with {}", self.name, spell)
    }
}

impl Mage for Enchanter {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_enchanter(&self) -> Option<&dyn Enchant> {
        Some(self)
    }
}

// Knows no spells at all.
pub struct Apprentice;

impl Mage for Apprentice {
    fn name(&self) -> &str {
        "apprentice"
    }
}

pub struct SpellFacade {
    mage: Box<dyn Mage>,
}

impl SpellFacade {
    pub fn new(mage: impl Mage + 'static) -> Self {
        Self {
            mage: Box::new(mage),
        }
    }

    pub fn invoke(&self, spell: &str) -> Result<String> {
        if let Some(caster) = self.mage.as_caster() {
            return Ok(caster.cast(spell));
        }
        if let Some(enchanter) = self.mage.as_enchanter() {
            return Ok(enchanter.enchant(spell));
        }
        Err(PatternError::UnsupportedOperation(format!(
            "{} can neither cast nor enchant",
            self.mage.name()
        )))
    }
}

// ============================================================================
// Example: Adapter Pattern with Trait Objects
// ============================================================================

// Target interface the controller expects.
pub trait Playback {
    fn start(&mut self) -> String;
    fn halt(&mut self) -> String;
}

pub trait Device {
    fn name(&self) -> &str;

    fn playback(&mut self) -> Option<&mut dyn Playback> {
        None
    }
}

// Existing interface with different method names.
pub trait LegacyPlayback {
    fn play(&mut self);
    fn pause(&mut self);
}

#[derive(Debug, Default)]
pub struct LegacyDvr {
    pub playing: bool,
}

impl LegacyPlayback for LegacyDvr {
    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }
}

impl Device for LegacyDvr {
    fn name(&self) -> &str {
        "legacy dvr"
    }
}

#[derive(Debug, Default)]
pub struct ModernDvr {
    pub running: bool,
}

impl Playback for ModernDvr {
    fn start(&mut self) -> String {
        self.running = true;
        "modern dvr started".to_string()
    }

    fn halt(&mut self) -> String {
        self.running = false;
        "modern dvr halted".to_string()
    }
}

impl Device for ModernDvr {
    fn name(&self) -> &str {
        "modern dvr"
    }

    fn playback(&mut self) -> Option<&mut dyn Playback> {
        Some(self)
    }
}

pub struct LegacyAdapter<T> {
    inner: T,
}

impl<T: LegacyPlayback> LegacyAdapter<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: LegacyPlayback> Playback for LegacyAdapter<T> {
    fn start(&mut self) -> String {
        self.inner.play();
        "Playback started".to_string()
    }

    fn halt(&mut self) -> String {
        self.inner.pause();
        "Playback halted".to_string()
    }
}

impl<T: LegacyPlayback> Device for LegacyAdapter<T> {
    fn name(&self) -> &str {
        "legacy adapter"
    }

    fn playback(&mut self) -> Option<&mut dyn Playback> {
        Some(self)
    }
}

pub struct DvrController {
    device: Box<dyn Device>,
}

impl DvrController {
    pub fn new(device: impl Device + 'static) -> Self {
        Self {
            device: Box::new(device),
        }
    }

    fn controls(&mut self) -> Result<&mut dyn Playback> {
        let name = self.device.name().to_string();
        self.device
            .playback()
            .ok_or_else(|| PatternError::incompatible(name, "start/halt"))
    }

    pub fn start_playback(&mut self) -> Result<String> {
        Ok(self.controls()?.start())
    }

    pub fn stop_playback(&mut self) -> Result<String> {
        Ok(self.controls()?.halt())
    }
}

// ============================================================================
// Example: Composite Pattern - Named Leaves, Anonymous Branches
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOperation {
    SayName,
}

impl FromStr for NodeOperation {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sayName" | "say_name" => Ok(NodeOperation::SayName),
            other => Err(PatternError::UnsupportedOperation(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    name: Option<String>,
    children: Vec<Node>,
}

impl Node {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            children: Vec::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn add_child(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn with_child(mut self, node: Node) -> Self {
        self.add_child(node);
        self
    }

    // A named node answers for itself; an anonymous one gathers its
    // children's answers in insertion order.
    pub fn say_name(&self) -> Vec<String> {
        match &self.name {
            Some(name) => vec![format!("Node:{}", name)],
            None => self.children.iter().flat_map(Node::say_name).collect(),
        }
    }

    pub fn apply(&self, operation: NodeOperation) -> Vec<String> {
        match operation {
            NodeOperation::SayName => self.say_name(),
        }
    }

    // One result per child, in insertion order.
    pub fn traverse(&self, operation: &str) -> Result<Vec<Vec<String>>> {
        let operation: NodeOperation = operation.parse()?;
        Ok(self
            .children
            .iter()
            .map(|child| child.apply(operation))
            .collect())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_cake() {
        let cake = make_cake();
        assert_eq!(cake.get_sugar(), "300g");
        assert!(cake.decorations().is_empty());
    }

    #[test]
    fn test_decorations_stack() {
        let mut cake = Cake::new();
        cake.decorate("frosting").unwrap();
        assert_eq!(cake.get_sugar(), "400g");

        cake.decorate("sprinkles").unwrap();
        assert_eq!(cake.get_sugar(), "450g");

        cake.decorate("frosting").unwrap();
        assert_eq!(cake.get_sugar(), "450g");
        assert_eq!(cake.decorations(), ["frosting", "sprinkles"]);
    }

    #[test]
    fn test_unknown_decoration() {
        let mut cake = Cake::new();
        assert!(matches!(
            cake.decorate("unknown"),
            Err(PatternError::NotFound(_))
        ));
        assert_eq!(cake.sugar(), Sugar(300));
    }

    #[test]
    fn test_undecorate_removes_only_the_named_decoration() {
        let mut cake = Cake::new();
        cake.decorate("frosting").unwrap();
        cake.decorate("sprinkles").unwrap();

        cake.undecorate("frosting");
        assert_eq!(cake.decorations(), ["sprinkles"]);
        assert_eq!(cake.get_sugar(), "350g");

        cake.undecorate("frosting");
        assert_eq!(cake.get_sugar(), "350g");
    }

    #[test]
    fn test_sugar_saturates_near_max() {
        let config = crate::config::CatalogConfig::from_toml_str("[cake]\nbase_sugar = 4294967250")
            .unwrap();
        let mut cake = Cake::with_registry(config.cake.base_sugar, DecorationRegistry::standard());

        cake.decorate("frosting").unwrap();
        assert_eq!(cake.sugar(), Sugar(u32::MAX));

        cake.decorate("sprinkles").unwrap();
        assert_eq!(cake.get_sugar(), format!("{}g", u32::MAX));
    }

    #[test]
    fn test_decoration_order_matters() {
        let mut registry = DecorationRegistry::standard();
        registry.register("double", |sugar: u32| sugar * 2);

        let mut a = Cake::with_registry(100, registry);
        a.decorate("frosting").unwrap();
        a.decorate("double").unwrap();
        assert_eq!(a.sugar(), Sugar(400));

        let mut registry = DecorationRegistry::standard();
        registry.register("double", |sugar: u32| sugar * 2);
        let mut b = Cake::with_registry(100, registry);
        b.decorate("double").unwrap();
        b.decorate("frosting").unwrap();
        assert_eq!(b.sugar(), Sugar(300));
    }

    #[test]
    fn test_facade_dispatch() {
        let sorcerer = SpellFacade::new(Sorcerer::new("Merlin"));
        assert_eq!(sorcerer.invoke("fireball").unwrap(), "Merlin casts fireball");

        let enchanter = SpellFacade::new(Enchanter::new("Morgana"));
        assert_eq!(
            enchanter.invoke("sleep").unwrap(),
            "Morgana enchants with sleep"
        );
    }

    #[test]
    fn test_facade_without_capability() {
        let facade = SpellFacade::new(Apprentice);
        assert!(matches!(
            facade.invoke("fireball"),
            Err(PatternError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_adapter_translates_calls() {
        let mut adapter = LegacyAdapter::new(LegacyDvr::default());
        assert_eq!(adapter.start(), "Playback started");
        assert!(adapter.inner().playing);
        assert_eq!(adapter.halt(), "Playback halted");
        assert!(!adapter.inner().playing);
    }

    #[test]
    fn test_controller_with_adapter() {
        let mut controller = DvrController::new(LegacyAdapter::new(LegacyDvr::default()));
        assert_eq!(controller.start_playback().unwrap(), "Playback started");
        assert_eq!(controller.stop_playback().unwrap(), "Playback halted");
    }

    #[test]
    fn test_controller_with_modern_device() {
        let mut controller = DvrController::new(ModernDvr::default());
        assert_eq!(controller.start_playback().unwrap(), "modern dvr started");
        assert_eq!(controller.stop_playback().unwrap(), "modern dvr halted");
    }

    #[test]
    fn test_controller_rejects_bare_legacy_device() {
        let mut controller = DvrController::new(LegacyDvr::default());
        match controller.start_playback() {
            Err(PatternError::Incompatible { device, .. }) => assert_eq!(device, "legacy dvr"),
            other => panic!("expected Incompatible, got {:?}", other),
        }
        assert!(controller.stop_playback().is_err());
    }

    #[test]
    fn test_composite_traverse() {
        let mut root = Node::anonymous();
        root.add_child(Node::named("A"));
        root.add_child(Node::named("B"));

        let results = root.traverse("sayName").unwrap();
        assert_eq!(results, vec![vec!["Node:A"], vec!["Node:B"]]);
    }

    #[test]
    fn test_composite_say_name_recurses() {
        let root = Node::anonymous()
            .with_child(Node::named("A"))
            .with_child(Node::anonymous().with_child(Node::named("B")).with_child(Node::named("C")))
            .with_child(Node::named("D"));

        assert_eq!(root.say_name(), vec!["Node:A", "Node:B", "Node:C", "Node:D"]);
        assert_eq!(root.children().len(), 3);
        assert_eq!(root.name(), None);
    }

    #[test]
    fn test_named_node_ignores_children() {
        let leaf = Node::named("A").with_child(Node::named("hidden"));
        assert_eq!(leaf.say_name(), vec!["Node:A"]);
    }

    #[test]
    fn test_composite_unknown_operation() {
        let root = Node::anonymous().with_child(Node::named("A"));
        assert!(matches!(
            root.traverse("explode"),
            Err(PatternError::UnsupportedOperation(_))
        ));
    }
}

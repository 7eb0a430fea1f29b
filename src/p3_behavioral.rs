// Pattern 3: Behavioral Patterns - Iterator, Strategy
// Walking a collection with an explicit cursor, and swapping an algorithm at runtime.

use std::fmt;
use std::iter::FusedIterator;

use tracing::debug;

use crate::error::{PatternError, Result};

// ============================================================================
// Example: Iterator Pattern - Restartable Cursor
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub team: String,
    pub name: String,
}

impl RosterEntry {
    pub fn new(team: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for RosterEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.team)
    }
}

// Cursor over a fixed, ordered collection. The position only moves forward
// until `Cursor::rewind` is called.
#[derive(Debug, Clone)]
pub struct Cursor<T> {
    data: Vec<T>,
    index: usize,
}

impl<T> Cursor<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data, index: 0 }
    }

    pub fn has_next(&self) -> bool {
        self.index < self.data.len()
    }

    pub fn current(&self) -> Option<&T> {
        self.data.get(self.index)
    }

    pub fn rewind(&mut self) {
        self.index = 0;
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T: Clone> Iterator for Cursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.data.get(self.index)?.clone();
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> ExactSizeIterator for Cursor<T> {}

impl<T: Clone> FusedIterator for Cursor<T> {}

// The four-player roster the cursor demo walks.
pub fn roster() -> Cursor<RosterEntry> {
    Cursor::new(vec![
        RosterEntry::new("Keas", "Sean Larsson"),
        RosterEntry::new("Tuataras", "James Harth"),
        RosterEntry::new("Bats", "Hannah Berry"),
        RosterEntry::new("Wetas", "Giles Fang"),
    ])
}

// ============================================================================
// Example: Strategy Pattern with Trait Objects
// ============================================================================

pub trait Strategy {
    fn enact(&self) -> String;
}

pub struct Pincer;
impl Strategy for Pincer {
    fn enact(&self) -> String {
        "devastating pincer attack!".to_string()
    }
}

pub struct Diplomacy;
impl Strategy for Diplomacy {
    fn enact(&self) -> String {
        "amicable friendship".to_string()
    }
}

// Closures work as ad-hoc strategies.
impl<F> Strategy for F
where
    F: Fn() -> String,
{
    fn enact(&self) -> String {
        self()
    }
}

// Resolve one of the built-in strategies by name.
pub fn strategy_by_name(name: &str) -> Result<Box<dyn Strategy>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "" => Err(PatternError::invalid_argument("strategy name required")),
        "pincer" => Ok(Box::new(Pincer)),
        "diplomacy" => Ok(Box::new(Diplomacy)),
        other => Err(PatternError::invalid_argument(format!(
            "strategy '{}' not defined",
            other
        ))),
    }
}

#[derive(Default)]
pub struct General {
    strategy: Option<Box<dyn Strategy>>,
}

impl General {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_strategy(&mut self, strategy: impl Strategy + 'static) {
        self.strategy = Some(Box::new(strategy));
    }

    pub fn set_strategy_named(&mut self, name: &str) -> Result<()> {
        let strategy = strategy_by_name(name)?;
        debug!(strategy = name, "general switched strategy");
        self.strategy = Some(strategy);
        Ok(())
    }

    pub fn has_strategy(&self) -> bool {
        self.strategy.is_some()
    }

    pub fn wage_war(&self) -> Result<String> {
        let strategy = self
            .strategy
            .as_ref()
            .ok_or_else(|| PatternError::PreconditionFailed("no strategy set".to_string()))?;
        Ok(strategy.enact())
    }
}

pub fn spawn_general() -> General {
    General::new()
}

// ============================================================================
// Tests
// ============================================================================

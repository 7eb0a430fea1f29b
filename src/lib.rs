// Design Patterns Catalog
// Classic object-oriented patterns, each a small self-contained construct.

//! # Design Patterns Quick Reference
//!
//! ## Pattern 1: Creational Patterns
//! - Singleton Pattern (OnceLock)
//! - Factory Pattern (variant registry)
//!
//! ## Pattern 2: Structural Patterns
//! - Decorator Pattern (named registry, fold over a base value)
//! - Facade Pattern (capability dispatch)
//! - Adapter Pattern (trait objects, generics)
//! - Composite Pattern (recursive tree)
//!
//! ## Pattern 3: Behavioral Patterns
//! - Iterator Pattern (restartable cursor)
//! - Strategy Pattern (trait objects, closures)
//!
//! ## Pattern 4: Concurrency Patterns
//! - Proxy Pattern (async cache, single-flight)
//!
//! Walk through all of them with:
//! ```bash
//! cargo run --bin catalog
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod p1_creational;
pub mod p2_structural;
pub mod p3_behavioral;
pub mod p4_concurrency;

pub use config::CatalogConfig;
pub use error::{PatternError, Result};
pub use p1_creational::{get_instance, Ship, ShipFactory, Singleton};
pub use p2_structural::{
    make_cake, Cake, DvrController, LegacyAdapter, LegacyDvr, ModernDvr, Node, SpellFacade,
};
pub use p3_behavioral::{roster, spawn_general, Cursor, Diplomacy, General, Pincer, RosterEntry};
pub use p4_concurrency::{BookKeeper, StockKeeper};

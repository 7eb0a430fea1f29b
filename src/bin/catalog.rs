// Runs every pattern in the catalog once and prints what happened.
//
// Usage: catalog [config.toml]

use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use tracing::warn;

use design_patterns::p2_structural::{Apprentice, DecorationRegistry, Enchanter, Sorcerer};
use design_patterns::{
    get_instance, logging, roster, spawn_general, BookKeeper, Cake, CatalogConfig, Diplomacy,
    DvrController, LegacyAdapter, LegacyDvr, ModernDvr, Node, Pincer, ShipFactory, SpellFacade,
    StockKeeper,
};

fn heading(title: &str) {
    println!("\n{}", format!("=== {} ===", title).bold().cyan());
}

fn singleton_example() {
    let first = get_instance();
    let second = get_instance();
    println!("foo = {}", first.foo());
    println!("Same instance: {}", std::ptr::eq(first, second));
}

fn factory_example() {
    let factory = ShipFactory::new();
    for kind in ["fighter", "drone", "", "cruiser"] {
        match factory.build(kind) {
            Ok(ship) => println!("Built {}", ship),
            Err(e) => println!("{:?} -> {}", kind, e.to_string().red()),
        }
    }
}

fn iterator_example() {
    let mut cursor = roster();
    while cursor.has_next() {
        if let Some(entry) = cursor.next() {
            println!("  {}", entry);
        }
    }
    println!("Exhausted: {:?}", cursor.next());
    cursor.rewind();
    println!("After rewind: {:?}", cursor.current());
}

fn decorator_example(base_sugar: u32) -> anyhow::Result<()> {
    let mut cake = Cake::with_registry(base_sugar, DecorationRegistry::standard());
    println!("Plain cake: {}", cake.get_sugar());
    cake.decorate("frosting")?;
    println!("With frosting: {}", cake.get_sugar());
    cake.decorate("sprinkles")?;
    println!("With sprinkles: {}", cake.get_sugar());
    cake.undecorate("frosting");
    println!("Without frosting: {}", cake.get_sugar());
    if let Err(e) = cake.decorate("unknown") {
        println!("{}", e.to_string().red());
    }
    Ok(())
}

fn strategy_example() -> anyhow::Result<()> {
    let mut general = spawn_general();
    if let Err(e) = general.wage_war() {
        println!("{}", e.to_string().red());
    }
    general.set_strategy(Pincer);
    println!("Pincer: {}", general.wage_war()?);
    general.set_strategy(Diplomacy);
    println!("Diplomacy: {}", general.wage_war()?);
    Ok(())
}

fn facade_example() -> anyhow::Result<()> {
    println!("{}", SpellFacade::new(Sorcerer::new("Merlin")).invoke("fireball")?);
    println!("{}", SpellFacade::new(Enchanter::new("Morgana")).invoke("sleep")?);
    if let Err(e) = SpellFacade::new(Apprentice).invoke("anything") {
        println!("{}", e.to_string().red());
    }
    Ok(())
}

fn adapter_example() -> anyhow::Result<()> {
    let mut adapted = DvrController::new(LegacyAdapter::new(LegacyDvr::default()));
    println!("Legacy via adapter: {}", adapted.start_playback()?);
    println!("Legacy via adapter: {}", adapted.stop_playback()?);

    let mut modern = DvrController::new(ModernDvr::default());
    println!("Modern: {}", modern.start_playback()?);

    let mut bare = DvrController::new(LegacyDvr::default());
    if let Err(e) = bare.start_playback() {
        println!("{}", e.to_string().red());
    }
    Ok(())
}

fn composite_example() -> anyhow::Result<()> {
    let mut root = Node::anonymous();
    root.add_child(Node::named("A"));
    root.add_child(Node::named("B"));
    for result in root.traverse("sayName")? {
        println!("  {}", result.join(", "));
    }
    Ok(())
}

async fn proxy_example(config: &CatalogConfig) {
    let keeper = Arc::new(StockKeeper::from_config(&config.proxy));
    let book_keeper = BookKeeper::new(Arc::clone(&keeper));

    book_keeper
        .get_inventory_with(|stock| println!("First request: {} in stock", stock))
        .await;
    book_keeper
        .get_inventory_with(|stock| println!("Second request (cached): {} in stock", stock))
        .await;
    println!("Expensive counts: {}", keeper.counts());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => CatalogConfig::load(&path)
            .with_context(|| format!("loading config from {}", path))?,
        None => CatalogConfig::default(),
    };

    if let Err(e) = logging::init(&config.log_level) {
        warn!("logging already initialised: {}", e);
    }

    println!("{}", "Design Patterns Catalog".bold());

    heading("Singleton Pattern");
    singleton_example();

    heading("Factory Pattern");
    factory_example();

    heading("Iterator Pattern");
    iterator_example();

    heading("Decorator Pattern");
    decorator_example(config.cake.base_sugar)?;

    heading("Strategy Pattern");
    strategy_example()?;

    heading("Facade Pattern");
    facade_example()?;

    heading("Proxy Pattern");
    proxy_example(&config).await;

    heading("Adapter Pattern");
    adapter_example()?;

    heading("Composite Pattern");
    composite_example()?;

    Ok(())
}

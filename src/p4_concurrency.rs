// Pattern 4: Concurrency Patterns - Caching Proxy over an Async Resource
// A bookkeeper fronts an expensive stock count and remembers the answer.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::ProxyConfig;

// ============================================================================
// Example: The Expensive Subject
// ============================================================================

#[derive(Debug)]
pub struct StockKeeper {
    stock: u32,
    delay: Duration,
    counts: AtomicUsize,
}

impl StockKeeper {
    pub fn new(stock: u32, delay: Duration) -> Self {
        Self {
            stock,
            delay,
            counts: AtomicUsize::new(0),
        }
    }

    pub fn from_config(config: &ProxyConfig) -> Self {
        Self::new(config.stock, config.count_delay())
    }

    // Simulated slow count; resolves after the configured delay.
    pub async fn count_stock(&self) -> u32 {
        self.counts.fetch_add(1, Ordering::SeqCst);
        info!(delay_ms = self.delay.as_millis() as u64, "counting stock");
        sleep(self.delay).await;
        self.stock
    }

    // How many times the expensive count has run.
    pub fn counts(&self) -> usize {
        self.counts.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Example: Caching Proxy with Single-Flight
// ============================================================================

// Proxy in front of a `StockKeeper`. The first caller pays for the count;
// concurrent callers wait on that same count instead of starting their own.
#[derive(Debug)]
pub struct BookKeeper {
    keeper: Arc<StockKeeper>,
    cache: OnceCell<u32>,
}

impl BookKeeper {
    pub fn new(keeper: Arc<StockKeeper>) -> Self {
        Self {
            keeper,
            cache: OnceCell::new(),
        }
    }

    pub async fn get_inventory(&self) -> u32 {
        if let Some(stock) = self.cache.get() {
            debug!(stock, "inventory cache hit");
            return *stock;
        }
        *self
            .cache
            .get_or_init(|| async { self.keeper.count_stock().await })
            .await
    }

    // Continuation-style access; `callback` runs exactly once per call.
    pub async fn get_inventory_with<F>(&self, callback: F)
    where
        F: FnOnce(u32),
    {
        let stock = self.get_inventory().await;
        callback(stock);
    }

    pub fn cached(&self) -> Option<u32> {
        self.cache.get().copied()
    }

    // Forget the cached count; the next request counts again.
    pub fn invalidate(&mut self) {
        self.cache.take();
    }

    pub fn keeper(&self) -> &StockKeeper {
        &self.keeper
    }
}

// ============================================================================
// Tests
// ============================================================================

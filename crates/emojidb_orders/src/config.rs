//! Order book configuration.

use emojidb_core::Config;
use std::path::PathBuf;

/// Default limit on open orders.
pub const DEFAULT_MAX_ORDERS: usize = 5;

/// Configuration for opening an [`OrderBook`](crate::OrderBook).
#[derive(Debug, Clone)]
pub struct OrderBookConfig {
    /// Maximum number of open orders.
    pub max_orders: usize,

    /// Configuration of the underlying store.
    ///
    /// Defaults to force-create, so every process starts with an empty book
    /// and a freshly seeded menu.
    pub store: Config,
}

impl Default for OrderBookConfig {
    fn default() -> Self {
        Self {
            max_orders: DEFAULT_MAX_ORDERS,
            store: Config::default().force_create(),
        }
    }
}

impl OrderBookConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of open orders.
    #[must_use]
    pub fn max_orders(mut self, max: usize) -> Self {
        self.max_orders = max;
        self
    }

    /// Sets the store configuration.
    #[must_use]
    pub fn store(mut self, store: Config) -> Self {
        self.store = store;
        self
    }

    /// Sets the directory holding the backing file.
    #[must_use]
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.store = self.store.data_dir(dir);
        self
    }
}

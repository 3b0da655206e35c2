//! # EmojiDB Orders
//!
//! A restaurant order book kept in an EmojiDB store named `👨‍🍳`.
//!
//! The store holds three entities:
//!
//! | Entity | Fields | Holds |
//! |--------|--------|-------|
//! | `📑` | `🆔 🕓 🪑` | open orders: id, creation time, table |
//! | `🗒` | `📑 🍽 🔢` | order lines: order id, dish, quantity |
//! | `🍴` | `🍽 🧟` | the menu: dish, special flag (`✅`/`❌`) |
//!
//! The views returned by [`OrderBook`] implement `serde::Serialize`, ready to
//! be sent by an HTTP layer.
//!
//! ## Example
//!
//! ```rust
//! use emojidb_orders::{OrderBook, OrderLine};
//!
//! let mut book = OrderBook::open_in_memory().unwrap();
//! book.create_order(3, &[OrderLine::new("🥗", 1)]).unwrap();
//! book.create_order(5, &[OrderLine::new("🥩", 2)]).unwrap();
//!
//! // 🥩 is special, so its order is served first.
//! let next = book.take_next_order().unwrap().unwrap();
//! assert_eq!(next.table, 5);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod book;
mod config;
mod error;
mod model;

pub use book::{OrderBook, MENU, ORDERS, ORDER_LINES, STORE_NAME};
pub use config::{OrderBookConfig, DEFAULT_MAX_ORDERS};
pub use error::{OrderError, OrderResult};
pub use model::{Dish, Order, OrderLine};

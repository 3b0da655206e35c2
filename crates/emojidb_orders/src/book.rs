//! The order book: orders, order lines and the menu in one store.

use crate::config::{OrderBookConfig, DEFAULT_MAX_ORDERS};
use crate::error::{OrderError, OrderResult};
use crate::model::{Dish, Order, OrderLine};
use emojidb_core::{CoreError, Database, Entity, Record, Value};
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the order book store.
pub const STORE_NAME: &str = "👨‍🍳";

/// Entity holding one record per open order.
pub const ORDERS: &str = "📑";
/// Entity holding one record per ordered dish.
pub const ORDER_LINES: &str = "🗒";
/// Entity holding the menu.
pub const MENU: &str = "🍴";

const ID: &str = "🆔";
const CREATED_AT: &str = "🕓";
const TABLE: &str = "🪑";
const ORDER: &str = "📑";
const DISH: &str = "🍽";
const QUANTITY: &str = "🔢";
const SPECIAL: &str = "🧟";

const YES: &str = "✅";
const NO: &str = "❌";

/// Dishes every new menu starts with.
const MENU_SEED: [(&str, bool); 3] = [("🥗", false), ("🥩", true), ("🍌", false)];

/// A restaurant order queue persisted in an EmojiDB store.
///
/// Orders are served first in, first out, except that an order containing
/// a special dish jumps to the front of the queue.
pub struct OrderBook {
    db: Database,
    max_orders: usize,
}

impl OrderBook {
    /// Opens the order book described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or initialized.
    pub fn open(config: OrderBookConfig) -> OrderResult<Self> {
        let db = Database::open_with_config(STORE_NAME, config.store)?;
        Self::with_database(db, config.max_orders)
    }

    /// Opens an empty order book backed by memory only.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized.
    pub fn open_in_memory() -> OrderResult<Self> {
        Self::with_database(Database::open_in_memory(STORE_NAME)?, DEFAULT_MAX_ORDERS)
    }

    /// Builds an order book on an already opened store.
    ///
    /// Missing entities are created. The menu is seeded only when it is
    /// created, so a reloaded book keeps its orders and menu.
    ///
    /// # Errors
    ///
    /// Returns an error if creating an entity or seeding the menu fails.
    pub fn with_database(mut db: Database, max_orders: usize) -> OrderResult<Self> {
        ensure_entity(&mut db, ORDERS, &[ID, CREATED_AT, TABLE])?;
        ensure_entity(&mut db, ORDER_LINES, &[ORDER, DISH, QUANTITY])?;
        if ensure_entity(&mut db, MENU, &[DISH, SPECIAL])? {
            let mut menu = db.entity_mut(MENU)?;
            for (name, special) in MENU_SEED {
                menu.create_record(false)
                    .set(DISH, name)?
                    .set(SPECIAL, if special { YES } else { NO })?
                    .insert()?;
            }
        }

        tracing::info!(store = %db.location(), max_orders, "order book ready");
        Ok(Self { db, max_orders })
    }

    /// Returns the configured limit on open orders.
    #[must_use]
    pub fn max_orders(&self) -> usize {
        self.max_orders
    }

    /// Returns the underlying store.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Places an order for `table`.
    ///
    /// The new order gets an id one above the highest open id. It is queued
    /// last, or first if any of its dishes is special.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::TooManyOrders`] when the book is full, or a
    /// schema error if a dish name cannot be stored. Nothing is written in
    /// either case.
    pub fn create_order(&mut self, table: u64, dishes: &[OrderLine]) -> OrderResult<Order> {
        let orders = self.entity(ORDERS)?;
        if orders.len() >= self.max_orders {
            return Err(OrderError::TooManyOrders {
                max: self.max_orders,
            });
        }
        let id = orders
            .records()
            .filter_map(|r| r.get_integer(ID).ok().flatten())
            .max()
            .map_or(1, |max| max + 1);

        let lines = self.entity(ORDER_LINES)?.schema();
        let dish_index = lines.position(DISH)?;
        for dish in dishes {
            lines.validate(dish_index, &Value::text(dish.name.as_str()))?;
        }

        let specials: Vec<String> = self
            .dishes()?
            .into_iter()
            .filter(|d| d.special)
            .map(|d| d.name)
            .collect();
        let priority = dishes.iter().any(|d| specials.contains(&d.name));

        self.db
            .entity_mut(ORDERS)?
            .create_record(priority)
            .set(ID, id)?
            .set(CREATED_AT, now_millis())?
            .set(TABLE, table)?
            .insert()?;

        let mut lines = self.db.entity_mut(ORDER_LINES)?;
        for dish in dishes {
            lines
                .create_record(false)
                .set(ORDER, id)?
                .set(DISH, dish.name.as_str())?
                .set(QUANTITY, dish.quantity)?
                .insert()?;
        }

        tracing::debug!(id, table, priority, lines = dishes.len(), "order created");
        self.order(id)
    }

    /// Returns the open order with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::OrderNotFound`] if no open order has that id.
    pub fn order(&self, id: u64) -> OrderResult<Order> {
        let record = self
            .entity(ORDERS)?
            .first_where(ID, id)?
            .ok_or(OrderError::OrderNotFound { id })?;
        self.order_view(record)
    }

    /// Returns all open orders in serving order.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored order is malformed.
    pub fn orders(&self) -> OrderResult<Vec<Order>> {
        self.entity(ORDERS)?
            .records()
            .map(|record| self.order_view(record))
            .collect()
    }

    /// Deletes every order and order line, returning how many orders were
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn delete_orders(&mut self) -> OrderResult<usize> {
        self.db.entity_mut(ORDER_LINES)?.remove_all()?;
        let removed = self.db.entity_mut(ORDERS)?.remove_all()?;
        tracing::debug!(removed, "orders deleted");
        Ok(removed)
    }

    /// Removes and returns the order at the head of the queue, together
    /// with its lines. Returns `None` when no order is open.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is malformed or the store cannot be
    /// written.
    pub fn take_next_order(&mut self) -> OrderResult<Option<Order>> {
        let Some(head) = self.entity(ORDERS)?.get(0) else {
            return Ok(None);
        };
        let order = self.order_view(head)?;

        // Lines before the order: a reused id must not inherit stale lines.
        self.db
            .entity_mut(ORDER_LINES)?
            .remove_where(ORDER, order.id)?;
        self.db.entity_mut(ORDERS)?.remove_first()?;
        tracing::debug!(id = order.id, "order taken");
        Ok(Some(order))
    }

    /// Returns the menu.
    ///
    /// # Errors
    ///
    /// Returns an error if a menu record is malformed.
    pub fn dishes(&self) -> OrderResult<Vec<Dish>> {
        self.entity(MENU)?
            .records()
            .map(|record| {
                Ok(Dish {
                    name: text_field(record, DISH)?.to_string(),
                    special: text_field(record, SPECIAL)? == YES,
                })
            })
            .collect()
    }

    fn entity(&self, name: &str) -> OrderResult<&Entity> {
        self.db
            .entity(name)
            .ok_or_else(|| CoreError::entity_not_found(name).into())
    }

    fn order_view(&self, record: &Record) -> OrderResult<Order> {
        let id = integer_field(record, ID)?;
        let dishes = self
            .entity(ORDER_LINES)?
            .records_where(ORDER, id)?
            .into_iter()
            .map(|line| {
                Ok(OrderLine {
                    name: text_field(line, DISH)?.to_string(),
                    quantity: integer_field(line, QUANTITY)?,
                })
            })
            .collect::<OrderResult<_>>()?;

        Ok(Order {
            id,
            table: integer_field(record, TABLE)?,
            dishes,
            created_at: integer_field(record, CREATED_AT)?,
        })
    }
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBook")
            .field("db", &self.db)
            .field("max_orders", &self.max_orders)
            .finish()
    }
}

/// Creates `name` unless an entity with exactly these fields exists.
/// Returns true if the entity was created.
fn ensure_entity(db: &mut Database, name: &str, fields: &[&str]) -> OrderResult<bool> {
    if db.entity(name).is_some_and(|e| e.fields() == fields) {
        return Ok(false);
    }
    db.create_entity(name, fields.iter().copied())?;
    Ok(true)
}

fn invalid(record: &Record, field: &str) -> OrderError {
    OrderError::InvalidRecord {
        entity: record.schema().entity().to_string(),
        field: field.to_string(),
    }
}

fn integer_field(record: &Record, field: &str) -> OrderResult<u64> {
    record
        .get_integer(field)?
        .ok_or_else(|| invalid(record, field))
}

fn text_field<'r>(record: &'r Record, field: &str) -> OrderResult<&'r str> {
    record.get_text(field)?.ok_or_else(|| invalid(record, field))
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use emojidb_core::OpenMode;
    use emojidb_storage::InMemoryBackend;

    fn book() -> OrderBook {
        OrderBook::open_in_memory().unwrap()
    }

    fn ids(book: &OrderBook) -> Vec<u64> {
        book.orders().unwrap().iter().map(|o| o.id).collect()
    }

    #[test]
    fn menu_is_seeded() {
        let dishes = book().dishes().unwrap();
        let names: Vec<_> = dishes.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["🥗", "🥩", "🍌"]);
        let specials: Vec<_> = dishes.iter().filter(|d| d.special).collect();
        assert_eq!(specials.len(), 1);
        assert_eq!(specials[0].name, "🥩");
    }

    #[test]
    fn create_and_fetch_order() {
        let mut book = book();
        let order = book
            .create_order(4, &[OrderLine::new("🥗", 2), OrderLine::new("🍌", 1)])
            .unwrap();
        assert_eq!(order.id, 1);
        assert_eq!(order.table, 4);
        assert_eq!(
            order.dishes,
            vec![OrderLine::new("🥗", 2), OrderLine::new("🍌", 1)]
        );
        assert!(order.created_at > 0);
        assert_eq!(book.order(1).unwrap(), order);
    }

    #[test]
    fn special_orders_jump_the_queue() {
        let mut book = book();
        book.create_order(1, &[OrderLine::new("🥗", 1)]).unwrap();
        book.create_order(2, &[OrderLine::new("🍌", 1)]).unwrap();
        book.create_order(3, &[OrderLine::new("🥩", 1)]).unwrap();
        assert_eq!(ids(&book), vec![3, 1, 2]);
    }

    #[test]
    fn order_limit() {
        let mut book = OrderBook::with_database(Database::open_in_memory(STORE_NAME).unwrap(), 2)
            .unwrap();
        book.create_order(1, &[]).unwrap();
        book.create_order(2, &[]).unwrap();
        let err = book.create_order(3, &[]).unwrap_err();
        assert!(matches!(err, OrderError::TooManyOrders { max: 2 }));
        assert_eq!(
            err.to_string(),
            "maximum number of orders exceeded (max. 2 orders)"
        );
    }

    #[test]
    fn missing_order() {
        let err = book().order(9).unwrap_err();
        assert!(matches!(err, OrderError::OrderNotFound { id: 9 }));
        assert!(err.is_not_found());
    }

    #[test]
    fn invalid_dish_writes_nothing() {
        let mut book = book();
        let err = book
            .create_order(1, &[OrderLine::new("🥗", 1), OrderLine::new("🥗📑", 1)])
            .unwrap_err();
        assert!(matches!(err, OrderError::Core(CoreError::InvalidValue { .. })));
        assert!(book.orders().unwrap().is_empty());
        assert!(book.database().entity(ORDER_LINES).unwrap().is_empty());
    }

    #[test]
    fn delete_orders_clears_lines() {
        let mut book = book();
        book.create_order(1, &[OrderLine::new("🥗", 1)]).unwrap();
        book.create_order(2, &[OrderLine::new("🍌", 3)]).unwrap();
        assert_eq!(book.delete_orders().unwrap(), 2);
        assert!(book.orders().unwrap().is_empty());
        assert!(book.database().entity(ORDER_LINES).unwrap().is_empty());
        assert_eq!(book.create_order(1, &[]).unwrap().id, 1);
    }

    #[test]
    fn take_next_order_is_fifo() {
        let mut book = book();
        book.create_order(1, &[OrderLine::new("🥗", 1)]).unwrap();
        book.create_order(2, &[OrderLine::new("🍌", 2)]).unwrap();

        let first = book.take_next_order().unwrap().unwrap();
        assert_eq!(first.table, 1);
        assert_eq!(first.dishes, vec![OrderLine::new("🥗", 1)]);
        assert_eq!(ids(&book), vec![2]);
        assert_eq!(book.database().entity(ORDER_LINES).unwrap().len(), 1);

        book.take_next_order().unwrap().unwrap();
        assert!(book.take_next_order().unwrap().is_none());
    }

    #[test]
    fn ids_continue_after_take() {
        let mut book = book();
        book.create_order(1, &[]).unwrap();
        book.create_order(2, &[]).unwrap();
        book.take_next_order().unwrap();
        assert_eq!(book.create_order(3, &[]).unwrap().id, 3);
    }

    #[test]
    fn failed_take_keeps_order_and_lines() {
        let backend = InMemoryBackend::new();
        let db = Database::open_with_backend(
            STORE_NAME,
            OpenMode::ForceCreate,
            Box::new(backend.clone()),
        )
        .unwrap();
        let mut book = OrderBook::with_database(db, DEFAULT_MAX_ORDERS).unwrap();
        book.create_order(1, &[OrderLine::new("🥗", 1)]).unwrap();

        backend.fail_writes(true);
        assert!(book.take_next_order().is_err());
        assert_eq!(ids(&book), vec![1]);
        assert_eq!(book.database().entity(ORDER_LINES).unwrap().len(), 1);

        backend.fail_writes(false);
        let order = book.take_next_order().unwrap().unwrap();
        assert_eq!(order.dishes, vec![OrderLine::new("🥗", 1)]);
        assert!(book.database().entity(ORDER_LINES).unwrap().is_empty());

        // A reused id starts without lines.
        let next = book.create_order(2, &[]).unwrap();
        assert_eq!(next.id, 1);
        assert!(book.order(1).unwrap().dishes.is_empty());
    }

    #[test]
    fn reloaded_book_keeps_orders() {
        let backend = InMemoryBackend::new();
        let open = |mode| {
            let db = Database::open_with_backend(STORE_NAME, mode, Box::new(backend.clone()))
                .unwrap();
            OrderBook::with_database(db, DEFAULT_MAX_ORDERS).unwrap()
        };

        let mut book = open(OpenMode::LoadOrCreate);
        book.create_order(7, &[OrderLine::new("🥩", 1)]).unwrap();

        let book = open(OpenMode::LoadOrCreate);
        assert_eq!(book.orders().unwrap().len(), 1);
        assert_eq!(book.dishes().unwrap().len(), 3);

        let book = open(OpenMode::ForceCreate);
        assert!(book.orders().unwrap().is_empty());
    }
}

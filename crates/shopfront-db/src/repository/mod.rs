//! # Repository Module
//!
//! Database repository implementations for Shopfront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().list(&filter)                                   │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list(&self, filter)                                               │
//! │  ├── page(&self, number, size)                                         │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── insert(&self, product)                                            │
//! │  └── update_price(&self, id, cents)                                    │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Registration and login checks
//! - [`ProductRepository`](product::ProductRepository) - Catalog reads, insert, price update
//! - [`OrderRepository`](order::OrderRepository) - Placed orders with items
//!
//! Writes that must be atomic across tables (placing an order) go through
//! [`crate::unit_of_work`] instead.

pub mod customer;
pub mod order;
pub mod product;

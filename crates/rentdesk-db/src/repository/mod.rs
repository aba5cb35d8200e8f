//! # Repository Module
//!
//! Database repository implementations for RentalDesk.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.orders().create(&draft, &details)                          │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── create(&self, draft, details)                                     │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list(&self)                                                       │
//! │  └── update_status(&self, id, status)                                  │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Repositories test against an in-memory database                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer CRUD
//! - [`product::ProductRepository`] - Rental catalog CRUD
//! - [`order::OrderRepository`] - Order placement, lookup, lifecycle
//! - [`vehicle::VehicleRepository`] - Delivery vehicle lookup

pub mod customer;
pub mod order;
pub mod product;
pub mod vehicle;

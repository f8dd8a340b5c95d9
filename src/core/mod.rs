//! Core business logic - framework-agnostic operations over a `SeaORM` connection.
//!
//! The API handlers and the maintenance CLI are thin shells over these modules.

/// Login, sessions, registration and password resets
pub mod auth;
/// General operating bills
pub mod bill;
/// Dashboard statistics
pub mod dashboard;
/// Employee records and identifier numbering
pub mod employee;
/// One-shot administrative routines
pub mod maintenance;
/// Orders and their cost/ingredient estimates
pub mod order;
/// Recipes and per-unit costs
pub mod recipe;
/// Shopping reviews and their approval flow
pub mod review;
/// Shopping list items and shopping bills
pub mod shopping;
/// Monthly revenue/expenditure summaries
pub mod summary;
/// User listing and role management
pub mod user;

//! API Routes
//!
//! Route handlers organized by functionality.

pub mod chat;
pub mod foods;
pub mod health;
pub mod logs;
pub mod users;

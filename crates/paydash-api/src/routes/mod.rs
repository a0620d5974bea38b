//! Route modules

pub mod settings;
pub mod transactions;

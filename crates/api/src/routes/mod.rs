//! Route Handlers

pub mod form;
pub mod predictions;
pub mod reports;

//! HTTP handlers

pub mod auth;
pub mod demo;
pub mod health;
pub mod metrics;
pub mod order;
pub mod payment;
pub mod product;

//! API handlers for Circulade REST endpoints

pub mod health;
pub mod openapi;
pub mod overdues;
pub mod sanctions;

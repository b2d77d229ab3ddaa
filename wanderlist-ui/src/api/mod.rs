//! Ranking Service API

mod client;

pub use client::*;

//! DomeWatch sync service
//!
//! Keeps a store of video stream records synchronized with live, upcoming and
//! ended broadcasts from a fixed set of office-owned YouTube channels. Two
//! entry points (feed discovery and the active-set refresher) drive the same
//! per-video resolve -> map -> upsert chain, with a featured-video side
//! effect for the designated floor offices.

pub mod config;
pub mod database;
pub mod errors;
pub mod ingestor;
pub mod models;
pub mod sources;
pub mod utils;
pub mod web;

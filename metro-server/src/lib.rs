//! Transit map network server.
//!
//! Stations with map coordinates are joined by undirected segments. Lines
//! are declared as station sequences and compiled into segments, and the
//! resulting graph answers ranked shortest-path queries.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;

//! duiadns: DUIA DNS dynamic address updater
//!
//! A library for publishing a host's public IPv4/IPv6 addresses to the
//! DUIA DNS dynamic-DNS service, preferring stable IPv6 addresses over
//! temporary privacy addresses and skipping updates that would not change
//! anything.

pub mod address;
pub mod cache;
pub mod config;
pub mod http;
pub mod network;
pub mod provider;
pub mod resolver;
pub mod update;

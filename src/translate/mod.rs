//! Translation dispatch — prompt construction and the per-provider
//! request/response adapters (`client`, `wire`).

pub mod client;
pub mod wire;

pub use client::Translator;

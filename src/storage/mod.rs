//! Durable local storage.
//!
//! Models the flat key/value storage area the credential store and
//! migration logic persist into (`local`).

pub mod local;

pub use local::LocalStore;

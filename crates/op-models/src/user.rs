//! Users: accounts that author, get assigned and get notified

pub mod model;

pub use model::*;

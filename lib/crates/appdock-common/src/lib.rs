//! Wire types exchanged with the appdock backend, the public app catalog and
//! the DNS provider API.

pub mod types;

pub use types::*;

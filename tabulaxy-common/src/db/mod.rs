//! Database schema, reference data and word storage

pub mod init;
pub mod seed;
pub mod words;

pub use init::*;
pub use seed::*;
pub use words::*;

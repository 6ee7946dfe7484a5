pub mod config;
pub mod error;
pub mod relay;

pub mod sns;
pub mod stream;

pub use config::{Config, FilterMode};
pub use error::{Error, Result};
pub use relay::{Outcome, Relay};

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::ZenConfig;
pub use error::{Result, ZenError};
pub use events::TriageEvent;
pub use types::*;

/// Implemented RL algorithms
pub mod algo;

/// Data structures
pub mod ds;

/// Environment
pub mod env;

/// Errors
pub mod error;

/// Transitions
pub mod exp;

/// Behavior policies
pub mod policy;

/// Training loop
pub mod train;

/// Testing environments
#[cfg(feature = "gym")]
pub mod gym;

/// Terminal visualization
#[cfg(feature = "viz")]
pub mod viz;

#[doc(hidden)]
pub mod util;

pub use error::{Error, Result};

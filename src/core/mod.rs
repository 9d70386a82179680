pub mod error;
pub mod money;

pub use error::{OrderError, Result};
pub use money::{Money, Rate};

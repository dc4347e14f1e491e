mod default;
mod traits;

pub use default::*;
pub use traits::*;

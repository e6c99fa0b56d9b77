// Application layer: the session a client drives, plus the conversions
// from user-entered text into domain values.

pub mod error;
pub mod input;
pub mod session;

pub use error::*;
pub use input::*;
pub use session::*;

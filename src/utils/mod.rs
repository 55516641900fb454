pub mod clock;
pub mod errors;
pub mod time_format;

pub use clock::{Clock, ManualClock, SystemClock};
pub use errors::Error;
pub use time_format::time_format;

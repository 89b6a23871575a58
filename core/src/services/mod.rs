//! Business services containing domain logic and use cases.

pub mod clock;
pub mod password;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use password::PasswordHasher;
pub use session::{SessionConfig, SessionService};
pub use token::{TokenCodec, ACCESS_TOKEN_ALGORITHM};

pub mod errors;
pub mod id;

pub use errors::{ConfigError, RmchatError, StoreError};
pub use id::{new_id, SessionId};

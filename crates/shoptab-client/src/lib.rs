pub mod realtime;

pub use realtime::{Credentials, RealtimeClient};

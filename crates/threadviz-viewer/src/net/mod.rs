pub mod client;
pub mod fetch;
pub mod protocol;

pub use client::ThreadClient;
pub use fetch::{Fetcher, ThreadSource};
pub use protocol::{ThreadEvent, ThreadEventKind};

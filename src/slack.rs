mod message;
mod notifier;

pub use message::*;
pub use notifier::*;

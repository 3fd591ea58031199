pub mod pin_message;
pub mod unpin_message;

pub use pin_message::*;
pub use unpin_message::*;

pub mod copy;
pub mod delete;
pub mod edit_caption;
pub mod edit_live_location;
pub mod edit_media;
pub mod edit_reply_markup;
pub mod edit_text;
pub mod stop_live_location;

pub use copy::*;
pub use delete::*;
pub use edit_caption::*;
pub use edit_live_location::*;
pub use edit_media::*;
pub use edit_reply_markup::*;
pub use edit_text::*;
pub use stop_live_location::*;

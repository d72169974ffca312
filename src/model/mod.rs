//! Core data model types for messages, attachments, and result pages.

pub mod attachment;
pub mod message;

pub use attachment::Attachment;
pub use message::{Message, MessagePage};

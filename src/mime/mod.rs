//! MIME-level decoding: envelope header fields and raw body literals.

pub mod header;
pub mod walker;

//! Wire format of the generate endpoint.

pub mod decoder;
pub mod encoder;
pub mod layout;

pub use decoder::{decode, decode_with};
pub use encoder::{encode, encode_with, Attachment};
pub use layout::{WireLayout, CURRENT};

//! Turning calendar values into text, and text back into them.

pub mod custom;
pub mod iso;
pub mod strict;

pub use self::custom::{DateFormat, Field, FormatError};
pub use self::iso::{ISO, ISOString};

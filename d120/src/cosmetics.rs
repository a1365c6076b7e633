//! Decorative generators. Nothing in here affects which choice wins.

pub mod marble;
pub mod particles;
pub mod spin;

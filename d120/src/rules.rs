pub mod choice;
pub mod color;
pub mod partition;

pub mod roller;
pub mod tally;

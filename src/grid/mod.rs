pub mod error;
pub mod longitude;
pub mod partition;

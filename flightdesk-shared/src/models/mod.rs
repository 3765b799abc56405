pub mod flight;
pub mod status;

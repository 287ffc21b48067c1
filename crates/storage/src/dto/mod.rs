pub mod common;
pub mod participant;
pub mod upload;
pub mod winner;

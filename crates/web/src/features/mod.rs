pub mod participants;
pub mod uploads;
pub mod winners;

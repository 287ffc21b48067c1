mod participant;
mod winner;

pub use participant::Participant;
pub use winner::Winner;

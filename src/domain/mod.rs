pub mod equipment;
pub mod filter;
pub mod maintenance;
pub mod preview;
pub mod reservation;
pub mod scheduler;

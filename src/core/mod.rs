pub mod config;
pub mod preferences;
pub mod scheduler;


pub use config::*;
pub use preferences::*;
pub use scheduler::Scheduler;

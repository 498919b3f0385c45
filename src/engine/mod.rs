//! Bounded-concurrency run loop: schedule a wave, execute it, fold it, repeat.
mod driver;
mod scheduler;


pub use driver::{Engine, RunPlan, make_it};
pub use scheduler::next_batch_size;

pub mod evaluator;
pub mod message;
pub mod process_checker;
pub mod process_collector;
pub mod status;

pub use evaluator::{run_check, CheckOutcome, PatternOutcome};
pub use process_collector::ProcessCollector;

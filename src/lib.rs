
pub mod addr;
pub mod branch;
pub mod error;
pub mod events;
pub mod history;
pub mod predictor;
pub mod sim;
pub mod stats;
pub mod trace;

pub use addr::*;
pub use branch::*;
pub use error::*;
pub use events::*;
pub use history::*;
pub use predictor::*;
pub use sim::*;
pub use stats::*;
pub use trace::*;

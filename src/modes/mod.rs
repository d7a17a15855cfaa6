pub mod headless;
pub mod human;

pub use headless::{CautiousAgent, HeadlessConfig, HeadlessMode, SignalFrontend};
pub use human::HumanMode;

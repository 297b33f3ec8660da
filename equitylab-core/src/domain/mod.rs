//! Domain types for EquityLab

pub mod cap_table;
pub mod scenario;
pub mod share_class;

pub use cap_table::CapTable;
pub use scenario::ExitScenario;
pub use share_class::{Participation, ShareClass};

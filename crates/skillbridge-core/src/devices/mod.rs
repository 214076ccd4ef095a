//! Replaceable adapters behind the port traits.
//!
//! None of these talk to real hardware. `SimulatedThermostat` keeps the
//! device state in memory (optionally mirrored to a JSON file),
//! `ReadingStore` reads ambient temperatures from a JSON document, and
//! `FixedReading` returns a constant.

mod grants;
mod reading_store;
mod simulated;

pub use grants::{InMemoryGrants, StoredGrant};
pub use reading_store::{FixedReading, ReadingStore};
pub use simulated::{SimulatedThermostat, ThermostatState};

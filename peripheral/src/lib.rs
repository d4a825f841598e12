pub mod host;
pub mod io;
pub mod peripheral_state;
pub mod script;

pub use host::Host;
pub use io::{BusError, MMIOHandler};
pub use io::slam::{Monitor, Slam, SlamConfig};
pub use peripheral_state::{ControlFlags, PeripheralState, Position};

pub mod coordinate;
pub mod messages;
pub mod route;
pub mod selection;

pub use coordinate::{format_coordinate, parse_coordinate, Coordinate};
pub use messages::{Message, MessageLevel, MessageLog};
pub use route::{RankedResult, RouteCandidate};
pub use selection::SelectionState;

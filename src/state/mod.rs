pub mod oracle;
pub mod position;
pub mod slot0;
pub mod tick;

pub use oracle::Oracle;
pub use position::{PositionInfo, PositionKey};
pub use slot0::Slot0;
pub use tick::TickInfo;

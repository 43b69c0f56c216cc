pub mod error;
pub mod event;
pub mod module;
pub mod refresh;
pub mod shutdown;
pub mod text;

pub use error::{BarError, Result};
pub use event::BarEvent;
pub use module::{Module, Producer, Registry, RegistryBuilder, Zone, FALLBACK_TEXT};
pub use refresh::refresh_all;
pub use shutdown::ShutdownFlag;
pub use text::{BoundedText, MODULE_TEXT_CAPACITY};

// Fri Oct 16 2026 - Alex

pub mod access;
pub mod error;
pub mod offset_set;
pub mod source;
pub mod view;
pub mod width;

pub use access::ViewAccessor;
pub use error::MemoryError;
pub use offset_set::OffsetSet;
pub use source::{MemorySource, SharedBuffer};
pub use view::TypedView;
pub use width::ViewWidth;

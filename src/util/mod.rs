//! Small pure helpers shared by the views and `dashctl`.

pub mod clipboard;
pub mod explorer;
pub mod format;

pub use explorer::ExplorerChain;

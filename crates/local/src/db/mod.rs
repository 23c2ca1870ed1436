pub mod files;
pub mod layout;

pub use layout::DatabaseFiles;

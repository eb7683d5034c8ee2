//! Document domain entities.

pub mod category;
pub mod change;
pub mod file_type;
pub mod model;
pub mod status;
pub mod version;
pub mod version_number;

pub use category::DocumentCategory;
pub use change::DocumentChange;
pub use file_type::FileType;
pub use model::{Document, DocumentOptions, FileUpload, UpdateDocument};
pub use status::DocumentStatus;
pub use version::DocumentVersion;
pub use version_number::VersionNumber;

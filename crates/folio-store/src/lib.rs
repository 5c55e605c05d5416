//! Document store for the portfolio desktop.
//!
//! Two tables live here: `projects`, read by the Projects window, and
//! `contactMessages`, appended to by the contact form. Callers talk to the
//! store through [`DataService`]; [`JsonFileStore`] keeps documents on disk
//! and [`MemoryStore`] keeps them in process.

pub mod error;
pub mod file;
pub mod memory;
pub mod model;
pub mod service;

pub use error::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use model::{ContactMessage, DocumentId, Project, StoredContactMessage};
pub use service::{DataService, validate_contact_message};

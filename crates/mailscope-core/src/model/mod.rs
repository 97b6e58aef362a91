//! The resolved output model.

mod folder;
mod permission;

pub use folder::FolderDescriptor;
pub use permission::{FolderAccess, ObjectAccess, Permission};

/// Filesystem listing of recipe documents.
pub mod fs;

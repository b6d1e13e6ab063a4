/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the database layer and the UI layer.

/// A single browsed image as recorded in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Unique database ID, assigned on insert (insertion order)
    pub id: i64,
    /// Path exactly as it was picked; not checked for existence
    pub file_path: String,
}

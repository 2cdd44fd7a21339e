//! Options for saving boxes

/// Default number of payload bytes moved per read/write when copying.
///
/// Keeps each transfer well inside 32-bit length limits and bounds the
/// copy buffer for very large `mdat` payloads.
pub const COPY_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// Options for box serialization.
///
/// Use the builder pattern to configure options.
///
/// # Example
///
/// ```rust
/// use boxkit::SaveOptions;
///
/// let options = SaveOptions::default().chunk_size(1024 * 1024);
/// assert_eq!(options.chunk_size, 1024 * 1024);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaveOptions {
    /// Bytes copied per transfer when streaming a payload (default: 64 MiB)
    pub chunk_size: usize,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            chunk_size: COPY_CHUNK_SIZE,
        }
    }
}

impl SaveOptions {
    /// Set the copy chunk size. Values below 1 are raised to 1.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

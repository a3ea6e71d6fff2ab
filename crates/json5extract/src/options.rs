/// How the scanner resumes after a malformed candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Recovery {
    /// Resume where the cursor stopped, handing back only the last character
    /// read through the cursor's single-slot pushback.
    ///
    /// A failed candidate can swallow the start of a valid value that follows
    /// it: in `[1,,2]` the `1` is lost and only `2` is found.
    #[default]
    Forward,
    /// Replay every character of the failed candidate except its first, so
    /// scanning resumes one character past where the candidate began.
    ///
    /// Finds every value [`Recovery::Forward`] finds, and possibly more
    /// (`[1,,2]` yields `1` and `2`), at a worst-case quadratic cost on
    /// adversarial input.
    Rewind,
}

/// Configuration options for a scan.
///
/// # Examples
///
/// ```rust
/// use json5extract::{Recovery, ScanOptions, scan_str_with};
///
/// let options = ScanOptions {
///     recovery: Recovery::Rewind,
///     ..Default::default()
/// };
/// let values = scan_str_with("[1,,2]", options).unwrap();
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Recovery policy after a malformed candidate.
    ///
    /// # Default
    ///
    /// [`Recovery::Forward`]
    pub recovery: Recovery,

    /// Maximum nesting of arrays and objects. A candidate nested deeper is
    /// dropped as malformed.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            recovery: Recovery::default(),
            max_depth: 128,
        }
    }
}

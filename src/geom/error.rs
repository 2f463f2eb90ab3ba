use thiserror::Error;

/**
 * Attachment-time verification failures. Malformed data discovered at query
 * time is never an error: it surfaces as a false validity result that the
 * builder inspects. Only inconsistent buffer attachment is rejected here.
 */
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    #[error("{attr} buffer for time step {itime} holds {len} elements, expected {expected}")]
    BufferSizeMismatch {
        attr: &'static str,
        itime: usize,
        len: usize,
        expected: usize,
    },

    #[error("required {attr} buffer for time step {itime} is not attached")]
    MissingBuffer {
        attr: &'static str,
        itime: usize,
    },

    #[error("vertex attribute buffer in slot {slot} holds {len} elements, expected {expected}")]
    AttribSizeMismatch {
        slot: usize,
        len: usize,
        expected: usize,
    },

    #[error("flags buffer holds {len} entries for {expected} curve segments")]
    FlagsSizeMismatch {
        len: usize,
        expected: usize,
    },
}

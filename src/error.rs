use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecompressionError {
    #[error("Unexpected end of stream at offset {offset:#x}")]
    UnexpectedEof { offset: usize },

    #[error("Back-reference distance {distance} outside window of {capacity} bytes at offset {offset:#x}")]
    InvalidDistance {
        distance: usize,
        capacity: usize,
        offset: usize,
    },

    #[error("Window size overflows for max displacement {max_displacement:#x}")]
    InvalidWindowSize { max_displacement: usize },
}

/// Largest displacement the 13-bit match field can encode.
pub const DEFAULT_MAX_DISPLACEMENT: usize = 0x1FFF;

/// What the decoder does when an operand byte lies past the end of the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EndOfStream {
    /// Abort with [`DecompressionError::UnexpectedEof`](crate::DecompressionError::UnexpectedEof).
    #[default]
    Strict,
    /// Keep whatever has been produced (including a partial raw payload) and stop cleanly.
    Lenient,
}

/// Options for a single decode session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Window capacity is `max_displacement + 1`.
    pub max_displacement: usize,
    /// Treat `0x00` as a sub-stream separator and reset the window instead of stopping.
    pub multi_stream: bool,
    /// Stop once exactly this many bytes have been produced.
    pub target_size: Option<usize>,
    /// How a record cut off by the end of the input is handled.
    pub end_of_stream: EndOfStream,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_displacement: DEFAULT_MAX_DISPLACEMENT,
            multi_stream: false,
            target_size: None,
            end_of_stream: EndOfStream::Strict,
        }
    }

    #[must_use]
    pub const fn with_max_displacement(mut self, max_displacement: usize) -> Self {
        self.max_displacement = max_displacement;
        self
    }

    #[must_use]
    pub const fn with_multi_stream(mut self, multi_stream: bool) -> Self {
        self.multi_stream = multi_stream;
        self
    }

    #[must_use]
    pub const fn with_target_size(mut self, target_size: Option<usize>) -> Self {
        self.target_size = target_size;
        self
    }

    #[must_use]
    pub const fn with_end_of_stream(mut self, end_of_stream: EndOfStream) -> Self {
        self.end_of_stream = end_of_stream;
        self
    }

    pub(crate) const fn is_lenient(&self) -> bool {
        matches!(self.end_of_stream, EndOfStream::Lenient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecodeConfig::default();
        assert_eq!(config.max_displacement, 0x1FFF);
        assert!(!config.multi_stream);
        assert_eq!(config.target_size, None);
        assert_eq!(config.end_of_stream, EndOfStream::Strict);
    }

    #[test]
    fn test_builder_chain() {
        let config = DecodeConfig::new()
            .with_multi_stream(true)
            .with_target_size(Some(16))
            .with_max_displacement(0xFF)
            .with_end_of_stream(EndOfStream::Lenient);

        assert!(config.multi_stream);
        assert_eq!(config.target_size, Some(16));
        assert_eq!(config.max_displacement, 0xFF);
        assert!(config.is_lenient());
    }
}

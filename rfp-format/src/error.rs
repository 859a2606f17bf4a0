pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The first four bytes were not `"RFP3"`.
    #[error("not an RFP3 stream: bad magic bytes")]
    BadMagic,

    /// The cursor ran out of bytes mid-field.
    #[error("unexpected end of data at offset {offset}: needed {needed} more bytes")]
    ShortRead { offset: usize, needed: usize },

    /// A chunk tag that is not exactly four bytes was handed to the framer.
    #[error("chunk tag must be exactly 4 bytes, got {0} bytes")]
    BadChunkTag(usize),

    /// A value too large for its 16-bit wire field.
    #[error("{field} length {len} exceeds the 16-bit field limit")]
    FieldTooLong { field: &'static str, len: usize },

    /// More chunks than a 32-bit count can describe.
    #[error("chunk count exceeds 32-bit limit")]
    TooManyChunks,

    /// A string payload was not valid UTF-8.
    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 {
        field: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    /// The recipe name contains no `[A-Za-z0-9]` to derive an identifier from.
    #[error("recipe name {0:?} yields an empty identifier")]
    EmptyName(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

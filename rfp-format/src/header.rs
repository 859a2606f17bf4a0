use crate::de::Cursor;
use crate::error::{Error, Result};
use crate::ser::{put_u16, put_u32};

pub(crate) const MAGIC_BYTES: &[u8; 4] = b"RFP3";
pub(crate) const VERSION: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RfpHeader {
    pub(crate) version: u16,
    pub(crate) chunk_count: u32,
    pub(crate) flags: u16,
}

impl RfpHeader {
    pub(crate) const SIZE: usize = 18;
    /// Byte offset of `chunk_count`, back-patched after the body is emitted.
    pub(crate) const COUNT_OFFSET: usize = 8;

    pub(crate) fn new() -> RfpHeader {
        RfpHeader {
            version: VERSION,
            chunk_count: 0,
            flags: 0,
        }
    }

    pub(crate) fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(MAGIC_BYTES);
        put_u16(out, self.version);
        put_u16(out, Self::SIZE as u16);
        put_u32(out, self.chunk_count);
        put_u16(out, self.flags);
        put_u32(out, 0); // reserved
    }

    /// Overwrite the placeholder chunk count in a buffer produced by `write`.
    pub(crate) fn patch_chunk_count(buf: &mut [u8], chunk_count: u32) {
        buf[Self::COUNT_OFFSET..Self::COUNT_OFFSET + 4]
            .copy_from_slice(&chunk_count.to_le_bytes());
    }

    /// Parse the fixed header, leaving the cursor at the first chunk.
    ///
    /// The version and declared header size are read but not enforced; the
    /// magic bytes are the compatibility gate.
    pub(crate) fn parse(cur: &mut Cursor<'_>) -> Result<RfpHeader> {
        let magic = cur.take(4)?;
        if magic != MAGIC_BYTES {
            return Err(Error::BadMagic);
        }
        let version = cur.read_u16()?;
        let _header_size = cur.read_u16()?;
        let chunk_count = cur.read_u32()?;
        let flags = cur.read_u16()?;
        cur.skip(4)?; // reserved

        Ok(RfpHeader {
            version,
            chunk_count,
            flags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_18_bytes() {
        let mut buf = Vec::new();
        RfpHeader::new().write(&mut buf);
        assert_eq!(buf.len(), RfpHeader::SIZE);
        assert_eq!(&buf[0..4], b"RFP3");
        assert_eq!(&buf[4..6], &1u16.to_le_bytes());
        assert_eq!(&buf[6..8], &18u16.to_le_bytes());
    }

    #[test]
    fn patch_rewrites_count_in_place() {
        let mut buf = Vec::new();
        RfpHeader::new().write(&mut buf);
        RfpHeader::patch_chunk_count(&mut buf, 7);

        let mut cur = Cursor::new(&buf);
        let header = RfpHeader::parse(&mut cur).unwrap();
        assert_eq!(header.chunk_count, 7);
        assert_eq!(header.version, VERSION);
        assert_eq!(header.flags, 0);
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let buf = *b"XXXX\x01\x00\x12\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";
        let mut cur = Cursor::new(&buf);
        assert!(matches!(
            RfpHeader::parse(&mut cur),
            Err(Error::BadMagic)
        ));
    }

    #[test]
    fn truncated_header_is_a_short_read() {
        let mut buf = Vec::new();
        RfpHeader::new().write(&mut buf);
        buf.truncate(10);

        let mut cur = Cursor::new(&buf);
        assert!(matches!(
            RfpHeader::parse(&mut cur),
            Err(Error::ShortRead { .. })
        ));
    }
}

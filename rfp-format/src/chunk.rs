use crate::de::Cursor;
use crate::error::{Error, Result};
use crate::ser::put_u32;

pub(crate) const CHUNK_CORE: [u8; 4] = *b"CORE";
pub(crate) const CHUNK_INGR: [u8; 4] = *b"INGR";
pub(crate) const CHUNK_STEP: [u8; 4] = *b"STEP";

/// Chunk boundaries stay 8-byte aligned regardless of payload size, so a
/// future mapped reader can load headers with aligned reads.
pub(crate) const ALIGNMENT: usize = 8;

pub(crate) fn padding_for(payload_len: usize) -> usize {
    (ALIGNMENT - (payload_len % ALIGNMENT)) % ALIGNMENT
}

/// Append one framed chunk: `tag ‖ LE32(len) ‖ payload ‖ zero padding`.
///
/// Padding is part of the frame, not of `payload_size`.
pub(crate) fn write_chunk(out: &mut Vec<u8>, tag: &[u8], payload: &[u8]) -> Result<()> {
    if tag.len() != 4 {
        return Err(Error::BadChunkTag(tag.len()));
    }
    out.extend_from_slice(tag);
    put_u32(out, payload.len() as u32);
    out.extend_from_slice(payload);

    let padding = padding_for(payload.len());
    out.extend_from_slice(&[0u8; ALIGNMENT][..padding]);
    Ok(())
}

/// Consume one framed chunk, returning its tag and payload and leaving the
/// cursor past the trailing padding.
///
/// The declared payload size is trusted as-is; a corrupt oversized value
/// surfaces as `ShortRead` when the payload is taken.
pub(crate) fn read_chunk<'a>(cur: &mut Cursor<'a>) -> Result<([u8; 4], &'a [u8])> {
    let tag_bytes = cur.take(4)?;
    let tag = [tag_bytes[0], tag_bytes[1], tag_bytes[2], tag_bytes[3]];
    let payload_len = cur.read_u32()? as usize;
    let payload = cur.take(payload_len)?;
    cur.skip(padding_for(payload_len))?;
    Ok((tag, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_is_padded_to_eight_bytes() {
        for (payload_len, expected) in [(0, 8), (1, 16), (7, 16), (8, 16), (9, 24)] {
            let payload = vec![0xABu8; payload_len];
            let mut out = Vec::new();
            write_chunk(&mut out, b"TEST", &payload).unwrap();
            assert_eq!(out.len(), expected, "payload of {payload_len} bytes");
            assert_eq!(&out[4..8], &(payload_len as u32).to_le_bytes());
        }
    }

    #[test]
    fn padding_bytes_are_zero() {
        let mut out = Vec::new();
        write_chunk(&mut out, b"TEST", b"abc").unwrap();
        assert_eq!(&out[8..11], b"abc");
        assert_eq!(&out[11..16], &[0u8; 5]);
    }

    #[test]
    fn round_trips_tag_and_payload() {
        let mut out = Vec::new();
        write_chunk(&mut out, b"INGR", b"2 eggs").unwrap();

        let mut cur = Cursor::new(&out);
        let (tag, payload) = read_chunk(&mut cur).unwrap();
        assert_eq!(tag, *b"INGR");
        assert_eq!(payload, b"2 eggs");
        assert!(cur.is_empty());
    }

    #[test]
    fn rejects_tags_that_are_not_four_bytes() {
        let mut out = Vec::new();
        assert!(matches!(
            write_chunk(&mut out, b"ABC", b""),
            Err(Error::BadChunkTag(3))
        ));
        assert!(matches!(
            write_chunk(&mut out, b"ABCDE", b""),
            Err(Error::BadChunkTag(5))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn truncated_payload_is_a_short_read() {
        let mut out = Vec::new();
        write_chunk(&mut out, b"TEST", b"abcdefghij").unwrap();
        out.truncate(12);

        let mut cur = Cursor::new(&out);
        assert!(matches!(
            read_chunk(&mut cur),
            Err(Error::ShortRead { .. })
        ));
    }

    #[test]
    fn missing_padding_is_a_short_read() {
        let mut out = Vec::new();
        write_chunk(&mut out, b"TEST", b"abc").unwrap();
        out.truncate(out.len() - 2);

        let mut cur = Cursor::new(&out);
        assert!(matches!(
            read_chunk(&mut cur),
            Err(Error::ShortRead { .. })
        ));
    }
}

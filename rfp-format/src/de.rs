use crate::chunk::read_chunk;
use crate::error::{Error, Result};
use crate::header::RfpHeader;
use crate::recipe::Recipe;

/// Bounds-checked cursor over a byte slice.
///
/// Every read fails with `ShortRead` when fewer bytes remain than requested;
/// nothing is consumed on failure.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Cursor<'a> {
        Cursor { data, pos: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(Error::ShortRead {
                offset: self.pos,
                needed: len - self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub(crate) fn skip(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_str(&mut self, field: &'static str) -> Result<String> {
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        let s = std::str::from_utf8(bytes)
            .map_err(|source| Error::InvalidUtf8 { field, source })?;
        Ok(s.to_string())
    }
}

/// Parse an RFP3 stream back into a recipe.
///
/// Exactly `chunk_count` framed chunks are consumed; unknown chunk types are
/// skipped (the forward-compatibility hook) and bytes past the last chunk are
/// ignored. A second `CORE` chunk overwrites the first.
pub fn decode(data: &[u8]) -> Result<Recipe> {
    let mut cur = Cursor::new(data);
    let header = RfpHeader::parse(&mut cur)?;

    let mut recipe = Recipe::default();
    for _ in 0..header.chunk_count {
        let (tag, payload) = read_chunk(&mut cur)?;
        match &tag {
            b"CORE" => parse_core(payload, &mut recipe)?,
            b"INGR" => {
                let mut p = Cursor::new(payload);
                recipe.ingredients.push(p.read_str("ingredient")?);
            }
            b"STEP" => {
                let mut p = Cursor::new(payload);
                // The encoded index is redundant; appearance order carries
                // the ordering invariant.
                let _index = p.read_u16()?;
                recipe.steps.push(p.read_str("step")?);
            }
            unknown => {
                tracing::debug!(
                    tag = %String::from_utf8_lossy(unknown),
                    bytes = payload.len(),
                    "skipping unknown chunk"
                );
            }
        }
    }

    Ok(recipe)
}

fn parse_core(payload: &[u8], recipe: &mut Recipe) -> Result<()> {
    let mut p = Cursor::new(payload);

    recipe.properties.clear();
    let prop_count = p.read_u16()?;
    for _ in 0..prop_count {
        let key = p.read_str("property key")?;
        let value = p.read_str("property value")?;
        recipe.properties.insert(key, value);
    }
    recipe.image_ref = p.read_str("image reference")?;
    recipe.name = p.read_str("recipe name")?;
    Ok(())
}

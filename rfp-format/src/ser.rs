use crate::chunk::{write_chunk, CHUNK_CORE, CHUNK_INGR, CHUNK_STEP};
use crate::error::{Error, Result};
use crate::header::RfpHeader;
use crate::recipe::Recipe;

/// Append a u16 in little-endian format.
pub(crate) fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Append a u32 in little-endian format.
pub(crate) fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Append a 16-bit length prefix and the string's UTF-8 bytes.
pub(crate) fn put_str(out: &mut Vec<u8>, field: &'static str, value: &str) -> Result<()> {
    let len = value.len();
    if len > u16::MAX as usize {
        return Err(Error::FieldTooLong { field, len });
    }
    put_u16(out, len as u16);
    out.extend_from_slice(value.as_bytes());
    Ok(())
}

/// Serialize a recipe into a complete RFP3 stream.
///
/// The header is written with a placeholder chunk count which is back-patched
/// once the body is emitted. Chunk order is normative: one `CORE`, then
/// `INGR` chunks in ingredient order, then `STEP` chunks carrying 1-based
/// indices in step order. The input is not mutated.
pub fn encode(recipe: &Recipe) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(RfpHeader::SIZE + 64);
    RfpHeader::new().write(&mut out);

    let mut chunk_count: u64 = 0;

    let mut core = Vec::new();
    let prop_count = recipe.properties.len();
    if prop_count > u16::MAX as usize {
        return Err(Error::FieldTooLong {
            field: "property count",
            len: prop_count,
        });
    }
    put_u16(&mut core, prop_count as u16);
    for (key, value) in &recipe.properties {
        put_str(&mut core, "property key", key)?;
        put_str(&mut core, "property value", value)?;
    }
    put_str(&mut core, "image reference", &recipe.image_ref)?;
    put_str(&mut core, "recipe name", &recipe.name)?;
    write_chunk(&mut out, &CHUNK_CORE, &core)?;
    chunk_count += 1;

    for ingredient in &recipe.ingredients {
        let mut payload = Vec::with_capacity(2 + ingredient.len());
        put_str(&mut payload, "ingredient", ingredient)?;
        write_chunk(&mut out, &CHUNK_INGR, &payload)?;
        chunk_count += 1;
    }

    for (i, step) in recipe.steps.iter().enumerate() {
        let index = i + 1;
        if index > u16::MAX as usize {
            return Err(Error::FieldTooLong {
                field: "step index",
                len: index,
            });
        }
        let mut payload = Vec::with_capacity(4 + step.len());
        put_u16(&mut payload, index as u16);
        put_str(&mut payload, "step", step)?;
        write_chunk(&mut out, &CHUNK_STEP, &payload)?;
        chunk_count += 1;
    }

    let chunk_count = u32::try_from(chunk_count).map_err(|_| Error::TooManyChunks)?;
    RfpHeader::patch_chunk_count(&mut out, chunk_count);

    tracing::debug!(
        chunks = chunk_count,
        bytes = out.len(),
        name = %recipe.name,
        "encoded recipe"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_recipe_encodes_to_34_bytes() {
        // 18-byte header, then one CORE chunk: 8-byte frame header plus a
        // 7-byte payload (prop count, empty image, one-byte name) padded to 8.
        let encoded = encode(&Recipe::new("a")).unwrap();
        assert_eq!(encoded.len(), 34);
        assert_eq!(&encoded[8..12], &1u32.to_le_bytes());
    }

    #[test]
    fn core_comes_first_then_ingredients_then_steps() {
        let mut recipe = Recipe::new("x");
        recipe.ingredients.push("salt".into());
        recipe.steps.push("boil".into());
        let encoded = encode(&recipe).unwrap();

        let mut tags = Vec::new();
        let mut pos = RfpHeader::SIZE;
        while pos < encoded.len() {
            tags.push(encoded[pos..pos + 4].to_vec());
            let len =
                u32::from_le_bytes(encoded[pos + 4..pos + 8].try_into().unwrap()) as usize;
            pos += 8 + len + crate::chunk::padding_for(len);
        }
        assert_eq!(tags, vec![b"CORE".to_vec(), b"INGR".to_vec(), b"STEP".to_vec()]);
        assert_eq!(&encoded[8..12], &3u32.to_le_bytes());
    }

    #[test]
    fn oversized_field_is_refused() {
        let mut recipe = Recipe::new("x");
        recipe.ingredients.push("y".repeat(0x10000));
        assert!(matches!(
            encode(&recipe),
            Err(Error::FieldTooLong {
                field: "ingredient",
                len: 0x10000,
            })
        ));
    }

    #[test]
    fn multibyte_lengths_are_byte_counts() {
        let mut recipe = Recipe::new("é");
        recipe.ingredients.push("café".into());
        let encoded = encode(&recipe).unwrap();
        let decoded = crate::decode(&encoded).unwrap();
        assert_eq!(decoded.name, "é");
        assert_eq!(decoded.ingredients, vec!["café".to_string()]);
    }
}

//! RFP3 is a chunked, length-prefixed, 8-byte-aligned binary container for
//! cooking recipes. A file is an 18-byte header followed by a typed chunk
//! stream: exactly one `CORE` chunk carrying the name, image reference and
//! labeled properties, then one `INGR` chunk per ingredient and one `STEP`
//! chunk per preparation step, in order.
//!
//! The codec is purely functional: [`encode`] turns a [`Recipe`] into bytes,
//! [`decode`] turns bytes back into a fresh [`Recipe`]. [`RecipeStore`] maps
//! name-derived identifiers to `.rfp` files in a directory.

mod chunk;
mod de;
mod error;
mod header;
mod recipe;
mod ser;
mod store;

pub use de::decode;
pub use error::{Error, Result};
pub use recipe::Recipe;
pub use ser::encode;
pub use store::{RecipeStore, RecipeSummary};

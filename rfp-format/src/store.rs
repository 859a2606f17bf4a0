use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::de::decode;
use crate::error::{Error, Result};
use crate::recipe::{slug, Recipe};
use crate::ser::encode;

pub(crate) const EXTENSION: &str = "rfp";

/// Maps name-derived identifiers to `.rfp` files in one directory.
///
/// Writes are whole-file replacements via a temporary file and rename, so a
/// crash never leaves a half-written recipe under its identifier. There is no
/// cross-process locking; concurrent writers to one identifier race and the
/// last one wins.
#[derive(Debug, Clone)]
pub struct RecipeStore {
    dir: PathBuf,
}

/// One `list()` entry: the on-disk identifier and the stored recipe name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub name: String,
}

impl RecipeStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> RecipeStore {
        RecipeStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", slug(id), EXTENSION))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.path_for(id).exists()
    }

    /// Encode and persist a recipe under the identifier derived from its
    /// name, returning that identifier.
    pub fn put(&self, recipe: &Recipe) -> Result<String> {
        let id = recipe.id();
        if id.is_empty() {
            return Err(Error::EmptyName(recipe.name.clone()));
        }
        self.put_with_id(&id, recipe)?;
        Ok(id)
    }

    /// Persist a recipe under an explicit identifier, used when updating in
    /// place after a rename. The identifier is reduced to its alphanumerics,
    /// which also keeps path separators out of the filename.
    pub fn put_with_id(&self, id: &str, recipe: &Recipe) -> Result<()> {
        let slugged = slug(id);
        if slugged.is_empty() {
            return Err(Error::EmptyName(id.to_string()));
        }
        let id = slugged;
        let bytes = encode(recipe)?;
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(&id);
        let tmp = path.with_extension("rfp.tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!(id, bytes = bytes.len(), "wrote recipe");
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Recipe> {
        let data = fs::read(self.path_for(id))?;
        decode(&data)
    }

    /// Enumerate every `.rfp` file, decoding each to recover its stored name.
    ///
    /// This is the one place decode errors are swallowed: a single corrupt
    /// file must not hide the rest of the catalog, so offenders are logged
    /// and skipped. Directory-level I/O failures still propagate.
    pub fn list(&self) -> Result<Vec<RecipeSummary>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            // A stem outside [A-Za-z0-9]+ was not produced by this store and
            // would not resolve through `path_for`.
            if slug(id) != id {
                tracing::debug!(path = %path.display(), "skipping foreign filename");
                continue;
            }
            match fs::read(&path).map_err(Error::from).and_then(|d| decode(&d)) {
                Ok(recipe) => entries.push(RecipeSummary {
                    id: id.to_string(),
                    name: recipe.name,
                }),
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "skipping unreadable recipe");
                }
            }
        }
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(entries)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        fs::remove_file(self.path_for(id))?;
        Ok(())
    }
}

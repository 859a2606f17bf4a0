//! AllRecipes page scraper. One supported site; everything else is refused
//! rather than guessed at.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use rfp_format::Recipe;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Fetch a recipe page, extract it, and download its lead image into
/// `image_dir`. The recipe's `image_ref` is set to the saved path.
pub async fn scrape(url: &str, image_dir: &Path) -> Result<Recipe> {
    if !url.contains("allrecipes.com") {
        bail!("unsupported site: only allrecipes.com pages can be scraped");
    }

    let response = reqwest::get(url).await.context("failed to fetch URL")?;
    if !response.status().is_success() {
        bail!("bad status code: {}", response.status());
    }
    let html = response.text().await.context("failed to read response body")?;

    let (mut recipe, image_url) = parse_page(&html)?;
    if recipe.name.is_empty() {
        bail!("page has no recipe title; not a recipe page?");
    }

    if let Some(image_url) = image_url {
        match download_image(&image_url, image_dir, &recipe.id()).await {
            Ok(path) => recipe.image_ref = path,
            Err(e) => debug!(%image_url, %e, "image download failed, keeping recipe"),
        }
    }

    Ok(recipe)
}

fn selector(s: &'static str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| anyhow!("bad selector {s:?}: {e}"))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extract the recipe and the lead image URL from an AllRecipes page.
fn parse_page(html: &str) -> Result<(Recipe, Option<String>)> {
    let doc = Html::parse_document(html);
    let mut recipe = Recipe::default();

    if let Some(title) = doc.select(&selector("div#article-header--recipe_1-0 h1")?).next() {
        recipe.name = text_of(title);
    }

    let image_url = doc
        .select(&selector("div#photo-dialog__item_1-0 img")?)
        .find_map(|img| img.value().attr("src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string);

    // Times and servings live in labeled detail items.
    let label_sel = selector("div.mm-recipes-details__label")?;
    let value_sel = selector("div.mm-recipes-details__value")?;
    for item in doc.select(&selector(
        "div#mm-recipes-details_1-0 div.mm-recipes-details__item",
    )?) {
        let label = item.select(&label_sel).next().map(text_of).unwrap_or_default();
        let value = item.select(&value_sel).next().map(text_of).unwrap_or_default();
        let key = label.to_lowercase();
        let key = key.trim_end_matches(':').trim();
        match key {
            "prep time" | "cook time" | "total time" | "additional time" | "servings" => {
                recipe.properties.insert(key.to_string(), value);
            }
            _ => {}
        }
    }

    // Structured ingredients: quantity, unit and name spans per list item.
    let span_sel = selector("span")?;
    if let Some(list) = doc
        .select(&selector("div#mm-recipes-structured-ingredients_1-0 ul")?)
        .next()
    {
        for item in list.select(&selector("li p")?) {
            let parts: Vec<String> = item
                .select(&span_sel)
                .take(3)
                .map(text_of)
                .filter(|s| !s.is_empty())
                .collect();
            if !parts.is_empty() {
                recipe.ingredients.push(parts.join(" "));
            }
        }
    }

    for step in doc.select(&selector("div#mm-recipes-steps__content_1-0 ol li")?) {
        let text = step
            .select(&selector("p")?)
            .next()
            .map(text_of)
            .unwrap_or_default();
        if !text.is_empty() {
            recipe.steps.push(text);
        }
    }

    Ok((recipe, image_url))
}

/// Download an image and save it under the recipe's identifier, returning the
/// saved path as a string.
async fn download_image(url: &str, image_dir: &Path, id: &str) -> Result<String> {
    if url.is_empty() {
        bail!("empty image URL");
    }
    let response = reqwest::get(url).await.context("failed to fetch image")?;
    if !response.status().is_success() {
        bail!("bad status code for image: {}", response.status());
    }
    let bytes = response.bytes().await?;

    tokio::fs::create_dir_all(image_dir).await?;
    let path = image_dir.join(id);
    tokio::fs::write(&path, &bytes).await?;
    debug!(path = %path.display(), bytes = bytes.len(), "saved image");
    Ok(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div id="article-header--recipe_1-0"><h1> Test Pie </h1></div>
        <div id="photo-dialog__item_1-0"><img src="https://img.example/pie.jpg"></div>
        <div id="mm-recipes-details_1-0">
          <div class="mm-recipes-details__item">
            <div class="mm-recipes-details__label">Prep Time:</div>
            <div class="mm-recipes-details__value">10 mins</div>
          </div>
          <div class="mm-recipes-details__item">
            <div class="mm-recipes-details__label">Servings:</div>
            <div class="mm-recipes-details__value">4</div>
          </div>
          <div class="mm-recipes-details__item">
            <div class="mm-recipes-details__label">Difficulty:</div>
            <div class="mm-recipes-details__value">ignored</div>
          </div>
        </div>
        <div id="mm-recipes-structured-ingredients_1-0">
          <ul>
            <li><p><span>2</span> <span>cups</span> <span>flour</span></p></li>
            <li><p><span>1</span> <span></span> <span>egg</span></p></li>
          </ul>
        </div>
        <div id="mm-recipes-steps__content_1-0">
          <ol>
            <li><p>Mix everything.</p></li>
            <li><p>Bake it.</p></li>
          </ol>
        </div>
        </body></html>
    "#;

    #[test]
    fn parses_the_allrecipes_layout() {
        let (recipe, image_url) = parse_page(PAGE).unwrap();
        assert_eq!(recipe.name, "Test Pie");
        assert_eq!(image_url.as_deref(), Some("https://img.example/pie.jpg"));
        assert_eq!(recipe.properties["prep time"], "10 mins");
        assert_eq!(recipe.properties["servings"], "4");
        assert!(!recipe.properties.contains_key("difficulty"));
        assert_eq!(recipe.ingredients, vec!["2 cups flour", "1 egg"]);
        assert_eq!(recipe.steps, vec!["Mix everything.", "Bake it."]);
    }

    #[test]
    fn empty_page_yields_an_empty_recipe() {
        let (recipe, image_url) = parse_page("<html></html>").unwrap();
        assert!(recipe.name.is_empty());
        assert!(image_url.is_none());
        assert!(recipe.ingredients.is_empty());
    }

    #[tokio::test]
    async fn non_allrecipes_urls_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let err = scrape("https://example.com/recipe", dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unsupported site"));
    }
}

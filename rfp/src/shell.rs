//! Interactive console over the recipe store, mirroring the HTTP surface:
//! new/read/list/delete/scrape plus config editing.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use rfp_format::{Recipe, RecipeStore};

use crate::config::Config;

/// Print a prompt and read one trimmed line; `None` on EOF.
fn prompt(msg: &str) -> Result<Option<String>> {
    print!("{msg}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Keep prompting until an empty line, collecting the answers.
fn prompt_list(msg: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();
    loop {
        match prompt(msg)? {
            None => break,
            Some(line) if line.is_empty() => break,
            Some(line) => out.push(line),
        }
    }
    Ok(out)
}

pub async fn run(mut config: Config, config_path: &Path) -> Result<()> {
    println!("rfp console. Type 'help' for commands, 'exit' to leave.");
    loop {
        let Some(line) = prompt("> ")? else { break };
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let command = tokens[0].to_lowercase();
        let sub = tokens.get(1).copied().unwrap_or("");
        let args = &tokens[2.min(tokens.len())..];
        let store = config.store();

        match (command.as_str(), sub) {
            ("exit", _) | ("quit", _) => break,
            ("help", sub) => help(sub),
            ("list", "recipes") => list_recipes(&store)?,
            ("new", "recipe") => new_recipe(&store, args)?,
            ("new", "config") => config = edit_config(&config, config_path)?,
            ("read", "recipe") => read_recipe(&config, &store, args)?,
            ("delete", "recipe") => delete_recipes(&store, args),
            ("scrape", "recipe") => scrape_recipe(&config, &store, args).await,
            ("list", other) | ("new", other) | ("read", other) | ("delete", other)
            | ("scrape", other) => {
                println!("Unknown subcommand for '{command}': {other}");
            }
            _ => println!("Unknown command: {command}"),
        }
    }
    Ok(())
}

fn help(sub: &str) {
    match sub {
        "" => {
            println!("Available commands:");
            println!("  new     new recipe [-n <name>] [-i <image>] | new config");
            println!("  read    read recipe <id> [-c] [-i] [-d]");
            println!("  list    list recipes");
            println!("  delete  delete recipe <id>...");
            println!("  scrape  scrape recipe -u <url>");
            println!("  help    help [command]");
            println!("  exit    leave the console");
        }
        "read" => println!("read recipe <id> with -c (core), -i (ingredients), -d (directions); no flag shows everything"),
        "scrape" => println!("scrape recipe -u <url>  (allrecipes.com only)"),
        other => println!("No extra help for '{other}'"),
    }
}

fn list_recipes(store: &RecipeStore) -> Result<()> {
    let entries = store.list()?;
    if entries.is_empty() {
        println!("No recipes found.");
        return Ok(());
    }
    println!("Recipes:");
    for entry in entries {
        println!("  {}  {}", entry.id, entry.name);
    }
    Ok(())
}

fn new_recipe(store: &RecipeStore, args: &[&str]) -> Result<()> {
    let mut recipe = Recipe::default();

    let mut i = 0;
    while i < args.len() {
        match args[i] {
            "-n" | "--name" if i + 1 < args.len() => {
                recipe.name = args[i + 1].to_string();
                i += 1;
            }
            "-i" | "--image" if i + 1 < args.len() => {
                recipe.image_ref = args[i + 1].to_string();
                i += 1;
            }
            other => println!("Ignoring unknown flag: {other}"),
        }
        i += 1;
    }

    if recipe.name.is_empty() {
        recipe.name = prompt("Recipe name: ")?.unwrap_or_default();
    }
    if recipe.image_ref.is_empty() {
        recipe.image_ref = prompt("Image path (optional): ")?.unwrap_or_default();
    }

    println!("\nEnter properties as 'Key: Value' (empty line to finish):");
    loop {
        let Some(line) = prompt("> ")? else { break };
        if line.is_empty() {
            break;
        }
        match line.split_once(':') {
            Some((key, value)) => {
                recipe
                    .properties
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
            None => println!("Invalid format. Use 'Key: Value'"),
        }
    }

    println!("\nEnter ingredients (empty line to finish):");
    recipe.ingredients = prompt_list("> ")?;

    println!("\nEnter steps (empty line to finish):");
    recipe.steps = prompt_list("> ")?;

    match store.put(&recipe) {
        Ok(id) => println!("Recipe saved as {id}"),
        Err(e) => println!("Error writing recipe: {e}"),
    }
    Ok(())
}

fn read_recipe(config: &Config, store: &RecipeStore, args: &[&str]) -> Result<()> {
    let mut id = "";
    let mut show_core = false;
    let mut show_ingredients = false;
    let mut show_steps = false;

    for arg in args {
        match *arg {
            "-c" | "--core" => show_core = true,
            "-i" | "--ingredients" => show_ingredients = true,
            "-d" | "--directions" => show_steps = true,
            other if id.is_empty() => id = other,
            other => println!("Ignoring extra argument: {other}"),
        }
    }
    if id.is_empty() {
        println!("Usage: read recipe <id> [-c] [-i] [-d]");
        return Ok(());
    }
    if !(show_core || show_ingredients || show_steps) {
        show_core = true;
        show_ingredients = true;
        show_steps = true;
    }

    let recipe = match store.get(id) {
        Ok(recipe) => recipe,
        Err(e) => {
            println!("Error reading recipe: {e}");
            return Ok(());
        }
    };

    println!("{}", recipe.name);
    if show_core {
        if !recipe.image_ref.is_empty() {
            println!("Image: {}", recipe.image_ref);
        }
        for (key, value) in &recipe.properties {
            println!("  {key}: {value}");
        }
    }
    if show_ingredients {
        println!("\nIngredients:");
        for (i, ingredient) in recipe.ingredients.iter().enumerate() {
            if config.numbered_ingredients {
                println!("{}) {ingredient}", i + 1);
            } else {
                println!("- {ingredient}");
            }
        }
    }
    if show_steps {
        println!("\nDirections:");
        for (i, step) in recipe.steps.iter().enumerate() {
            if config.numbered_steps {
                println!("{}) {step}", i + 1);
            } else {
                println!("- {step}");
            }
        }
    }
    Ok(())
}

fn delete_recipes(store: &RecipeStore, ids: &[&str]) {
    if ids.is_empty() {
        println!("Please specify at least one recipe id");
        return;
    }
    for id in ids {
        if !store.exists(id) {
            println!("Could not find {id}");
            continue;
        }
        match store.delete(id) {
            Ok(()) => println!("Deleted {id}"),
            Err(e) => println!("Error deleting {id}: {e}"),
        }
    }
}

async fn scrape_recipe(config: &Config, store: &RecipeStore, args: &[&str]) {
    let mut url = "";
    let mut i = 0;
    while i < args.len() {
        if (args[i] == "-u" || args[i] == "--url") && i + 1 < args.len() {
            url = args[i + 1];
            i += 1;
        }
        i += 1;
    }
    if url.is_empty() {
        println!("No URL provided. Use -u <url>");
        return;
    }

    match crate::scrape::scrape(url, &config.image_dir).await {
        Ok(recipe) => {
            println!("Scraped recipe: {}", recipe.name);
            match store.put(&recipe) {
                Ok(id) => println!("Recipe saved as {id}"),
                Err(e) => println!("Error writing recipe: {e}"),
            }
        }
        Err(e) => println!("Scrape failed: {e}"),
    }
}

fn edit_config(config: &Config, config_path: &Path) -> Result<Config> {
    println!("Edit configuration (press Enter to keep current value):");

    let prompt_string = |field: &str, current: &str| -> Result<String> {
        let answer = prompt(&format!("{field} [{current}]: "))?.unwrap_or_default();
        Ok(if answer.is_empty() {
            current.to_string()
        } else {
            answer
        })
    };

    let mut updated = config.clone();
    updated.recipe_dir =
        PathBuf::from(prompt_string("Recipe directory", &config.recipe_dir.display().to_string())?);
    updated.image_dir =
        PathBuf::from(prompt_string("Image directory", &config.image_dir.display().to_string())?);
    updated.static_dir =
        PathBuf::from(prompt_string("Static directory", &config.static_dir.display().to_string())?);
    updated.api_port = prompt_string("API port", &config.api_port.to_string())?
        .parse()
        .unwrap_or(config.api_port);
    updated.web_port = prompt_string("Web port", &config.web_port.to_string())?
        .parse()
        .unwrap_or(config.web_port);
    updated.numbered_ingredients =
        prompt_string("Numbered ingredients", &config.numbered_ingredients.to_string())?
            .parse()
            .unwrap_or(config.numbered_ingredients);
    updated.numbered_steps = prompt_string("Numbered steps", &config.numbered_steps.to_string())?
        .parse()
        .unwrap_or(config.numbered_steps);

    let saved = updated.save(config_path)?;
    println!("Configuration saved to {}", config_path.display());
    Ok(saved)
}

//! HTML fragments written into the results container.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::model::{CandidateRecipe, IngredientRef, RecipeDetails};

pub const VALIDATION_MESSAGE: &str = "Please enter at least one ingredient.";
pub const LOADING_MESSAGE: &str = "Fetching recipes...";
pub const NO_RECIPES_MESSAGE: &str = "No recipes found. Try different ingredients.";
pub const DETAIL_ERROR_MESSAGE: &str = "Error loading recipe details.";
pub const NO_INSTRUCTIONS_MESSAGE: &str = "No instructions available.";
pub const NO_INGREDIENTS_MESSAGE: &str = "No ingredient details available.";

/// Classes applied to the results container
pub const CONTAINER_CLASSES: &str = "grid grid-cols-2 gap-6 mt-4 overflow-y-auto";

pub fn validation_message() -> String {
    format!(
        r#"<p class="message text-red-500 text-lg font-semibold">{}</p>"#,
        VALIDATION_MESSAGE
    )
}

pub fn loading_message() -> String {
    format!(
        r#"<p class="message col-span-2 text-gray-600 text-lg font-semibold">{}</p>"#,
        LOADING_MESSAGE
    )
}

pub fn no_recipes_message() -> String {
    format!(
        r#"<p class="message col-span-2 text-gray-700 text-lg font-semibold">{}</p>"#,
        NO_RECIPES_MESSAGE
    )
}

/// Message shown when the search call itself fails
pub fn search_error_message(description: &str) -> String {
    format!(
        r#"<p class="message col-span-2 text-red-500 text-lg font-semibold">Error: {}. Check your API key and internet connection.</p>"#,
        encode_text(description)
    )
}

/// Inline placeholder for a candidate whose details could not be loaded
pub fn detail_error_card(candidate: &CandidateRecipe) -> String {
    format!(
        r#"<p class="recipe-error col-span-2 text-red-500 text-lg font-semibold" data-recipe-id="{}">{}</p>"#,
        candidate.id, DETAIL_ERROR_MESSAGE
    )
}

fn summarize(ingredients: &[IngredientRef]) -> String {
    if ingredients.is_empty() {
        return "None".to_string();
    }
    ingredients
        .iter()
        .map(|ing| encode_text(&ing.original).into_owned())
        .collect::<Vec<_>>()
        .join(", ")
}

fn ingredient_list(details: &RecipeDetails) -> String {
    match &details.extended_ingredients {
        Some(ingredients) => ingredients
            .iter()
            .map(|ing| format!("- {}", encode_text(&ing.original)))
            .collect::<Vec<_>>()
            .join("<br>"),
        None => NO_INGREDIENTS_MESSAGE.to_string(),
    }
}

fn instructions(details: &RecipeDetails) -> String {
    let steps = details.steps();
    if steps.is_empty() {
        return format!("<p>{}</p>", NO_INSTRUCTIONS_MESSAGE);
    }
    steps
        .iter()
        .map(|step| format!("<p>Step {}: {}</p>", step.number, encode_text(&step.step)))
        .collect()
}

fn or_unknown(value: Option<u32>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

/// Build the card for one candidate and its details
pub fn recipe_card(candidate: &CandidateRecipe, details: &RecipeDetails) -> String {
    let image = details
        .image
        .as_deref()
        .or(candidate.image.as_deref())
        .unwrap_or_default();

    format!(
        r#"
<div class="recipe-card bg-white p-6 rounded-lg shadow-lg transition hover:shadow-xl max-w-lg mx-auto" data-recipe-id="{id}">
    <img src="{image}" alt="{alt}" class="w-full h-40 object-cover rounded">
    <h3 class="text-2xl font-bold mt-2 text-gray-900">{title}</h3>
    <p class="text-sm text-gray-700 mt-1"><strong>Ready in:</strong> {ready} mins</p>
    <p class="text-sm text-gray-700"><strong>Servings:</strong> {servings}</p>
    <h4 class="text-lg font-semibold mt-3">Used Ingredients:</h4>
    <p class="used-ingredients text-sm text-gray-700">{used}</p>
    <h4 class="text-lg font-semibold mt-3">Missed Ingredients:</h4>
    <p class="missed-ingredients text-sm text-gray-700">{missed}</p>
    <h4 class="text-lg font-semibold mt-3">Ingredients:</h4>
    <p class="ingredients text-sm text-gray-700">{ingredients}</p>
    <h4 class="text-lg font-semibold mt-3">Instructions:</h4>
    <div class="instructions text-sm text-gray-700">{instructions}</div>
</div>
"#,
        id = candidate.id,
        image = encode_double_quoted_attribute(image),
        alt = encode_double_quoted_attribute(&details.title),
        title = encode_text(&details.title),
        ready = or_unknown(details.ready_in_minutes),
        servings = or_unknown(details.servings),
        used = summarize(&candidate.used_ingredients),
        missed = summarize(&candidate.missed_ingredients),
        ingredients = ingredient_list(details),
        instructions = instructions(details),
    )
}

/// Wrap container content in a complete page with the search form
pub fn page(query: &str, results: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Recipe Finder</title>
    <script src="https://cdn.tailwindcss.com"></script>
</head>
<body class="bg-gray-100 p-8">
    <h1 class="text-3xl font-bold text-gray-900">Recipe Finder</h1>
    <form id="searchForm" class="mt-4">
        <input id="search" type="text" value="{query}" placeholder="e.g. egg, milk, flour" class="border rounded p-2 w-96">
        <button type="submit" class="bg-green-600 text-white rounded px-4 py-2">Search</button>
    </form>
    <div id="results" class="{classes}" style="max-height: 70vh">{results}</div>
</body>
</html>
"#,
        query = encode_double_quoted_attribute(query),
        classes = CONTAINER_CLASSES,
        results = results,
    )
}

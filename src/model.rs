use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit `null` like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One ingredient as referenced by the search endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// The ingredient line as the recipe author wrote it
    #[serde(default, deserialize_with = "null_as_default")]
    pub original: String,
}

/// A recipe returned by the ingredient search, before its details are fetched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecipe {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used_ingredients: Vec<IngredientRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missed_ingredients: Vec<IngredientRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedIngredient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub original: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionStep {
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub step: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub steps: Vec<InstructionStep>,
}

/// Full recipe information from the details endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    /// `None` when the API omitted the list or sent `null`
    #[serde(default)]
    pub extended_ingredients: Option<Vec<ExtendedIngredient>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub analyzed_instructions: Vec<InstructionBlock>,
}

impl RecipeDetails {
    /// Steps of the first analyzed instruction block, if any
    pub fn steps(&self) -> &[InstructionStep] {
        self.analyzed_instructions
            .first()
            .map(|block| block.steps.as_slice())
            .unwrap_or_default()
    }
}

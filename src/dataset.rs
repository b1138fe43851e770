//! Literal seed datasets.

use crate::recipe::{CatalogRecipe, RecipeRecord, RecipeShape, Step, StepRecipe};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named set of literal recipe records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    /// A single step-by-step recipe (title, text, steps).
    #[default]
    Steps,
    /// Three recipes listing ingredients, tools and instructions.
    Catalog,
}

static STEPS: Lazy<Vec<RecipeRecord>> = Lazy::new(|| {
    vec![RecipeRecord::Steps(StepRecipe {
        title: "Orange Juice".to_string(),
        text: "grab an orange, slice the orange, squeeze in a wine glass, enjoy".to_string(),
        steps: vec![
            Step::new("grab an orange", "orange", 5.0),
            Step::new("slice the orange", "knife", 5.0),
            Step::new("squeeze in a wine glass", "wine glass", 5.0),
            Step::new("enjoy", "person", 5.0),
        ],
    })]
});

static CATALOG: Lazy<Vec<RecipeRecord>> = Lazy::new(|| {
    vec![
        catalog(
            "Orange Juice",
            &["orange"],
            &["knife", "wine glass"],
            &[
                "grab an orange",
                "slice the orange",
                "squeeze in a wine glass",
                "enjoy",
            ],
        ),
        catalog(
            "Grilled Cheese",
            &["bread", "cheese", "butter"],
            &["plate", "knife", "pan"],
            &[
                "place bread on plate",
                "butter the bread",
                "place cheese on bread",
                "make the rest of the sandwich",
                "grill in the pan until golden",
            ],
        ),
        catalog(
            "Peanut Butter and Jelly Sandwich",
            &["bread", "peanut butter", "jelly"],
            &["plate", "knife"],
            &[
                "place bread on plate",
                "spread peanut butter on one slice",
                "spread jelly on the other slice",
                "press the slices together",
            ],
        ),
    ]
});

fn catalog(name: &str, ingredients: &[&str], tools: &[&str], instructions: &[&str]) -> RecipeRecord {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    RecipeRecord::Catalog(CatalogRecipe {
        name: name.to_string(),
        ingredients: owned(ingredients),
        tools: owned(tools),
        instructions: owned(instructions),
    })
}

impl Dataset {
    pub const ALL: [Dataset; 2] = [Dataset::Steps, Dataset::Catalog];

    pub fn name(self) -> &'static str {
        match self {
            Self::Steps => "steps",
            Self::Catalog => "catalog",
        }
    }

    pub fn shape(self) -> RecipeShape {
        match self {
            Self::Steps => RecipeShape::Steps,
            Self::Catalog => RecipeShape::Catalog,
        }
    }

    /// The literal records of this dataset, in insertion order.
    pub fn records(self) -> &'static [RecipeRecord] {
        match self {
            Self::Steps => STEPS.as_slice(),
            Self::Catalog => CATALOG.as_slice(),
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "steps" => Ok(Self::Steps),
            "catalog" => Ok(Self::Catalog),
            other => Err(format!(
                "unknown dataset '{other}' (expected 'steps' or 'catalog')"
            )),
        }
    }
}

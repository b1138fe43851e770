//! Recipe record shapes.
//!
//! Two incompatible document shapes are seeded into the `recipes`
//! collection depending on the dataset:
//!
//! - [`StepRecipe`]: `{title, text, steps: [{text, noun, estimatedTime}]}`
//! - [`CatalogRecipe`]: `{name, ingredients, tools, instructions}`
//!
//! Neither shape carries an identifier; the database assigns `_id`.

use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single step of a [`StepRecipe`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Instruction text shown to the user.
    pub text: String,
    /// Object the step is performed with or on.
    pub noun: String,
    /// Estimated duration of the step, in seconds. Stored documents may
    /// carry it as Int32, Int64 or Double.
    #[serde(rename = "estimatedTime")]
    pub estimated_time: f64,
}

impl Step {
    pub fn new(text: impl Into<String>, noun: impl Into<String>, estimated_time: f64) -> Self {
        Self {
            text: text.into(),
            noun: noun.into(),
            estimated_time,
        }
    }
}

/// Recipe described as a titled sequence of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecipe {
    pub title: String,
    pub text: String,
    pub steps: Vec<Step>,
}

/// Recipe described as ingredient, tool and instruction lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub tools: Vec<String>,
    pub instructions: Vec<String>,
}

/// The document shape a dataset is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipeShape {
    Steps,
    Catalog,
}

/// A literal record to be inserted into the `recipes` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeRecord {
    Steps(StepRecipe),
    Catalog(CatalogRecipe),
}

/// Ways a recipe document can fail to match its shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeViolation {
    #[error("field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("list '{0}' has no entries")]
    EmptyList(&'static str),

    #[error("entry {index} of '{field}' is empty")]
    EmptyEntry { field: &'static str, index: usize },

    #[error("step {index} has an invalid estimatedTime")]
    InvalidTime { index: usize },

    #[error("document does not match the {shape:?} shape: {reason}")]
    Malformed { shape: RecipeShape, reason: String },
}

impl RecipeRecord {
    pub fn shape(&self) -> RecipeShape {
        match self {
            Self::Steps(_) => RecipeShape::Steps,
            Self::Catalog(_) => RecipeShape::Catalog,
        }
    }

    /// Human readable label: the title or the name.
    pub fn label(&self) -> &str {
        match self {
            Self::Steps(r) => &r.title,
            Self::Catalog(r) => &r.name,
        }
    }

    /// Check that every declared field is present and populated.
    pub fn validate(&self) -> Result<(), ShapeViolation> {
        match self {
            Self::Steps(r) => {
                require_text("title", &r.title)?;
                require_text("text", &r.text)?;
                if r.steps.is_empty() {
                    return Err(ShapeViolation::EmptyList("steps"));
                }
                for (index, step) in r.steps.iter().enumerate() {
                    if step.text.trim().is_empty() || step.noun.trim().is_empty() {
                        return Err(ShapeViolation::EmptyEntry {
                            field: "steps",
                            index,
                        });
                    }
                    if !step.estimated_time.is_finite() || step.estimated_time < 0.0 {
                        return Err(ShapeViolation::InvalidTime { index });
                    }
                }
                Ok(())
            }
            Self::Catalog(r) => {
                require_text("name", &r.name)?;
                require_entries("ingredients", &r.ingredients)?;
                require_entries("tools", &r.tools)?;
                require_entries("instructions", &r.instructions)
            }
        }
    }

    /// Convert into the BSON document that is written to the store.
    pub fn to_document(&self) -> Result<Document, bson::ser::Error> {
        match self {
            Self::Steps(r) => bson::to_document(r),
            Self::Catalog(r) => bson::to_document(r),
        }
    }
}

impl RecipeShape {
    /// Decode a stored document as this shape and validate it.
    ///
    /// Extra fields such as `_id` are ignored.
    pub fn check_document(self, doc: &Document) -> Result<RecipeRecord, ShapeViolation> {
        let malformed = |e: bson::de::Error| ShapeViolation::Malformed {
            shape: self,
            reason: e.to_string(),
        };
        let record = match self {
            Self::Steps => RecipeRecord::Steps(bson::from_document(doc.clone()).map_err(malformed)?),
            Self::Catalog => {
                RecipeRecord::Catalog(bson::from_document(doc.clone()).map_err(malformed)?)
            }
        };
        record.validate()?;
        Ok(record)
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ShapeViolation> {
    if value.trim().is_empty() {
        Err(ShapeViolation::EmptyField(field))
    } else {
        Ok(())
    }
}

fn require_entries(field: &'static str, values: &[String]) -> Result<(), ShapeViolation> {
    if values.is_empty() {
        return Err(ShapeViolation::EmptyList(field));
    }
    match values.iter().position(|v| v.trim().is_empty()) {
        Some(index) => Err(ShapeViolation::EmptyEntry { field, index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, Bson};

    fn orange_juice() -> StepRecipe {
        StepRecipe {
            title: "Orange Juice".to_string(),
            text: "grab an orange, enjoy".to_string(),
            steps: vec![
                Step::new("grab an orange", "orange", 5.0),
                Step::new("enjoy", "person", 5.0),
            ],
        }
    }

    #[test]
    fn test_step_document_uses_camel_case_time() {
        let doc = RecipeRecord::Steps(orange_juice()).to_document().unwrap();
        let steps = doc.get_array("steps").unwrap();
        let first = steps[0].as_document().unwrap();
        assert!(first.contains_key("estimatedTime"));
        assert!(!first.contains_key("estimated_time"));
        assert_eq!(first.get_str("noun").unwrap(), "orange");
    }

    #[test]
    fn test_empty_steps_rejected() {
        let mut recipe = orange_juice();
        recipe.steps.clear();
        assert_eq!(
            RecipeRecord::Steps(recipe).validate(),
            Err(ShapeViolation::EmptyList("steps"))
        );
    }

    #[test]
    fn test_blank_catalog_entry_rejected() {
        let record = RecipeRecord::Catalog(CatalogRecipe {
            name: "Toast".to_string(),
            ingredients: vec!["bread".to_string()],
            tools: vec!["toaster".to_string(), "  ".to_string()],
            instructions: vec!["toast the bread".to_string()],
        });
        assert_eq!(
            record.validate(),
            Err(ShapeViolation::EmptyEntry {
                field: "tools",
                index: 1
            })
        );
    }

    #[test]
    fn test_check_document_ignores_object_id() {
        let doc = doc! {
            "_id": bson::oid::ObjectId::new(),
            "name": "Toast",
            "ingredients": ["bread"],
            "tools": ["toaster"],
            "instructions": ["toast the bread"],
        };
        let record = RecipeShape::Catalog.check_document(&doc).unwrap();
        assert_eq!(record.label(), "Toast");
    }

    #[test]
    fn test_check_document_wrong_shape() {
        let doc = RecipeRecord::Steps(orange_juice()).to_document().unwrap();
        let err = RecipeShape::Catalog.check_document(&doc).unwrap_err();
        assert!(matches!(
            err,
            ShapeViolation::Malformed {
                shape: RecipeShape::Catalog,
                ..
            }
        ));
    }

    fn single_step_doc(estimated_time: impl Into<Bson>) -> Document {
        let estimated_time: Bson = estimated_time.into();
        doc! {
            "title": "Orange Juice",
            "text": "enjoy",
            "steps": [{"text": "enjoy", "noun": "person", "estimatedTime": estimated_time}],
        }
    }

    #[test]
    fn test_estimated_time_accepts_any_numeric_type() {
        for (value, expected) in [
            (Bson::Int32(5), 5.0),
            (Bson::Int64(5), 5.0),
            (Bson::Double(5.0), 5.0),
            (Bson::Double(2.5), 2.5),
        ] {
            let record = RecipeShape::Steps
                .check_document(&single_step_doc(value.clone()))
                .unwrap_or_else(|e| panic!("{value:?} rejected: {e}"));
            match record {
                RecipeRecord::Steps(r) => assert_eq!(r.steps[0].estimated_time, expected),
                other => panic!("decoded as {:?}", other.shape()),
            }
        }
    }

    #[test]
    fn test_estimated_time_must_be_a_number() {
        let err = RecipeShape::Steps
            .check_document(&single_step_doc("five"))
            .unwrap_err();
        assert!(matches!(err, ShapeViolation::Malformed { shape: RecipeShape::Steps, .. }));
    }

    #[test]
    fn test_negative_estimated_time_rejected() {
        let err = RecipeShape::Steps
            .check_document(&single_step_doc(-1.0))
            .unwrap_err();
        assert_eq!(err, ShapeViolation::InvalidTime { index: 0 });
    }

    #[test]
    fn test_untagged_json_round_trip_picks_shape() {
        let json = serde_json::json!({
            "title": "Orange Juice",
            "text": "grab an orange, enjoy",
            "steps": [{"text": "enjoy", "noun": "person", "estimatedTime": 5}],
        });
        let record: RecipeRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.shape(), RecipeShape::Steps);
    }
}

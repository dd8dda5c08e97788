use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a place, unique within its region's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(pub u32);

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A quiz subject: a department, country, or state and its capital.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Identifier, unique within the region.
    pub id: PlaceId,
    /// Primary name of the place.
    pub name: String,
    /// The capital city.
    pub capital: String,
    /// Other cities of the place, used as plausible wrong answers.
    #[serde(default)]
    pub other_cities: Vec<String>,
    /// Trivia shown after a correct answer.
    #[serde(default)]
    pub fun_facts: Vec<String>,
    /// Image reference shown with the trivia.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Place {
    /// Create a place with no alternates, facts, or image.
    pub fn new(id: u32, name: impl Into<String>, capital: impl Into<String>) -> Self {
        Self {
            id: PlaceId(id),
            name: name.into(),
            capital: capital.into(),
            other_cities: Vec::new(),
            fun_facts: Vec::new(),
            image_url: None,
        }
    }

    /// Set the alternate cities.
    pub fn with_other_cities<I, S>(mut self, cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.other_cities = cities.into_iter().map(Into::into).collect();
        self
    }

    /// Set the fun facts.
    pub fn with_fun_facts<I, S>(mut self, facts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fun_facts = facts.into_iter().map(Into::into).collect();
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image_url = Some(image.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let place = Place::new(1, "Antioquia", "Medellín")
            .with_other_cities(["Envigado", "Rionegro"])
            .with_fun_facts(["Home of the Feria de las Flores."])
            .with_image("antioquia.jpg");
        assert_eq!(place.id, PlaceId(1));
        assert_eq!(place.other_cities.len(), 2);
        assert_eq!(place.fun_facts.len(), 1);
        assert_eq!(place.image_url.as_deref(), Some("antioquia.jpg"));
    }

    #[test]
    fn deserialize_with_missing_optionals() {
        let json = r#"{"id": 3, "name": "Valle del Cauca", "capital": "Cali"}"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.capital, "Cali");
        assert!(place.other_cities.is_empty());
        assert!(place.fun_facts.is_empty());
        assert!(place.image_url.is_none());
    }

    #[test]
    fn id_display() {
        assert_eq!(PlaceId(7).to_string(), "#7");
    }
}

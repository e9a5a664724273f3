use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stored product record. Every instance held by the store has passed
/// validation; `id` never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub image: String,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Assign a fresh id and creation timestamp to validated fields.
    pub fn create(fields: NewProduct) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            image: fields.image,
            description: fields.description,
            price: fields.price,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Overwrite the supplied fields and stamp `updated_at`.
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(image) = changes.image {
            self.image = image;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        self.updated_at = Some(Utc::now());
    }
}

// ── Validated field sets ──────────────────────────────────────────────────────

/// Trimmed, parsed fields for a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub image: String,
    pub description: String,
    pub price: f64,
}

/// Trimmed, parsed fields for a partial update; `None` means "leave as is".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub title: Option<String>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

// ── Request payloads ─────────────────────────────────────────────────────────

/// Raw create/update body. The outer `Option` records whether the key was
/// sent at all, the inner one whether it was `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductInput {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Option<PriceInput>>,
}

/// Prices arrive either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product::create(NewProduct {
            title: "Lamp".to_string(),
            image: "https://img.example/lamp.png".to_string(),
            description: "Desk lamp".to_string(),
            price: 19.5,
        })
    }

    #[test]
    fn create_assigns_distinct_ids() {
        let a = sample();
        let b = sample();
        assert_ne!(a.id, b.id);
        assert!(a.updated_at.is_none());
    }

    #[test]
    fn apply_overwrites_only_supplied_fields() {
        let mut p = sample();
        let before = p.clone();
        p.apply(ProductChanges {
            price: Some(25.0),
            ..Default::default()
        });
        assert_eq!(p.price, 25.0);
        assert_eq!(p.title, before.title);
        assert_eq!(p.image, before.image);
        assert_eq!(p.description, before.description);
        assert_eq!(p.id, before.id);
        assert_eq!(p.created_at, before.created_at);
        assert!(p.updated_at.is_some());
    }

    #[test]
    fn updated_at_is_omitted_until_first_update() {
        let mut p = sample();
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("updated_at").is_none());
        assert_eq!(json["price"], 19.5);

        p.apply(ProductChanges::default());
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("updated_at").is_some());
    }

    #[test]
    fn input_distinguishes_absent_from_null() {
        let input: ProductInput =
            serde_json::from_str(r#"{"title": null, "price": 3}"#).unwrap();
        assert_eq!(input.title, Some(None));
        assert_eq!(input.image, None);
        assert_eq!(input.price, Some(Some(PriceInput::Number(3.0))));
    }

    #[test]
    fn price_accepts_numbers_and_strings() {
        let input: ProductInput = serde_json::from_str(r#"{"price": "abc"}"#).unwrap();
        assert_eq!(input.price, Some(Some(PriceInput::Text("abc".to_string()))));

        let input: ProductInput = serde_json::from_str(r#"{"price": -5}"#).unwrap();
        assert_eq!(input.price, Some(Some(PriceInput::Number(-5.0))));
    }

    #[test]
    fn wrong_field_type_is_rejected() {
        assert!(serde_json::from_str::<ProductInput>(r#"{"title": 5}"#).is_err());
        assert!(serde_json::from_str::<ProductInput>(r#"{"price": [1]}"#).is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let input: ProductInput = serde_json::from_str(r#"{"colour": "red"}"#).unwrap();
        assert!(input.title.is_none() && input.price.is_none());
    }
}

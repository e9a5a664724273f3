//! Field rules shared by create and partial update.
//!
//! Every rule runs independently so a single request reports all of its
//! problems at once.

use crate::models::{NewProduct, PriceInput, ProductChanges, ProductInput};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const IMAGE_REQUIRED: &str = "Image URL is required";
pub const IMAGE_INVALID: &str = "Image must be a valid URL";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const PRICE_NOT_POSITIVE: &str = "Price must be a positive number";
pub const PRICE_NOT_NUMBER: &str = "Price must be a valid number";

const URL_SCHEMES: [&str; 2] = ["http://", "https://"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every field is checked, absent ones included.
    Create,
    /// Only fields present in the input are checked.
    Update,
}

/// Check `input` under `mode`. `Err` carries one message per violated rule
/// (never empty); `Ok` carries the trimmed, parsed fields that were checked.
pub fn validate(input: &ProductInput, mode: Mode) -> Result<ProductChanges, Vec<String>> {
    let mut errors = Vec::new();

    // In create mode an absent field is checked as if it were empty.
    let checked = |present: bool| present || mode == Mode::Create;

    let changes = ProductChanges {
        title: checked(input.title.is_some())
            .then(|| keep(&mut errors, required_text(flatten(&input.title), TITLE_REQUIRED)))
            .flatten(),
        image: checked(input.image.is_some())
            .then(|| keep(&mut errors, image_url(flatten(&input.image))))
            .flatten(),
        description: checked(input.description.is_some())
            .then(|| {
                keep(
                    &mut errors,
                    required_text(flatten(&input.description), DESCRIPTION_REQUIRED),
                )
            })
            .flatten(),
        price: match &input.price {
            Some(value) => keep(&mut errors, price(value.as_ref())),
            // A missing price counts as zero.
            None if mode == Mode::Create => keep(&mut errors, positive(0.0)),
            None => None,
        },
    };

    if errors.is_empty() {
        Ok(changes)
    } else {
        Err(errors)
    }
}

/// Create-mode check that also requires every field to be set.
pub fn validate_create(input: &ProductInput) -> Result<NewProduct, Vec<String>> {
    NewProduct::try_from(validate(input, Mode::Create)?)
}

impl TryFrom<ProductChanges> for NewProduct {
    type Error = Vec<String>;

    fn try_from(changes: ProductChanges) -> Result<Self, Self::Error> {
        match changes {
            ProductChanges {
                title: Some(title),
                image: Some(image),
                description: Some(description),
                price: Some(price),
            } => Ok(NewProduct {
                title,
                image,
                description,
                price,
            }),
            partial => Err([
                (partial.title.is_none(), TITLE_REQUIRED),
                (partial.image.is_none(), IMAGE_REQUIRED),
                (partial.description.is_none(), DESCRIPTION_REQUIRED),
                (partial.price.is_none(), PRICE_NOT_POSITIVE),
            ]
            .into_iter()
            .filter(|(missing, _)| *missing)
            .map(|(_, msg)| msg.to_string())
            .collect()),
        }
    }
}

// ── Individual rules ──────────────────────────────────────────────────────────

fn keep<T>(errors: &mut Vec<String>, result: Result<T, &'static str>) -> Option<T> {
    result.map_err(|msg| errors.push(msg.to_string())).ok()
}

fn flatten(field: &Option<Option<String>>) -> Option<&str> {
    field.as_ref().and_then(|v| v.as_deref())
}

fn required_text(value: Option<&str>, message: &'static str) -> Result<String, &'static str> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(message),
    }
}

// The scheme must open the raw value; leading whitespace is not forgiven.
fn image_url(value: Option<&str>) -> Result<String, &'static str> {
    let url = required_text(value, IMAGE_REQUIRED)?;
    let raw = value.unwrap_or_default();
    if URL_SCHEMES.iter().any(|scheme| raw.starts_with(scheme)) {
        Ok(url)
    } else {
        Err(IMAGE_INVALID)
    }
}

fn price(value: Option<&PriceInput>) -> Result<f64, &'static str> {
    let number = match value {
        Some(PriceInput::Number(n)) => *n,
        Some(PriceInput::Text(s)) => s.trim().parse::<f64>().map_err(|_| PRICE_NOT_NUMBER)?,
        None => return Err(PRICE_NOT_NUMBER),
    };
    if !number.is_finite() {
        return Err(PRICE_NOT_NUMBER);
    }
    positive(number)
}

fn positive(number: f64) -> Result<f64, &'static str> {
    if number > 0.0 {
        Ok(number)
    } else {
        Err(PRICE_NOT_POSITIVE)
    }
}

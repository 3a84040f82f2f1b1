//! Form validation and binding for café submissions.
//!
//! `CafeForm` carries the raw field strings exactly as submitted, so a
//! failed submission can be re-rendered untouched. `into_new_cafe` is the
//! only place form strings become domain values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::db::cafes::{Cafe, NewCafe};

/// Per-field error messages, keyed by field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CafeForm {
    #[validate(length(min = 1, message = "This field is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "This field is required"),
        url(message = "Must be a valid URL")
    )]
    pub map_url: String,

    #[validate(
        length(min = 1, message = "This field is required"),
        url(message = "Must be a valid URL")
    )]
    pub img_url: String,

    #[validate(length(min = 1, message = "This field is required"))]
    pub location: String,

    #[validate(length(min = 1, message = "This field is required"))]
    pub seats: String,

    #[validate(custom(function = validate_flag, message = "Must be 0 or 1"))]
    pub has_toilet: String,

    #[validate(custom(function = validate_flag, message = "Must be 0 or 1"))]
    pub has_wifi: String,

    #[validate(custom(function = validate_flag, message = "Must be 0 or 1"))]
    pub has_sockets: String,

    #[validate(custom(function = validate_flag, message = "Must be 0 or 1"))]
    pub can_take_calls: String,

    #[validate(length(min = 1, message = "This field is required"))]
    pub coffee_price: String,

    #[serde(default)]
    pub csrf_token: String,
}

/// Body of the delete confirmation form.
#[derive(Debug, Deserialize)]
pub struct ConfirmForm {
    #[serde(default)]
    pub csrf_token: String,
}

fn validate_flag(value: &str) -> Result<(), ValidationError> {
    match value {
        "0" | "1" => Ok(()),
        _ => Err(ValidationError::new("flag")),
    }
}

impl CafeForm {
    /// Explicit mapping from validated form strings to the entity field set.
    /// Only call after `validate()` has passed.
    pub fn into_new_cafe(self) -> NewCafe {
        NewCafe {
            name: self.name,
            map_url: self.map_url,
            img_url: self.img_url,
            location: self.location,
            seats: self.seats,
            has_toilet: self.has_toilet == "1",
            has_wifi: self.has_wifi == "1",
            has_sockets: self.has_sockets == "1",
            can_take_calls: self.can_take_calls == "1",
            coffee_price: Some(self.coffee_price),
        }
    }

    /// Pre-populate the form from an existing row, for the edit view.
    pub fn from_cafe(cafe: &Cafe) -> Self {
        Self {
            name: cafe.name.clone(),
            map_url: cafe.map_url.clone(),
            img_url: cafe.img_url.clone(),
            location: cafe.location.clone(),
            seats: cafe.seats.clone(),
            has_toilet: flag_string(cafe.has_toilet),
            has_wifi: flag_string(cafe.has_wifi),
            has_sockets: flag_string(cafe.has_sockets),
            can_take_calls: flag_string(cafe.can_take_calls),
            coffee_price: cafe.coffee_price.clone().unwrap_or_default(),
            csrf_token: String::new(),
        }
    }
}

fn flag_string(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

/// Flatten `ValidationErrors` into template-friendly per-field messages.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CafeForm {
        CafeForm {
            name: "Bean There".into(),
            map_url: "https://maps.example/x".into(),
            img_url: "https://img.example/y".into(),
            location: "Downtown".into(),
            seats: "10-20".into(),
            has_toilet: "1".into(),
            has_wifi: "1".into(),
            has_sockets: "0".into(),
            can_take_calls: "0".into(),
            coffee_price: "£2.50".into(),
            csrf_token: String::new(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn empty_required_field_is_reported() {
        let mut form = valid_form();
        form.name = String::new();

        let errors = form.validate().unwrap_err();
        let errors = field_errors(&errors);
        assert_eq!(errors["name"], vec!["This field is required"]);
        assert!(!errors.contains_key("location"));
    }

    #[test]
    fn malformed_url_is_reported() {
        let mut form = valid_form();
        form.map_url = "not a url".into();

        let errors = field_errors(&form.validate().unwrap_err());
        assert_eq!(errors["map_url"], vec!["Must be a valid URL"]);
    }

    #[test]
    fn flag_outside_zero_one_is_reported() {
        let mut form = valid_form();
        form.has_wifi = "2".into();

        let errors = field_errors(&form.validate().unwrap_err());
        assert_eq!(errors["has_wifi"], vec!["Must be 0 or 1"]);
    }

    #[test]
    fn mapping_to_entity_converts_flags() {
        let cafe = valid_form().into_new_cafe();
        assert!(cafe.has_toilet);
        assert!(cafe.has_wifi);
        assert!(!cafe.has_sockets);
        assert!(!cafe.can_take_calls);
        assert_eq!(cafe.coffee_price.as_deref(), Some("£2.50"));
    }

    #[test]
    fn prefill_round_trips_through_the_form() {
        let entity = valid_form().into_new_cafe();
        let cafe = Cafe {
            id: 7,
            name: entity.name.clone(),
            map_url: entity.map_url.clone(),
            img_url: entity.img_url.clone(),
            location: entity.location.clone(),
            seats: entity.seats.clone(),
            has_toilet: entity.has_toilet,
            has_wifi: entity.has_wifi,
            has_sockets: entity.has_sockets,
            can_take_calls: entity.can_take_calls,
            coffee_price: entity.coffee_price.clone(),
        };

        let form = CafeForm::from_cafe(&cafe);
        assert!(form.validate().is_ok());
        assert_eq!(form.into_new_cafe(), entity);
    }
}

//! Document shapes persisted in the `users` and `books` collections.
//!
//! Every field a client may omit is an `Option` and is left out of the stored
//! document (and of JSON output) when absent.
//!
//! Book fields are cast rather than type-checked: scalars become text in text
//! fields and numeric strings become the rating. Arrays, objects and
//! non-numeric ratings cannot be cast and fail deserialization.

use serde::{Deserialize, Deserializer, Serialize};

/// A registered account. `password` always holds a bcrypt hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password: String,
}

/// A book entry as supplied by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    #[serde(
        default,
        deserialize_with = "cast::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "cast::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "cast::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "cast::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cover_pic: Option<String>,
    #[serde(
        default,
        deserialize_with = "cast::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub about_book: Option<String>,
    #[serde(
        default,
        deserialize_with = "cast::number",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,
    #[serde(
        default,
        deserialize_with = "cast::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub read_status: Option<String>,
    #[serde(
        default,
        deserialize_with = "cast::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub about_author: Option<String>,
}

mod cast {
    use super::*;
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
    }

    /// Integral floats print without a fractional part, as `123` not `123.0`.
    fn number_text(value: f64) -> String {
        if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else {
            value.to_string()
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let Some(scalar) = Option::<Scalar>::deserialize(deserializer)
            .map_err(|_| D::Error::custom("value cannot be cast to a string"))?
        else {
            return Ok(None);
        };
        Ok(Some(match scalar {
            Scalar::Text(text) => text,
            Scalar::Bool(flag) => flag.to_string(),
            Scalar::Int(number) => number.to_string(),
            Scalar::Float(number) => number_text(number),
        }))
    }

    /// An empty or blank string casts to no rating.
    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let Some(scalar) = Option::<Scalar>::deserialize(deserializer)
            .map_err(|_| D::Error::custom("value cannot be cast to a number"))?
        else {
            return Ok(None);
        };
        match scalar {
            Scalar::Float(number) => Ok(Some(number)),
            Scalar::Int(number) => Ok(Some(number as f64)),
            Scalar::Bool(flag) => Ok(Some(if flag { 1.0 } else { 0.0 })),
            Scalar::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                match trimmed.parse::<f64>() {
                    Ok(number) if number.is_finite() => Ok(Some(number)),
                    _ => Err(D::Error::custom(format!(
                        "\"{text}\" cannot be cast to a number"
                    ))),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_book_fields_are_not_serialized() {
        let book = BookRecord {
            title: Some("Dune".into()),
            rating: Some(4.5),
            ..BookRecord::default()
        };
        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value, serde_json::json!({"title": "Dune", "rating": 4.5}));
    }

    #[test]
    fn store_generated_fields_are_ignored_on_read() {
        let book: BookRecord = serde_json::from_value(serde_json::json!({
            "_id": "650c1f",
            "__v": 0,
            "id": "b1",
            "read_status": "READ"
        }))
        .unwrap();
        assert_eq!(book.id.as_deref(), Some("b1"));
        assert_eq!(book.read_status.as_deref(), Some("READ"));
        assert_eq!(book.title, None);
    }

    #[test]
    fn scalars_are_cast_into_book_fields() {
        let book: BookRecord = serde_json::from_value(serde_json::json!({
            "id": 42,
            "title": 123,
            "author_name": true,
            "about_book": 2.5,
            "rating": "4.5",
            "read_status": null
        }))
        .unwrap();
        assert_eq!(book.id.as_deref(), Some("42"));
        assert_eq!(book.title.as_deref(), Some("123"));
        assert_eq!(book.author_name.as_deref(), Some("true"));
        assert_eq!(book.about_book.as_deref(), Some("2.5"));
        assert_eq!(book.rating, Some(4.5));
        assert_eq!(book.read_status, None);
    }

    #[test]
    fn integral_ratings_and_blank_strings() {
        let book: BookRecord =
            serde_json::from_value(serde_json::json!({"rating": 4, "title": "x"})).unwrap();
        assert_eq!(book.rating, Some(4.0));
        let book: BookRecord =
            serde_json::from_value(serde_json::json!({"rating": " "})).unwrap();
        assert_eq!(book.rating, None);
    }

    #[test]
    fn uncastable_values_are_rejected() {
        for value in [
            serde_json::json!({"rating": "four"}),
            serde_json::json!({"rating": "NaN"}),
            serde_json::json!({"rating": [1]}),
            serde_json::json!({"title": {"nested": true}}),
            serde_json::json!({"title": ["a", "b"]}),
        ] {
            assert!(serde_json::from_value::<BookRecord>(value.clone()).is_err(), "{value}");
        }
    }

    #[test]
    fn user_without_username_round_trips() {
        let user = UserRecord {
            username: None,
            password: "$2b$04$hash".into(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value, serde_json::json!({"password": "$2b$04$hash"}));
    }
}

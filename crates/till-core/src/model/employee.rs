use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{normalize, ParseEnumError};
use crate::view::{FieldValue, Tabular};

/// The two access roles the server understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Seller,
}

impl Role {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Seller => "seller",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Seller
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "admin" => Ok(Self::Admin),
            "seller" => Ok(Self::Seller),
            _ => Err(ParseEnumError {
                expected: "role",
                got: s.to_string(),
            }),
        }
    }
}

/// An employee row from `GET /users/all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

impl Tabular for Employee {
    const FILTER_KEYS: &'static [&'static str] = &["id", "username", "full_name", "email"];

    #[allow(clippy::cast_precision_loss)]
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::Number(self.id as f64),
            "username" => FieldValue::Text(self.username.clone()),
            "full_name" => self.full_name.clone().map_or(FieldValue::Empty, FieldValue::Text),
            "email" => self.email.clone().map_or(FieldValue::Empty, FieldValue::Text),
            "role" => FieldValue::Text(self.role.to_string()),
            _ => FieldValue::Empty,
        }
    }
}

/// Body for `POST /auth/register` (also used to create employees).
#[derive(Debug, Clone, Serialize)]
pub struct NewEmployee {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// A weekly shift row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: i64,
    pub user_id: i64,
    /// 0 = Sunday through 6 = Saturday; the server owns the convention.
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

/// Body for `POST /shifts`.
#[derive(Debug, Clone, Serialize)]
pub struct NewShift {
    pub user_id: i64,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

#[cfg(test)]
mod tests {
    use super::{Employee, Role};
    use crate::view::{FieldValue, Tabular};
    use std::str::FromStr;

    #[test]
    fn role_json_roundtrips() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"seller\"").unwrap(),
            Role::Seller
        );
    }

    #[test]
    fn role_display_parse_roundtrips() {
        for value in [Role::Admin, Role::Seller] {
            let rendered = value.to_string();
            assert_eq!(Role::from_str(&rendered).unwrap(), value);
        }
        assert!(Role::from_str("manager").is_err());
    }

    #[test]
    fn employee_deserializes_with_missing_optionals() {
        let emp: Employee =
            serde_json::from_str(r#"{"id":3,"username":"ana","role":"seller"}"#).unwrap();
        assert_eq!(emp.id, 3);
        assert!(emp.full_name.is_none());
        assert_eq!(emp.field("full_name"), FieldValue::Empty);
    }

    #[test]
    fn employee_fields_cover_filter_keys() {
        let emp = Employee {
            id: 1,
            username: "ana".into(),
            full_name: Some("Ana Diaz".into()),
            email: Some("ana@shop.test".into()),
            role: Role::Seller,
        };
        for key in Employee::FILTER_KEYS {
            assert_ne!(emp.field(key), FieldValue::Empty, "blank field for {key}");
        }
    }
}

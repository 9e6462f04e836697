//! Wire types shared with the expense API.

use serde::{Deserialize, Serialize};

mod money;

pub use money::{Amount, ParseAmountError};

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(alias = "message")]
    pub error: String,
}

pub mod auth {
    use std::fmt;

    use super::*;

    /// Body of `POST /login` and `POST /register`.
    #[derive(Clone, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        pub password: String,
    }

    impl fmt::Debug for Credentials {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("Credentials")
                .field("email", &self.email)
                .field("password", &"********")
                .finish()
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub token: String,
    }
}

pub mod budget {
    use super::*;

    /// Body of `GET /me/budget`. A missing or null value means "no budget".
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct BudgetResponse {
        #[serde(default)]
        pub budget: Option<Amount>,
    }

    /// Body of `PUT /me/budget`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetUpdate {
        pub budget: Amount,
    }
}

pub mod expense {
    use std::fmt;

    use chrono::{NaiveDate, NaiveDateTime};
    use serde::{
        Deserializer, Serializer,
        de::{self, Visitor},
    };

    use super::*;

    /// Server-assigned expense identifier.
    ///
    /// The API may send it as a JSON string or number; it is kept as text and
    /// only ever used as an opaque key and URL segment.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct ExpenseId(String);

    impl ExpenseId {
        pub fn new(id: impl Into<String>) -> Self {
            Self(id.into())
        }

        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl fmt::Display for ExpenseId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl Serialize for ExpenseId {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.0)
        }
    }

    impl<'de> Deserialize<'de> for ExpenseId {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            struct IdVisitor;

            impl Visitor<'_> for IdVisitor {
                type Value = ExpenseId;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("an expense id as string or integer")
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<ExpenseId, E> {
                    Ok(ExpenseId(v.to_string()))
                }

                fn visit_i64<E: de::Error>(self, v: i64) -> Result<ExpenseId, E> {
                    Ok(ExpenseId(v.to_string()))
                }

                fn visit_u64<E: de::Error>(self, v: u64) -> Result<ExpenseId, E> {
                    Ok(ExpenseId(v.to_string()))
                }
            }

            deserializer.deserialize_any(IdVisitor)
        }
    }

    /// An expense as returned by `GET /expenses` and `POST /expenses`.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Expense {
        #[serde(alias = "_id")]
        pub id: ExpenseId,
        pub amount: Amount,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub category: Option<String>,
        /// Either a plain date or a full timestamp; the time part is kept
        /// until the record is copied into a draft.
        #[serde(with = "expense_date")]
        pub date: NaiveDateTime,
    }

    impl Expense {
        /// Calendar day of the expense, time component dropped.
        pub fn day(&self) -> NaiveDate {
            self.date.date()
        }
    }

    /// Body of `POST /expenses` and `PUT /expenses/{id}`.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub amount: Amount,
        pub description: Option<String>,
        pub category: Option<String>,
        pub date: NaiveDate,
    }

    mod expense_date {
        use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
        use serde::{Deserialize, Deserializer, Serializer, de};

        pub(super) fn serialize<S: Serializer>(
            value: &NaiveDateTime,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            let text = if value.time() == NaiveTime::MIN {
                value.format("%Y-%m-%d").to_string()
            } else {
                value.format("%Y-%m-%dT%H:%M:%S").to_string()
            };
            serializer.serialize_str(&text)
        }

        pub(super) fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<NaiveDateTime, D::Error> {
            let raw = String::deserialize(deserializer)?;
            parse(raw.trim())
                .ok_or_else(|| de::Error::custom(format!("invalid expense date: {raw}")))
        }

        fn parse(raw: &str) -> Option<NaiveDateTime> {
            if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                return Some(day.and_time(NaiveTime::MIN));
            }
            // Keep the wall clock of the sender so truncation yields their day.
            if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
                return Some(stamp.naive_local());
            }
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn accepts_numeric_and_text_ids() {
            let numeric: Expense = serde_json::from_str(
                r#"{"id": 7, "amount": 50, "description": "Zakupy", "category": "Spożywcze", "date": "2025-06-01"}"#,
            )
            .unwrap();
            let text: Expense =
                serde_json::from_str(r#"{"_id": "abc", "amount": "3.50", "date": "2025-06-01"}"#)
                    .unwrap();
            assert_eq!(numeric.id.as_str(), "7");
            assert_eq!(text.id.as_str(), "abc");
            assert_eq!(text.description, None);
            assert_eq!(text.amount, Amount::new(350));
        }

        #[test]
        fn keeps_time_until_truncated() {
            let expense: Expense = serde_json::from_str(
                r#"{"id": "1", "amount": 10, "date": "2025-06-01T22:15:00+02:00"}"#,
            )
            .unwrap();
            assert_eq!(expense.date.format("%H:%M").to_string(), "22:15");
            assert_eq!(expense.day(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());

            let utc: Expense = serde_json::from_str(
                r#"{"id": "2", "amount": 10, "date": "2025-06-02T00:00:00.000Z"}"#,
            )
            .unwrap();
            assert_eq!(utc.day(), NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        }

        #[test]
        fn rejects_unparseable_dates() {
            let res = serde_json::from_str::<Expense>(
                r#"{"id": "1", "amount": 10, "date": "wczoraj"}"#,
            );
            assert!(res.is_err());
        }

        #[test]
        fn new_expense_sends_plain_date() {
            let body = ExpenseNew {
                amount: Amount::new(5000),
                description: Some("Zakupy".to_string()),
                category: None,
                date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            };
            let json = serde_json::to_value(&body).unwrap();
            assert_eq!(json["date"], "2025-06-01");
            assert_eq!(json["amount"], 50.0);
            assert!(json["category"].is_null());
        }
    }
}

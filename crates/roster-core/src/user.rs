use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid record id: {raw:?}")]
pub struct RecordIdError {
    pub raw: String,
}

/// Server-assigned identifier of a record.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = RecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(RecordId)
            .map_err(|_| RecordIdError { raw: s.to_string() })
    }
}

/// A user record as served by the remote collection.
///
/// Every field defaults so partial payloads still decode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub maiden_name: String,
    pub age: Option<u32>,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub birth_date: String,
    pub image: String,
    pub blood_group: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub eye_color: String,
    pub hair: Hair,
    pub ip: String,
    pub address: Address,
    pub mac_address: String,
    pub university: String,
    pub bank: Bank,
    pub company: Company,
    pub ein: String,
    pub ssn: String,
    pub user_agent: String,
    pub crypto: Crypto,
    pub role: String,
}

impl User {
    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (true, true) => String::new(),
        }
    }

    /// Initials for the avatar glyph; `?` when the record has no name.
    pub fn initials(&self) -> String {
        let initials: String = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hair {
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub address: String,
    pub city: String,
    pub state: String,
    pub state_code: String,
    pub postal_code: String,
    pub coordinates: Coordinates,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Bank {
    pub card_expire: String,
    pub card_number: String,
    pub card_type: String,
    pub currency: String,
    pub iban: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub department: String,
    pub name: String,
    pub title: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Crypto {
    pub coin: String,
    pub wallet: String,
    pub network: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMILY: &str = r#"{
        "id": 1,
        "firstName": "Emily",
        "lastName": "Johnson",
        "maidenName": "Smith",
        "age": 28,
        "gender": "female",
        "email": "emily.johnson@x.dummyjson.com",
        "phone": "+81 965-431-3024",
        "username": "emilys",
        "birthDate": "1996-5-30",
        "height": 193.24,
        "weight": 63.16,
        "hair": { "color": "Brown", "type": "Curly" },
        "address": {
            "address": "626 Main Street",
            "city": "Phoenix",
            "state": "Mississippi",
            "stateCode": "MS",
            "postalCode": "29112",
            "coordinates": { "lat": -77.16213, "lng": -92.084824 },
            "country": "United States"
        },
        "company": {
            "department": "Engineering",
            "name": "Dooley, Kozey and Cronin",
            "title": "Sales Manager"
        },
        "crypto": { "coin": "Bitcoin", "wallet": "0xb9fc", "network": "Ethereum (ERC20)" },
        "role": "admin"
    }"#;

    #[test]
    fn decodes_nested_payload() {
        let user: User = serde_json::from_str(EMILY).unwrap();
        assert_eq!(user.id, RecordId(1));
        assert_eq!(user.full_name(), "Emily Johnson");
        assert_eq!(user.hair.kind, "Curly");
        assert_eq!(user.address.state_code, "MS");
        assert_eq!(user.company.name, "Dooley, Kozey and Cronin");
        assert_eq!(user.age, Some(28));
        assert!(user.bank.iban.is_empty());
    }

    #[test]
    fn initials_fall_back_when_unnamed() {
        let user = User {
            id: RecordId(9),
            ..Default::default()
        };
        assert_eq!(user.initials(), "?");
        let user = User {
            first_name: "ada".into(),
            last_name: "lovelace".into(),
            ..user
        };
        assert_eq!(user.initials(), "AL");
    }

    #[test]
    fn record_ids_parse_from_path_segments() {
        assert_eq!("42".parse::<RecordId>(), Ok(RecordId(42)));
        assert!("abc".parse::<RecordId>().is_err());
    }
}

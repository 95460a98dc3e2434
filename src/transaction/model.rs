use chrono::Utc;
use serde::{Deserialize, Serialize};

/// `from` value recorded when a transaction registers a previously unknown property.
pub const CREATOR: &str = "creator";

/// A real-world asset tracked by the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Unique identifier (e.g. a parcel number). Immutable once registered.
    pub id: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub value: i64,
}

impl Property {
    /// A bare reference to a property by id, enough for a plain transfer.
    pub fn reference(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }
}

/// A registration or transfer of a property.
///
/// Field order is part of the block hash preimage (transactions are hashed
/// as their JSON encoding), so it must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Claimed current owner; empty (or [`CREATOR`]) for a first registration.
    #[serde(default)]
    pub from: String,
    pub to: String,
    pub property: Property,
    #[serde(default)]
    pub timestamp: i64, // Unix timestamp (UTC)
}

impl Transaction {
    /// Build a transaction stamped with the current UTC time.
    pub fn new(from: impl Into<String>, to: impl Into<String>, property: Property) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            property,
            timestamp: Utc::now().timestamp(),
        }
    }

    /// The snapshot this transaction leaves in the registry once sealed.
    pub fn resulting_property(&self) -> Property {
        Property {
            owner: self.to.clone(),
            ..self.property.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resulting_property_takes_new_owner() {
        let tx = Transaction::new(
            "alice",
            "bob",
            Property {
                id: "p1".into(),
                owner: "alice".into(),
                description: "House".into(),
                location: "1 Main St".into(),
                value: 10,
            },
        );
        let prop = tx.resulting_property();
        assert_eq!(prop.owner, "bob");
        assert_eq!(prop.description, "House");
        assert_eq!(prop.value, 10);
    }

    #[test]
    fn partial_payload_deserializes_with_defaults() {
        let tx: Transaction =
            serde_json::from_str(r#"{"to":"bob","property":{"id":"p1"}}"#).unwrap();
        assert_eq!(tx.from, "");
        assert_eq!(tx.timestamp, 0);
        assert_eq!(tx.property, Property::reference("p1"));
    }
}

//! ID type wrappers for type safety.

mod id_macro;

use serde::{Deserialize, Serialize};

use id_macro::impl_id;

/// Identifies one scan session (one capture through to completion or cancel).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanSessionId(String);

/// Marketplace product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl_id!(ScanSessionId, ProductId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(ScanSessionId::new(), ScanSessionId::new());
    }

    #[test]
    fn product_id_round_trips_through_str() {
        let id = ProductId::from("p1");
        assert_eq!(id.as_str(), "p1");
        assert_eq!(id.to_string(), "p1");
        assert_eq!(id.into_inner(), "p1".to_string());
    }
}

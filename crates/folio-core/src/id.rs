use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Identifies an active reveal in the scheduler.
    pub struct RevealId;

    /// Identifies a view (page instance) that owns reveals.
    pub struct ViewId;
}

/// Stable identifier of a content item. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(pub u32);

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn content_id_equality() {
        assert_eq!(ContentId(3), ContentId(3));
        assert_ne!(ContentId(3), ContentId(4));
    }

    #[test]
    fn content_id_deserializes_from_bare_number() {
        let id: ContentId = serde_json::from_str("17").unwrap();
        assert_eq!(id, ContentId(17));
    }

    #[test]
    fn reveal_ids_are_distinct_after_removal() {
        let mut sm: SlotMap<RevealId, ()> = SlotMap::with_key();
        let a = sm.insert(());
        sm.remove(a);
        let b = sm.insert(());
        assert_ne!(a, b);
        assert!(!sm.contains_key(a));
    }
}

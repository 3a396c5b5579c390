//! Stable ids for accordion instances and their items.

use uuid::Uuid;

/// Return `explicit` when supplied, otherwise a freshly generated unique id.
///
/// Call once per accordion instance and keep the result; generated ids are
/// random, so calling again yields a different one.
pub fn resolve_id(explicit: Option<&str>) -> String {
    match explicit {
        Some(id) => id.to_string(),
        None => format!("pleat-{}", &Uuid::new_v4().simple().to_string()[..8]),
    }
}

/// Id of the item at `index` within the accordion `base_id`.
pub fn item_id(base_id: &str, index: usize) -> String {
    format!("{base_id}-{index}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_id_is_kept() {
        assert_eq!(resolve_id(Some("faq")), "faq");
    }

    #[test]
    fn generated_ids_are_prefixed_and_distinct() {
        let a = resolve_id(None);
        let b = resolve_id(None);
        assert!(a.starts_with("pleat-"));
        assert_eq!(a.len(), "pleat-".len() + 8);
        assert_ne!(a, b);
    }

    #[test]
    fn item_ids_append_index() {
        assert_eq!(item_id("faq", 0), "faq-0");
        assert_eq!(item_id("faq", 12), "faq-12");
    }
}

use std::collections::HashSet;

use crate::parse::document::Tag;

/// Derive the set of resource names from the tag list. Membership in this
/// set decides whether a reference resolves to a name token or is expanded
/// inline.
pub fn resource_names(tags: &[Tag]) -> HashSet<String> {
    tags.iter().map(|tag| resource_key(&tag.name)).collect()
}

/// Naive plural-to-singular heuristic: remove the first space, drop the
/// trailing character. "Resource Pools" becomes "ResourcePool". Collisions
/// between transformed names silently shadow.
pub fn resource_key(tag_name: &str) -> String {
    let mut squashed = tag_name.replacen(' ', "", 1);
    squashed.pop();
    squashed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_key() {
        assert_eq!(resource_key("Deployments"), "Deployment");
        assert_eq!(resource_key("Resource Pools"), "ResourcePool");
        assert_eq!(resource_key("Events"), "Event");
        // Only the first space is removed.
        assert_eq!(resource_key("Big Blue Boxes"), "BigBlue Boxe");
    }

    #[test]
    fn test_resource_names_from_tags() {
        let tags = vec![
            Tag {
                name: "Deployments".to_string(),
                description: None,
            },
            Tag {
                name: "Resource Modules".to_string(),
                description: None,
            },
        ];
        let names = resource_names(&tags);
        assert!(names.contains("Deployment"));
        assert!(names.contains("ResourceModule"));
        assert_eq!(names.len(), 2);
    }
}

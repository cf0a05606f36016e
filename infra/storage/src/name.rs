//! Validated collection and resource names.
//!
//! Both kinds of name become exactly one path segment under the store root, so
//! anything that could make the operating system see more than one segment is
//! rejected up front.

use crate::error::StoreError;
use crate::resolver;
use std::fmt;
use std::path::Path;

/// Why a raw string cannot be used as a single path segment.
fn segment_violation(value: &str) -> Option<&'static str> {
    if value == "." || value == ".." {
        return Some("relative directory markers are not allowed");
    }
    if value.contains(['/', '\\']) {
        return Some("path separators are not allowed");
    }
    if value.contains('\0') {
        return Some("NUL bytes are not allowed");
    }
    None
}

/// Resource names additionally may not collide with in-flight temp files.
fn resource_violation(value: &str) -> Option<&'static str> {
    segment_violation(value).or_else(|| {
        resolver::is_temp(Path::new(value))
            .then_some("names ending in '.tmp' are reserved for in-flight writes")
    })
}

macro_rules! segment_name {
    ($(#[$meta:meta])* $name:ident, $kind:literal, $missing:ident, $check:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<&str> for $name {
            type Error = StoreError;

            fn try_from(value: &str) -> Result<Self, StoreError> {
                if value.is_empty() {
                    return Err(StoreError::$missing { context: None });
                }
                if let Some(reason) = $check(value) {
                    return Err(StoreError::InvalidName {
                        kind: $kind,
                        name: value.to_owned().into(),
                        context: Some(reason.into()),
                    });
                }
                Ok(Self(value.to_owned()))
            }
        }

        impl TryFrom<String> for $name {
            type Error = StoreError;

            fn try_from(value: String) -> Result<Self, StoreError> {
                Self::try_from(value.as_str())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<Path> for $name {
            fn as_ref(&self) -> &Path {
                Path::new(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

segment_name!(
    /// Name of a collection, i.e. a directory directly below the store root.
    CollectionName,
    "collection",
    MissingCollection,
    segment_violation
);

segment_name!(
    /// Name of a resource, i.e. a record file inside a collection directory.
    ResourceName,
    "resource",
    MissingResource,
    resource_violation
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_segments() {
        let name = CollectionName::try_from("users").unwrap();
        assert_eq!(name.as_str(), "users");
        assert_eq!(ResourceName::try_from("john.doe").unwrap().to_string(), "john.doe");
    }

    #[test]
    fn empty_names_map_to_missing_errors() {
        assert!(matches!(
            CollectionName::try_from(""),
            Err(StoreError::MissingCollection { .. })
        ));
        assert!(matches!(ResourceName::try_from(""), Err(StoreError::MissingResource { .. })));
    }

    #[test]
    fn rejects_traversal_and_separators() {
        for raw in ["..", ".", "a/b", "a\\b", "../etc", "nul\0byte"] {
            let err = ResourceName::try_from(raw).expect_err(raw);
            match err {
                StoreError::InvalidName { kind, .. } => assert_eq!(kind, "resource"),
                other => panic!("unexpected error for {raw:?}: {other:?}"),
            }
        }
    }

    #[test]
    fn resource_names_cannot_address_temp_files() {
        let err = ResourceName::try_from("john.json.tmp").unwrap_err();
        assert!(matches!(err, StoreError::InvalidName { kind: "resource", .. }), "got {err:?}");
        assert!(ResourceName::try_from("tmp").is_ok());
        assert!(CollectionName::try_from("cache.tmp").is_ok());
    }
}

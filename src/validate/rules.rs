//! Naming and version rules shared by the schema validator and the builders.

use std::sync::LazyLock;

use regex::Regex;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9-]+$").expect("name pattern is a valid regex")
});

pub const NAME_CONSTRAINT: &str =
    "Names must contain only lowercase letters, digits and hyphens ([a-z0-9-]+).";

pub const VERSION_CONSTRAINT: &str =
    "Versions must follow semantic versioning MAJOR.MINOR.PATCH with optional pre-release/build suffix.";

/// `[a-z0-9-]+`, no surrounding whitespace.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

/// `MAJOR.MINOR.PATCH[-pre][+build]`.
pub fn is_valid_version(version: &str) -> bool {
    semver::Version::parse(version).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        assert!(is_valid_name("greeting-agent"));
        assert!(is_valid_name("v2"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("Greeting"));
        assert!(!is_valid_name("greet_user"));
        assert!(!is_valid_name("greet user"));
    }

    #[test]
    fn versions() {
        assert!(is_valid_version("1.0.0"));
        assert!(is_valid_version("0.3.12-beta.1"));
        assert!(is_valid_version("2.0.0+build.7"));
        assert!(!is_valid_version("1.0"));
        assert!(!is_valid_version("v1.0.0"));
        assert!(!is_valid_version("01.0.0"));
    }
}

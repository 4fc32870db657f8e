//! Macro for implementing Display and FromStr for domain enums
//!
//! Statuses, priorities, task types and view criteria are stored in documents
//! as snake_case keys but arrive from the UI as human labels ("In Progress",
//! "Short-term"). This macro provides one implementation for both directions.
//!
//! # Example
//!
//! ```rust
//! use studybuddy_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Phase {
//!     NotStarted,
//!     InProgress,
//!     Done,
//! }
//!
//! impl_domain_enum_conversions!(Phase {
//!     NotStarted => "not_started",
//!     InProgress => "in_progress",
//!     Done => "done",
//! });
//!
//! assert_eq!("In Progress".parse::<Phase>(), Ok(Phase::InProgress));
//! assert_eq!(Phase::NotStarted.to_string(), "not_started");
//! ```

/// Implements Display and FromStr traits for domain enums
///
/// This macro generates:
/// - Display trait: writes the snake_case storage key
/// - FromStr trait: parses keys and labels case-insensitively, treating spaces
///   and hyphens as underscores
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their storage keys
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let normalized: String = s
                    .trim()
                    .chars()
                    .map(|c| if c == ' ' || c == '-' { '_' } else { c.to_ascii_lowercase() })
                    .collect();
                match normalized.as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStatus {
        Upcoming,
        InProgress,
        ShortTerm,
    }

    impl_domain_enum_conversions!(TestStatus {
        Upcoming => "upcoming",
        InProgress => "in_progress",
        ShortTerm => "short_term",
    });

    #[test]
    fn test_display_writes_storage_key() {
        assert_eq!(TestStatus::Upcoming.to_string(), "upcoming");
        assert_eq!(TestStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn test_fromstr_accepts_keys_and_labels() {
        assert_eq!(TestStatus::from_str("in_progress"), Ok(TestStatus::InProgress));
        assert_eq!(TestStatus::from_str("In Progress"), Ok(TestStatus::InProgress));
        assert_eq!(TestStatus::from_str("IN_PROGRESS"), Ok(TestStatus::InProgress));
        assert_eq!(TestStatus::from_str("Short-term"), Ok(TestStatus::ShortTerm));
        assert_eq!(TestStatus::from_str("  upcoming "), Ok(TestStatus::Upcoming));
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestStatus::from_str("someday");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid TestStatus: someday"));
        assert!(TestStatus::from_str("").is_err());
    }

    mod with_result_alias {
        use std::str::FromStr;

        #[allow(unused_imports)]
        use crate::errors::Result;

        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Mode {
            Focus,
            Review,
        }

        impl_domain_enum_conversions!(Mode {
            Focus => "focus",
            Review => "review",
        });

        #[test]
        fn test_expands_next_to_crate_result_alias() {
            assert_eq!(Mode::from_str("Review"), Ok(Mode::Review));
            assert_eq!(Mode::Focus.to_string(), "focus");
        }
    }
}

//! Core type definitions for docnode

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default maximum length of a normalized id before it is shortened with a hash suffix
pub const DEFAULT_NORMALIZED_ID_MAX_LEN: usize = 96;

/// Number of hex characters of the blake3 digest kept in a shortened id
const HASH_SUFFIX_LEN: usize = 12;

/// Smallest usable length limit: one id character plus `_` and the hash suffix
pub const MIN_NORMALIZED_ID_LEN: usize = HASH_SUFFIX_LEN + 2;

/// Filesystem-safe rendering of an identity token
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedId(pub String);

impl NormalizedId {
    /// Normalize an id with the default length limit
    pub fn from_id(id: &str) -> Self {
        Self::from_id_with_limit(id, DEFAULT_NORMALIZED_ID_MAX_LEN)
    }

    /// Normalize an id, shortening it when longer than `max_len`
    ///
    /// Every character outside `[A-Za-z0-9._-]` becomes `_`. Ids longer than
    /// `max_len`, and ids with non-ASCII characters, keep a prefix and get the
    /// first 12 hex chars of the blake3 hash of the full id appended, so they
    /// stay distinct. Limits below [`MIN_NORMALIZED_ID_LEN`] are raised to it.
    pub fn from_id_with_limit(id: &str, max_len: usize) -> Self {
        let max_len = max_len.max(MIN_NORMALIZED_ID_LEN);
        let mut lossy = false;
        let sanitized: String = id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    lossy |= !c.is_ascii();
                    '_'
                }
            })
            .collect();

        if !lossy && sanitized.len() <= max_len {
            return NormalizedId(sanitized);
        }

        let hash = blake3::hash(id.as_bytes());
        let keep = (max_len - HASH_SUFFIX_LEN - 1).min(sanitized.len());
        NormalizedId(format!(
            "{}_{}",
            &sanitized[..keep],
            &hash.to_hex()[..HASH_SUFFIX_LEN]
        ))
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of member encoded in the prefix of a documentation comment id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberKind {
    /// `N:`
    Namespace,
    /// `T:`
    Type,
    /// `M:`
    Method,
    /// `P:`
    Property,
    /// `F:`
    Field,
    /// `E:`
    Event,
    /// `!:` (unresolved reference) or no recognised prefix
    Unknown,
}

impl MemberKind {
    /// Parse from the single-letter prefix
    pub fn from_prefix(c: char) -> Self {
        match c {
            'N' => MemberKind::Namespace,
            'T' => MemberKind::Type,
            'M' => MemberKind::Method,
            'P' => MemberKind::Property,
            'F' => MemberKind::Field,
            'E' => MemberKind::Event,
            _ => MemberKind::Unknown,
        }
    }

    /// Parse from a user-facing name ("method", "m", ...)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "namespace" => Some(MemberKind::Namespace),
            "t" | "type" => Some(MemberKind::Type),
            "m" | "method" => Some(MemberKind::Method),
            "p" | "property" => Some(MemberKind::Property),
            "f" | "field" => Some(MemberKind::Field),
            "e" | "event" => Some(MemberKind::Event),
            _ => None,
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKind::Namespace => write!(f, "Namespace"),
            MemberKind::Type => write!(f, "Type"),
            MemberKind::Method => write!(f, "Method"),
            MemberKind::Property => write!(f, "Property"),
            MemberKind::Field => write!(f, "Field"),
            MemberKind::Event => write!(f, "Event"),
            MemberKind::Unknown => write!(f, "Unknown"),
        }
    }
}

/// A documentation comment id split into kind and body
///
/// Format: `<prefix>:<qualified name>[(<parameters>)]`, e.g. `M:Ns.Type.Run(System.Int32)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberId {
    pub kind: MemberKind,
    pub body: String,
}

impl MemberId {
    /// Split an id into its kind prefix and body
    pub fn parse(id: &str) -> Self {
        let mut chars = id.chars();
        match (chars.next(), chars.next()) {
            (Some(prefix), Some(':')) => MemberId {
                kind: MemberKind::from_prefix(prefix),
                body: id[prefix.len_utf8() + 1..].to_string(),
            },
            _ => MemberId {
                kind: MemberKind::Unknown,
                body: id.to_string(),
            },
        }
    }

    /// Qualified name without the parameter list
    pub fn full_name(&self) -> &str {
        match self.body.find('(') {
            Some(pos) => &self.body[..pos],
            None => &self.body,
        }
    }

    /// Last dotted segment of the qualified name
    pub fn name(&self) -> &str {
        let full = self.full_name();
        full.rsplit('.').next().unwrap_or(full)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalized_id_replaces_unsafe_chars() {
        let id = NormalizedId::from_id("M:Ns.Type.Run(System.Int32,System.String)");
        assert_eq!(id.as_str(), "M_Ns.Type.Run_System.Int32_System.String_");
    }

    #[test]
    fn test_normalized_id_is_stable() {
        let a = NormalizedId::from_id("T:Ns.List`1");
        let b = NormalizedId::from_id("T:Ns.List`1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_normalized_id_shortens_long_ids() {
        let long = format!("M:Ns.Type.Run({})", "System.Int32,".repeat(20));
        let id = NormalizedId::from_id_with_limit(&long, 40);
        assert_eq!(id.as_str().len(), 40);
        assert!(id
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')));

        let other = format!("M:Ns.Type.Run({})", "System.Int64,".repeat(20));
        assert_ne!(id, NormalizedId::from_id_with_limit(&other, 40));
    }

    #[test]
    fn test_normalized_id_small_limit_is_raised() {
        let id = NormalizedId::from_id_with_limit("T:Ns.SomeLongTypeName", 5);
        assert_eq!(id.as_str().len(), MIN_NORMALIZED_ID_LEN);
        assert!(id.as_str().starts_with("T_"));

        let short = NormalizedId::from_id_with_limit("T:A", 0);
        assert_eq!(short.as_str(), "T_A");
    }

    #[test]
    fn test_normalized_id_non_ascii_gets_hash_suffix() {
        let u = NormalizedId::from_id("T:\u{dc}");
        let o = NormalizedId::from_id("T:\u{d6}");
        assert_ne!(u, o);
        assert!(u.as_str().starts_with("T__"));
        assert_eq!(u.as_str().len(), 3 + 1 + 12);

        let mixed = NormalizedId::from_id("T:\u{dc}n\u{ef}");
        assert!(mixed.as_str().starts_with("T__n__"));
        assert!(mixed.as_str().is_ascii());
        assert_eq!(mixed, NormalizedId::from_id("T:\u{dc}n\u{ef}"));
    }

    #[test]
    fn test_member_id_parse() {
        let id = MemberId::parse("M:Ns.Type.Run(System.Int32)");
        assert_eq!(id.kind, MemberKind::Method);
        assert_eq!(id.full_name(), "Ns.Type.Run");
        assert_eq!(id.name(), "Run");
    }

    #[test]
    fn test_member_id_constructor_name() {
        let id = MemberId::parse("M:Ns.Type.#ctor");
        assert_eq!(id.name(), "#ctor");
    }

    #[test]
    fn test_member_id_without_prefix() {
        let id = MemberId::parse("Ns.Type");
        assert_eq!(id.kind, MemberKind::Unknown);
        assert_eq!(id.full_name(), "Ns.Type");

        let unresolved = MemberId::parse("!:Missing");
        assert_eq!(unresolved.kind, MemberKind::Unknown);
        assert_eq!(unresolved.body, "Missing");
    }

    #[test]
    fn test_member_kind_from_name() {
        assert_eq!(MemberKind::from_name("method"), Some(MemberKind::Method));
        assert_eq!(MemberKind::from_name("T"), Some(MemberKind::Type));
        assert_eq!(MemberKind::from_name("bogus"), None);
    }
}

//! Regex patterns for PHP declaration extraction.
//! Compiled once and shared by every analysis.

use std::sync::LazyLock;

use regex::Regex;

use crate::relations::RELATION_HELPERS;

/// `namespace App\Models;` or `namespace App\Models {`
pub(crate) static NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*namespace\s+\\?([A-Za-z_][A-Za-z0-9_\\]*)\s*[;{]")
        .expect("Invalid namespace regex")
});

/// `use Some\Fqn;` or `use Some\Fqn as Alias;`
///
/// `use function` / `use const` imports do not match.
pub(crate) static USE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*use\s+(\\?[A-Za-z_][A-Za-z0-9_\\]*)(?:\s+as\s+([A-Za-z_][A-Za-z0-9_]*))?\s*;")
        .expect("Invalid use regex")
});

/// `[abstract|final] class Name extends Parent`
pub(crate) static CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:(?:abstract|final)\s+)?class\s+([A-Za-z_][A-Za-z0-9_]*)\s+extends\s+(\\?[A-Za-z_][A-Za-z0-9_\\]*)",
    )
    .expect("Invalid class regex")
});

/// `function name(params) [: ReturnType] { body }`
///
/// The body stops at the first closing brace.
pub(crate) static METHOD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"function\s+([A-Za-z_][A-Za-z0-9_]*)\s*\([^)]*\)\s*(?::\s*\??[A-Za-z0-9_\\|]+\s*)?\{([^}]*)\}",
    )
    .expect("Invalid method regex")
});

/// `return $this->helper(` where `helper` is one of [`RELATION_HELPERS`].
pub(crate) static RELATION_CALL: LazyLock<Regex> = LazyLock::new(|| {
    let helpers = RELATION_HELPERS.join("|");
    Regex::new(&format!(r"return\s+\$this\s*->\s*({helpers})\s*\("))
        .expect("Invalid relation call regex")
});

/// `Name::class`, `\Some\Name::class`
pub(crate) static CLASS_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\\?[A-Za-z_][A-Za-z0-9_\\]*)\s*::\s*class$").expect("Invalid class literal regex")
});

/// A bare, syntactically valid class reference.
pub(crate) static CLASS_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\\?[A-Za-z_][A-Za-z0-9_]*(?:\\[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("Invalid class reference regex")
});

//! Namespaced class identifiers.
//!
//! Identifiers use the backslash as namespace separator (`App\Models\Post`).
//! Every identifier must go through [`normalize`] before it is compared or
//! used as a map key: a leading separator (`\App\Models\Post`) denotes the
//! same class as the unprefixed form.

/// The namespace separator.
pub const SEPARATOR: char = '\\';

/// Strips any leading separators from an identifier.
///
/// # Examples
///
/// ```
/// # use modelgraph_core::identifier::normalize;
/// assert_eq!(normalize("\\App\\Models\\Post"), "App\\Models\\Post");
/// assert_eq!(normalize("Post"), "Post");
/// ```
pub fn normalize(id: &str) -> &str {
    id.trim_start_matches(SEPARATOR)
}

/// Returns the last path segment of an identifier.
///
/// ```
/// # use modelgraph_core::identifier::simple_name;
/// assert_eq!(simple_name("App\\Models\\Post"), "Post");
/// assert_eq!(simple_name("Post"), "Post");
/// ```
pub fn simple_name(id: &str) -> &str {
    let id = normalize(id);
    id.rsplit_once(SEPARATOR).map_or(id, |(_, name)| name)
}

/// Returns the identifier minus its last segment, or an empty string for
/// identifiers in the global namespace.
///
/// ```
/// # use modelgraph_core::identifier::namespace_of;
/// assert_eq!(namespace_of("App\\Models\\Post"), "App\\Models");
/// assert_eq!(namespace_of("Post"), "");
/// ```
pub fn namespace_of(id: &str) -> &str {
    let id = normalize(id);
    id.rsplit_once(SEPARATOR).map_or("", |(namespace, _)| namespace)
}

/// Returns `true` if the identifier contains a namespace separator after
/// normalization.
pub fn is_qualified(id: &str) -> bool {
    normalize(id).contains(SEPARATOR)
}

/// Joins a namespace and a class name into a canonical identifier.
///
/// An empty namespace yields the bare name.
pub fn qualify(namespace: &str, name: &str) -> String {
    let namespace = normalize(namespace).trim_end_matches(SEPARATOR);
    let name = normalize(name);
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{SEPARATOR}{name}")
    }
}

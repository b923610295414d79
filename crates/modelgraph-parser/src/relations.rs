//! Relationship method extraction and target resolution.

use log::trace;
use modelgraph_core::{identifier, model::RelationKind};

use crate::{analyzer::ExtractedRelationship, imports::ImportTable, patterns};

/// Helper method names that declare a relationship when a model method
/// returns their result.
///
/// `belongsToThrough` comes from a widely used extension package and has no
/// dedicated [`RelationKind`]; it is kept as [`RelationKind::Other`].
pub const RELATION_HELPERS: [&str; 12] = [
    "hasOne",
    "morphOne",
    "hasOneThrough",
    "belongsTo",
    "morphTo",
    "hasMany",
    "morphMany",
    "hasManyThrough",
    "belongsToMany",
    "morphToMany",
    "morphedByMany",
    "belongsToThrough",
];

/// Names that refer to the declaring class itself in `X::class`.
const SELF_REFERENCES: &[&str] = &["self", "static"];

/// Resolution context of the class being scanned.
pub(crate) struct Scope<'a> {
    pub(crate) class_id: &'a str,
    pub(crate) namespace: &'a str,
    pub(crate) imports: &'a ImportTable,
}

/// Scans `body` (class declaration to end of file) for relationship
/// methods.
pub(crate) fn extract(body: &str, scope: &Scope<'_>) -> Vec<ExtractedRelationship> {
    let mut relationships = Vec::new();

    for method in patterns::METHOD.captures_iter(body) {
        let name = &method[1];
        let method_body = &method[2];

        let Some(call) = patterns::RELATION_CALL.captures(method_body) else {
            continue;
        };
        let (Some(helper), Some(call_match)) = (call.get(1), call.get(0)) else {
            continue;
        };

        let arguments = &method_body[call_match.end()..];
        let Some(target_id) = resolve_target(first_argument(arguments), scope) else {
            trace!(
                class = scope.class_id,
                method = name,
                helper = helper.as_str();
                "Dropping relationship with unresolvable target"
            );
            continue;
        };

        trace!(
            class = scope.class_id,
            method = name,
            helper = helper.as_str(),
            target = target_id;
            "Found relationship"
        );
        relationships.push(ExtractedRelationship::new(
            name,
            RelationKind::from_helper(helper.as_str()),
            target_id,
        ));
    }

    relationships
}

/// Returns the first top-level argument of a call whose opening parenthesis
/// has already been consumed.
///
/// Nested calls, array literals and quoted strings are skipped over, so a
/// comma or closing parenthesis inside them does not end the argument.
pub(crate) fn first_argument(arguments: &str) -> &str {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (idx, ch) in arguments.char_indices() {
        if let Some(open) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == open {
                quote = None;
            }
            continue;
        }

        match ch {
            '\'' | '"' => quote = Some(ch),
            '(' | '[' => depth += 1,
            ')' | ']' if depth == 0 => return arguments[..idx].trim(),
            ')' | ']' => depth -= 1,
            ',' | ';' if depth == 0 => return arguments[..idx].trim(),
            _ => {}
        }
    }

    arguments.trim()
}

/// Resolves the first helper argument to a model identifier.
///
/// Returns `None` when the argument is empty or not a class reference
/// (variables, method calls, expressions).
pub(crate) fn resolve_target(argument: &str, scope: &Scope<'_>) -> Option<String> {
    let argument = argument.trim();
    if argument.is_empty() {
        return None;
    }

    if let Some(caps) = patterns::CLASS_LITERAL.captures(argument) {
        let reference = identifier::normalize(&caps[1]);
        if SELF_REFERENCES.contains(&reference) {
            return Some(scope.class_id.to_string());
        }
        return resolve_reference(reference, scope);
    }

    if let Some(literal) = string_literal(argument) {
        let unescaped = literal.replace("\\\\", "\\");
        let id = identifier::normalize(&unescaped);
        return patterns::CLASS_REFERENCE
            .is_match(id)
            .then(|| id.to_string());
    }

    if patterns::CLASS_REFERENCE.is_match(argument) {
        return resolve_reference(argument, scope);
    }

    None
}

/// Import lookup by the full reference, then by its simple name; otherwise a
/// qualified reference stands as is and a bare one joins the class
/// namespace.
fn resolve_reference(reference: &str, scope: &Scope<'_>) -> Option<String> {
    let reference = identifier::normalize(reference);
    if reference.is_empty() {
        return None;
    }

    let imported = scope
        .imports
        .resolve(reference)
        .or_else(|| scope.imports.resolve(identifier::simple_name(reference)));
    if let Some(fqn) = imported {
        return Some(fqn.to_string());
    }

    if identifier::is_qualified(reference) || scope.namespace.is_empty() {
        return Some(reference.to_string());
    }

    Some(identifier::qualify(scope.namespace, reference))
}

/// Returns the content of a single- or double-quoted literal.
///
/// `'a' . 'b'` starts and ends with a quote but is an expression, so content
/// holding an unescaped closing quote is rejected.
fn string_literal(argument: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|quote| {
        let content = argument.strip_prefix(quote)?.strip_suffix(quote)?;
        (!contains_unescaped(content, quote)).then_some(content)
    })
}

fn contains_unescaped(content: &str, quote: char) -> bool {
    let mut escaped = false;
    for ch in content.chars() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return true;
        }
    }
    false
}

use std::collections::HashSet;

use crate::domain::customer::{CustomerIdentity, TemplateKind};

const MAX_PART_CHARS: usize = 80;

/// Turn a free-text description into a file-name-safe token.
///
/// Whitespace, path separators, reserved characters and control characters all
/// separate words; words are joined by a single `_`. Words made only of dots are
/// dropped so `..` can never reach a path.
pub fn sanitize_file_name(name: &str) -> String {
    let words: Vec<&str> = name
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .filter(|word| !word.chars().all(|ch| ch == '.'))
        .collect();

    let joined = words.join("_");
    match joined.char_indices().nth(MAX_PART_CHARS) {
        Some((cut, _)) => joined[..cut].trim_end_matches('_').to_string(),
        None => joined,
    }
}

fn is_separator(ch: char) -> bool {
    ch.is_whitespace()
        || ch.is_control()
        || matches!(ch, '/' | '\\' | '<' | '>' | ':' | '"' | '|' | '?' | '*')
}

/// `<Prefix>_<landlord>_<tenant>_<Customer>.<ext>`
pub fn artifact_file_name(
    kind: TemplateKind,
    customer: CustomerIdentity,
    landlord_description: &str,
    tenant_description: &str,
) -> String {
    format!(
        "{}_{}_{}_{}.{}",
        kind.prefix(),
        sanitize_file_name(landlord_description),
        sanitize_file_name(tenant_description),
        customer.label(),
        kind.extension()
    )
}

/// `<Customer>/<file name>`
pub fn artifact_relative_path(customer: CustomerIdentity, file_name: &str) -> String {
    format!("{}/{}", customer.label(), file_name)
}

/// Reserve `path`, or the first free `<stem>_<n>.<ext>` variant when it is taken.
pub fn unique_path(path: String, used: &mut HashSet<String>) -> String {
    if !used.contains(&path) {
        used.insert(path.clone());
        return path;
    }

    let (stem, extension) = match path.rfind('.') {
        Some(dot) if dot > path.rfind('/').map(|slash| slash + 1).unwrap_or(0) => {
            (&path[..dot], &path[dot..])
        }
        _ => (path.as_str(), ""),
    };

    let mut idx = 2;
    loop {
        let candidate = format!("{}_{}{}", stem, idx, extension);
        if !used.contains(&candidate) {
            used.insert(candidate.clone());
            return candidate;
        }
        idx += 1;
    }
}

use std::collections::HashMap;

/// Make an extracted filename safe to create inside the output directory
pub fn sanitize_filename(name: &str) -> String {
    let mut name: String = name
        .chars()
        .map(|c| match c {
            '\\' | ':' | '*' | '"' | '<' | '>' | '|' | '?' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // "." and ".." would point at directories
    if name.chars().all(|c| c == '.') {
        name = name.replace('.', "_");
    }

    // Limit filename length
    if name.len() > 200 {
        let mut cut = 200;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        name.truncate(cut);
    }
    name
}

/// Browser-style alternative name: `photo.jpg` -> `photo (2).jpg`
pub fn numbered_filename(name: &str, n: usize) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{} ({}){}", &name[..dot], n, &name[dot..]),
        _ => format!("{} ({})", name, n),
    }
}

/// Rename duplicates within one batch so no two tasks save to the same name.
/// The first occurrence keeps its name.
pub fn disambiguate(names: &[String]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut taken: Vec<String> = Vec::with_capacity(names.len());

    for name in names {
        let count = seen.entry(name.as_str()).or_insert(0);
        *count += 1;
        if *count == 1 && !taken.contains(name) {
            taken.push(name.clone());
            continue;
        }

        let mut n = (*count).max(2);
        let mut candidate = numbered_filename(name, n);
        while taken.contains(&candidate) || names.contains(&candidate) {
            n += 1;
            candidate = numbered_filename(name, n);
        }
        taken.push(candidate);
    }
    taken
}

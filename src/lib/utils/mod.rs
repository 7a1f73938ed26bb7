use std::path::Path;

use chrono::NaiveDate;

/// Compute a slug suitable for route segments.
pub fn slugify(input: &str) -> String {
    let mut out = String::new();
    let mut prev_dash = false;

    for ch in input.chars() {
        if ch.is_alphanumeric() {
            for lc in ch.to_lowercase() {
                out.push(lc);
            }
            prev_dash = false;
        } else if !out.is_empty() && !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }

    while out.ends_with('-') {
        out.pop();
    }

    if out.is_empty() {
        "untitled".to_string()
    } else {
        out
    }
}

/// Split a `YYYY-MM-DD-slug` file stem into its date and the rest.
pub fn split_dated_stem(stem: &str) -> (Option<NaiveDate>, &str) {
    let dated = stem
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok());
    match dated {
        Some(date) => {
            let rest = &stem[10..];
            (Some(date), rest.strip_prefix('-').unwrap_or(rest))
        }
        None => (None, stem),
    }
}

/// Fill a permalink pattern such as `/:year/:month/:day/:slug`. The result
/// always ends with a slash.
pub fn fill_permalink(pattern: &str, date: Option<NaiveDate>, slug: &str) -> String {
    let (year, month, day) = match date {
        Some(d) => (
            d.format("%Y").to_string(),
            d.format("%m").to_string(),
            d.format("%d").to_string(),
        ),
        None => Default::default(),
    };

    let mut route = pattern
        .replace(":year", &year)
        .replace(":month", &month)
        .replace(":day", &day)
        .replace(":slug", slug);

    while route.contains("//") {
        route = route.replace("//", "/");
    }
    if !route.starts_with('/') {
        route.insert(0, '/');
    }
    if !route.ends_with('/') {
        route.push('/');
    }
    route
}

/// `path` as a route prefix, ending with exactly one slash.
pub fn with_trailing_slash(path: &str) -> String {
    format!("{}/", path.trim_end_matches('/'))
}

/// Route of a plain markdown source: `index.md` and `README.md` stand for
/// their directory, anything else becomes `.html`.
pub fn source_route(rel: &Path) -> String {
    let parent = rel
        .parent()
        .map(|p| {
            p.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    let stem = rel
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut route = String::from("/");
    for segment in &parent {
        route.push_str(segment);
        route.push('/');
    }

    if !stem.eq_ignore_ascii_case("index") && !stem.eq_ignore_ascii_case("readme") {
        route.push_str(&stem);
        route.push_str(".html");
    }
    route
}

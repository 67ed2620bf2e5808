//! Minimum-version routing.

/// Which indexes a template belongs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// No minimum version declared; every index.
    All,

    /// The index at this position in the configured versions and every
    /// later one.
    From(usize),

    /// The declared minimum version is not configured; no index.
    Unknown(String),
}

/// Routes a template by its declared minimum version.
///
/// `versions` must be in ascending order. Matching is exact string equality
/// after trimming the declared value.
pub fn route<V: AsRef<str>>(versions: &[V], minimum_version: Option<&str>) -> Route {
    let minimum = match minimum_version.map(str::trim) {
        None | Some("") => return Route::All,
        Some(minimum) => minimum,
    };

    versions
        .iter()
        .position(|version| version.as_ref() == minimum)
        .map_or_else(|| Route::Unknown(minimum.to_string()), Route::From)
}

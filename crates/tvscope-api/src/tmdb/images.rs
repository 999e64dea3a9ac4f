//! Image URL resolver for the TMDB image CDN.

/// Root URL of the TMDB image CDN. No credential required.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Placeholder reference returned when no image path is available.
pub const IMAGE_PLACEHOLDER: &str = "/placeholder.svg";

/// Size token for original resolution.
pub const SIZE_ORIGINAL: &str = "original";

/// Size token for 92px-wide images.
pub const SIZE_W92: &str = "w92";

/// Size token for 300px-wide images.
pub const SIZE_W300: &str = "w300";

/// Size token for 500px-wide images.
pub const SIZE_W500: &str = "w500";

/// Resolves a provider image path into a fully qualified CDN URL.
///
/// An absent or empty `path` resolves to [`IMAGE_PLACEHOLDER`]. Size
/// tokens are an open set of strings understood by the CDN (a pixel-width
/// token such as [`SIZE_W500`], or [`SIZE_ORIGINAL`]) and are passed
/// through unvalidated. Total function, no I/O.
#[must_use]
pub fn image_url(path: Option<&str>, size: &str) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{IMAGE_BASE_URL}/{size}{p}"),
        _ => String::from(IMAGE_PLACEHOLDER),
    }
}

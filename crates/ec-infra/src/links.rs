//! Outbound links shown next to a blueprint.

use reqwest::Url;

const VIDEO_SEARCH_BASE: &str = "https://www.youtube.com/results";

/// Video-search results page for a generated query.
pub fn video_search_url(query: &str) -> anyhow::Result<Url> {
    Ok(Url::parse_with_params(
        VIDEO_SEARCH_BASE,
        &[("search_query", query)],
    )?)
}

/// Placeholder illustration for a step, seeded by the prompt length in UTF-16
/// code units so the same prompt always maps to the same picture.
pub fn placeholder_image_url(visual_prompt: &str) -> String {
    format!(
        "https://picsum.photos/seed/{}/600/400",
        visual_prompt.encode_utf16().count()
    )
}

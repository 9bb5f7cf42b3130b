use super::envelope::RawFeedItem;
use super::source::Category;
use crate::util::{html, parse_http_url, query_param};

const VIDEO_THUMBNAIL_HOST: &str = "https://img.youtube.com/vi";

/// Picks a best-effort thumbnail for one raw item.
///
/// Candidates are tried in order and the first one that is a usable http(s)
/// URL wins:
///
/// 1. video category only: image synthesized from the `v` parameter of the link
/// 2. the item's `thumbnail` field
/// 3. `enclosure.link`
/// 4. `enclosure.url`
/// 5. first `<img src>` inside `content`
/// 6. first `<img src>` inside `description`
///
/// `None` means the renderer shows its placeholder graphic.
pub fn extract_thumbnail(item: &RawFeedItem, category: Category) -> Option<String> {
    let video = category
        .is_video()
        .then(|| item.link().and_then(video_thumbnail))
        .flatten();

    video
        .into_iter()
        .chain(item.thumbnail().map(str::to_owned))
        .chain(item.enclosure_link().map(str::to_owned))
        .chain(item.enclosure_url().map(str::to_owned))
        .chain(item.content.as_deref().and_then(first_image))
        .chain(item.description.as_deref().and_then(first_image))
        .find_map(|candidate| match parse_http_url(&candidate) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                tracing::debug!(candidate = %candidate, error = %e, "Skipping unusable thumbnail");
                None
            }
        })
}

/// Builds the video host's medium-quality still for a watch link.
pub fn video_thumbnail(link: &str) -> Option<String> {
    let url = parse_http_url(link).ok()?;
    let id = query_param(&url, "v")?;
    is_video_id(&id).then(|| format!("{VIDEO_THUMBNAIL_HOST}/{id}/mqdefault.jpg"))
}

fn is_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn first_image(markup: &str) -> Option<String> {
    html::first_attr(markup, "img", "src")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawFeedItem {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_video_id_beats_explicit_thumbnail() {
        let item = raw(json!({
            "link": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "thumbnail": "https://i.example.com/other.jpg"
        }));
        assert_eq!(
            extract_thumbnail(&item, Category::Videos).as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg")
        );
    }

    #[test]
    fn test_content_image_after_blank_src() {
        let item = raw(json!({
            "link": "https://news.example.com/story",
            "content": "<img src=\"\"><img src=\"https://cdn.example.com/real.jpg\">"
        }));
        assert_eq!(
            extract_thumbnail(&item, Category::News).as_deref(),
            Some("https://cdn.example.com/real.jpg")
        );
    }

    #[test]
    fn test_video_rule_only_for_video_category() {
        let item = raw(json!({
            "link": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "thumbnail": "https://i.example.com/other.jpg"
        }));
        assert_eq!(
            extract_thumbnail(&item, Category::News).as_deref(),
            Some("https://i.example.com/other.jpg")
        );
    }

    #[test]
    fn test_video_without_id_falls_through() {
        let item = raw(json!({
            "link": "https://www.youtube.com/@DenverSam",
            "thumbnail": "https://i.example.com/channel.jpg"
        }));
        assert_eq!(
            extract_thumbnail(&item, Category::Videos).as_deref(),
            Some("https://i.example.com/channel.jpg")
        );
    }

    #[test]
    fn test_video_id_from_second_query_param() {
        assert_eq!(
            video_thumbnail("https://www.youtube.com/watch?feature=share&v=abc_-12").as_deref(),
            Some("https://img.youtube.com/vi/abc_-12/mqdefault.jpg")
        );
        assert_eq!(video_thumbnail("https://www.youtube.com/watch?v=bad%2Fid"), None);
    }

    #[test]
    fn test_enclosure_link_before_url() {
        let item = raw(json!({
            "thumbnail": "",
            "enclosure": {"link": "https://cdn.example.com/link.jpg", "url": "https://cdn.example.com/url.jpg"}
        }));
        assert_eq!(
            extract_thumbnail(&item, Category::News).as_deref(),
            Some("https://cdn.example.com/link.jpg")
        );

        let item = raw(json!({"enclosure": {"url": "https://cdn.example.com/url.jpg"}}));
        assert_eq!(
            extract_thumbnail(&item, Category::News).as_deref(),
            Some("https://cdn.example.com/url.jpg")
        );
    }

    #[test]
    fn test_content_image_before_description_image() {
        let item = raw(json!({
            "content": "<p>Story</p><img alt=\"\" src=\"https://cdn.example.com/content.jpg\">",
            "description": "<img src=\"https://cdn.example.com/desc.jpg\">"
        }));
        assert_eq!(
            extract_thumbnail(&item, Category::News).as_deref(),
            Some("https://cdn.example.com/content.jpg")
        );

        let item = raw(json!({
            "content": "<p>No pictures here</p>",
            "description": "<img src='https://cdn.example.com/desc.jpg'>"
        }));
        assert_eq!(
            extract_thumbnail(&item, Category::News).as_deref(),
            Some("https://cdn.example.com/desc.jpg")
        );
    }

    #[test]
    fn test_unsafe_candidate_skipped() {
        let item = raw(json!({
            "thumbnail": "javascript:alert(1)",
            "description": "<img src=\"https://cdn.example.com/ok.jpg\">"
        }));
        assert_eq!(
            extract_thumbnail(&item, Category::News).as_deref(),
            Some("https://cdn.example.com/ok.jpg")
        );
    }

    #[test]
    fn test_nothing_found() {
        let item = raw(json!({"title": "Text only", "enclosure": []}));
        assert_eq!(extract_thumbnail(&item, Category::News), None);
        assert_eq!(extract_thumbnail(&item, Category::Videos), None);
    }
}

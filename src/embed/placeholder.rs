use std::fmt;

const EMBED_HOST: &str = "instagram.com/";

/// Stable handle for one discovered placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmbedId(pub(crate) usize);

impl fmt::Display for EmbedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "embed-{}", self.0)
    }
}

/// Lifecycle of a placeholder. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedState {
    Pending,
    Observed,
    Activated,
}

/// Kind of post named by the embed-host path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Post,
    Reel,
    Tv,
}

impl PostKind {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "p" => Some(PostKind::Post),
            "reel" => Some(PostKind::Reel),
            "tv" => Some(PostKind::Tv),
            _ => None,
        }
    }
}

/// Canonical post identifier pulled out of an embed source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRef {
    pub kind: PostKind,
    pub id: String,
}

/// Finds `instagram.com/{p|reel|tv}/{id}` anywhere in `url`.
///
/// The identifier is the longest run of `[A-Za-z0-9_-]` after the kind
/// segment. Returns `None` when no occurrence yields a non-empty identifier.
pub fn extract_post_id(url: &str) -> Option<PostRef> {
    url.match_indices(EMBED_HOST).find_map(|(pos, _)| {
        let rest = &url[pos + EMBED_HOST.len()..];
        let (segment, tail) = rest.split_once('/')?;
        let kind = PostKind::from_segment(segment)?;
        let end = tail
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(tail.len());
        let id = &tail[..end];
        (!id.is_empty()).then(|| PostRef {
            kind,
            id: id.to_owned(),
        })
    })
}

/// What the placeholder's node currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedMarkup {
    /// The "loading" wrapper written at discovery time.
    Loading,
    /// Final embed markup for the embed script to process.
    Rendered(PostRef),
}

/// One discovered embed node and its activation state.
#[derive(Debug, Clone)]
pub struct EmbedPlaceholder {
    id: EmbedId,
    source_url: String,
    state: EmbedState,
    markup: EmbedMarkup,
}

impl EmbedPlaceholder {
    pub(crate) fn new(id: EmbedId, source_url: String) -> Self {
        Self {
            id,
            source_url,
            state: EmbedState::Pending,
            markup: EmbedMarkup::Loading,
        }
    }

    pub fn id(&self) -> EmbedId {
        self.id
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn state(&self) -> EmbedState {
        self.state
    }

    pub fn markup(&self) -> &EmbedMarkup {
        &self.markup
    }

    /// Pending -> Observed. Returns false for any other starting state.
    pub(crate) fn observe(&mut self) -> bool {
        if self.state != EmbedState::Pending {
            return false;
        }
        self.state = EmbedState::Observed;
        true
    }

    /// Pending|Observed -> Activated. Returns false if already activated.
    pub(crate) fn activate(&mut self) -> bool {
        if self.state == EmbedState::Activated {
            return false;
        }
        self.state = EmbedState::Activated;
        true
    }

    pub(crate) fn render(&mut self, post: PostRef) {
        self.markup = EmbedMarkup::Rendered(post);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_post_kinds() {
        let post = extract_post_id("https://www.instagram.com/p/C1a2B3c4D5e/").unwrap();
        assert_eq!(post.kind, PostKind::Post);
        assert_eq!(post.id, "C1a2B3c4D5e");

        let reel = extract_post_id("https://instagram.com/reel/Abc_-9?igsh=xyz").unwrap();
        assert_eq!(reel.kind, PostKind::Reel);
        assert_eq!(reel.id, "Abc_-9");

        let tv = extract_post_id("https://www.instagram.com/tv/XYZ").unwrap();
        assert_eq!(tv.kind, PostKind::Tv);
        assert_eq!(tv.id, "XYZ");
    }

    #[test]
    fn test_extract_misses() {
        assert_eq!(extract_post_id("https://www.instagram.com/denversam/"), None);
        assert_eq!(extract_post_id("https://www.instagram.com/p/"), None);
        assert_eq!(extract_post_id("https://www.instagram.com/p/?x=1"), None);
        assert_eq!(extract_post_id("https://example.com/p/abc"), None);
        assert_eq!(extract_post_id(""), None);
    }

    #[test]
    fn test_extract_skips_to_later_occurrence() {
        let url = "https://l.example.com/?u=instagram.com/explore/&to=https://instagram.com/p/Later1";
        assert_eq!(extract_post_id(url).map(|p| p.id).as_deref(), Some("Later1"));
    }

    #[test]
    fn test_state_transitions_only_forward() {
        let mut ph = EmbedPlaceholder::new(EmbedId(0), "https://instagram.com/p/a".into());
        assert_eq!(ph.state(), EmbedState::Pending);
        assert!(ph.observe());
        assert!(!ph.observe());
        assert!(ph.activate());
        assert_eq!(ph.state(), EmbedState::Activated);
        assert!(!ph.activate());
        assert!(!ph.observe());
        assert_eq!(ph.state(), EmbedState::Activated);
    }

    #[test]
    fn test_pending_can_activate_directly() {
        let mut ph = EmbedPlaceholder::new(EmbedId(1), "https://instagram.com/p/a".into());
        assert!(ph.activate());
        assert_eq!(ph.markup(), &EmbedMarkup::Loading);
    }
}

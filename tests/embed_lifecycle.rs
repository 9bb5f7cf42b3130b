//! Integration tests for lazy embed activation: discovery from page markup,
//! scroll-driven activation, script loading, and runtime additions.

use gazette::config::Config;
use gazette::embed::{
    Bounds, EmbedController, EmbedHost, EmbedId, EmbedState, LoaderStatus, Viewport,
};
use gazette::render::{render_embeds, StaticPage};

/// Host that records what the page would have done.
#[derive(Default)]
struct RecordingHost {
    scripts: Vec<String>,
    passes: usize,
}

impl EmbedHost for RecordingHost {
    fn inject_script(&mut self, src: &str) {
        self.scripts.push(src.to_owned());
    }

    fn process_embeds(&mut self) {
        self.passes += 1;
    }
}

const PAGE: &str = r#"
<div id="instagram-container">
  <div class="instagram-embed loading" data-instagram-url="https://www.instagram.com/p/Cx1Abc_9/"></div>
  <div class="instagram-embed loading" data-instagram-url="https://www.instagram.com/reel/Rz-42/?igsh=abc"></div>
  <div class="instagram-embed loading" data-instagram-url="https://www.instagram.com/tv/TV7/"></div>
  <div class="instagram-embed loading" data-instagram-url=""></div>
</div>
"#;

/// Placeholders stacked 600px apart starting at the top of the document.
fn layout(ids: &[EmbedId]) -> Vec<(EmbedId, Bounds)> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            (
                *id,
                Bounds {
                    top: i as i64 * 600,
                    height: 500,
                },
            )
        })
        .collect()
}

fn lazy_controller() -> EmbedController {
    let config = Config::default();
    EmbedController::new(Some(config.visibility_watcher()), config.script_loader())
}

#[test]
fn test_scroll_activates_each_embed_once() {
    let mut host = RecordingHost::default();
    let mut ctl = lazy_controller();

    let ids = ctl.discover_in_html(PAGE, &mut host);
    assert_eq!(ids.len(), 3);
    assert!(ids.iter().all(|id| ctl.state(*id) == Some(EmbedState::Observed)));
    assert!(host.scripts.is_empty());

    // First screen: only the first placeholder is within the margin
    let first = ctl.on_visibility(Viewport { top: 0, height: 480 }, layout(&ids), &mut host);
    assert_eq!(first, [ids[0]]);
    assert_eq!(host.scripts.len(), 1);
    assert_eq!(ctl.loader().status(), LoaderStatus::Loading);

    // The margin picks up the second one before it scrolls in
    let second = ctl.on_visibility(Viewport { top: 40, height: 480 }, layout(&ids), &mut host);
    assert_eq!(second, [ids[1]]);

    ctl.script_loaded(&mut host);
    assert_eq!(host.passes, 1);

    // Scroll back up and down again: nothing re-activates
    ctl.on_visibility(Viewport { top: 0, height: 480 }, layout(&ids), &mut host);
    let last = ctl.on_visibility(Viewport { top: 1200, height: 480 }, layout(&ids), &mut host);
    assert_eq!(last, [ids[2]]);

    assert!(ids.iter().all(|id| ctl.state(*id) == Some(EmbedState::Activated)));
    assert_eq!(host.scripts, ["https://www.instagram.com/embed.js"]);
    assert_eq!(ctl.loader().injections(), 1);
    assert_eq!(host.passes, 2);
    assert_eq!(ctl.watcher().map(|w| w.observed_count()), Some(0));
}

#[test]
fn test_rendered_markup_is_not_rediscovered() {
    let mut host = RecordingHost::default();
    let mut ctl = lazy_controller();
    let ids = ctl.discover_in_html(PAGE, &mut host);
    ctl.on_visibility(
        Viewport { top: 0, height: 2000 },
        layout(&ids),
        &mut host,
    );

    let html = render_embeds(&ctl);
    assert_eq!(html.matches("instagram-media").count(), 3);
    assert!(html.contains(r#"data-instgrm-permalink="https://www.instagram.com/reel/Rz-42/?igsh=abc""#));

    // Rendering replaced the placeholder attribute, so a rescan finds nothing new
    let mut rescan = lazy_controller();
    assert!(rescan.discover_in_html(&html, &mut host).is_empty());
}

#[test]
fn test_runtime_additions_join_the_same_lifecycle() {
    let mut host = RecordingHost::default();
    let mut ctl = lazy_controller();
    assert!(render_embeds(&ctl).contains("instagram-placeholder"));

    let ids = ctl.add_posts(
        [
            "https://www.instagram.com/p/New1/",
            "https://www.instagram.com/someone/",
        ],
        &mut host,
    );
    assert!(!render_embeds(&ctl).contains("instagram-placeholder"));

    let activated = ctl.on_visibility(Viewport { top: 0, height: 2000 }, layout(&ids), &mut host);
    assert_eq!(activated, ids);

    // The second URL names no post and stays in its loading markup
    let html = render_embeds(&ctl);
    assert_eq!(html.matches("instagram-media").count(), 1);
    assert!(html.contains(r#"data-instagram-url="https://www.instagram.com/someone/""#));
    assert_eq!(host.scripts.len(), 1);
}

#[test]
fn test_static_page_degrades_to_immediate_activation() {
    let mut page = StaticPage::default();
    let mut ctl = EmbedController::new(None, Config::default().script_loader());

    let ids = ctl.discover_in_html(PAGE, &mut page);
    assert!(ids.iter().all(|id| ctl.state(*id) == Some(EmbedState::Activated)));
    assert_eq!(
        page.script_tags(),
        r#"<script async src="https://www.instagram.com/embed.js"></script>"#
    );
    assert_eq!(page.passes(), 0);
}

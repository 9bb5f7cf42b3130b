/// Default third-party embed script.
pub const DEFAULT_SCRIPT_URL: &str = "https://www.instagram.com/embed.js";

/// The document-side collaborator the loader drives.
pub trait EmbedHost {
    /// Appends the external script to the document. The host reports load
    /// completion later through [`ScriptLoader::script_loaded`].
    fn inject_script(&mut self, src: &str);

    /// Runs the embed script's batch pass over the whole document, picking up
    /// every rendered-but-unprocessed embed.
    fn process_embeds(&mut self);
}

/// Loading state of the external script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderStatus {
    NotRequested,
    Loading,
    Ready,
}

/// Guarantees the external embed script is injected at most once per page.
///
/// Owned by the embed controller and constructed once per page lifetime.
#[derive(Debug, Clone)]
pub struct ScriptLoader {
    script_url: String,
    status: LoaderStatus,
    injections: usize,
}

impl ScriptLoader {
    pub fn new(script_url: impl Into<String>) -> Self {
        Self {
            script_url: script_url.into(),
            status: LoaderStatus::NotRequested,
            injections: 0,
        }
    }

    pub fn status(&self) -> LoaderStatus {
        self.status
    }

    pub fn script_url(&self) -> &str {
        &self.script_url
    }

    /// Number of times the script has been injected (0 or 1).
    pub fn injections(&self) -> usize {
        self.injections
    }

    /// Makes sure rendered embeds will be processed.
    ///
    /// - `Ready`: processes immediately.
    /// - `Loading`: nothing; the pending load's completion runs the pass and
    ///   picks up anything rendered in the meantime.
    /// - `NotRequested`: injects the script and moves to `Loading`.
    pub fn ensure_ready<H: EmbedHost + ?Sized>(&mut self, host: &mut H) -> LoaderStatus {
        match self.status {
            LoaderStatus::Ready => host.process_embeds(),
            LoaderStatus::Loading => {
                tracing::debug!("Embed script still loading, embed queued for load pass");
            }
            LoaderStatus::NotRequested => {
                self.status = LoaderStatus::Loading;
                self.injections += 1;
                tracing::debug!(src = %self.script_url, "Injecting embed script");
                host.inject_script(&self.script_url);
            }
        }
        self.status
    }

    /// Load-completion callback: `Loading -> Ready`, then one batch pass.
    ///
    /// Ignored in any other state, so a duplicate load event cannot trigger a
    /// second pass.
    pub fn script_loaded<H: EmbedHost + ?Sized>(&mut self, host: &mut H) {
        if self.status != LoaderStatus::Loading {
            tracing::warn!(status = ?self.status, "Unexpected embed script load event ignored");
            return;
        }
        self.status = LoaderStatus::Ready;
        tracing::debug!("Embed script ready, processing embeds");
        host.process_embeds();
    }
}

impl Default for ScriptLoader {
    fn default() -> Self {
        Self::new(DEFAULT_SCRIPT_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingHost {
        injected: Vec<String>,
        passes: usize,
    }

    impl EmbedHost for CountingHost {
        fn inject_script(&mut self, src: &str) {
            self.injected.push(src.to_owned());
        }

        fn process_embeds(&mut self) {
            self.passes += 1;
        }
    }

    #[test]
    fn test_injects_once_across_many_requests() {
        let mut host = CountingHost::default();
        let mut loader = ScriptLoader::default();

        assert_eq!(loader.ensure_ready(&mut host), LoaderStatus::Loading);
        for _ in 0..5 {
            assert_eq!(loader.ensure_ready(&mut host), LoaderStatus::Loading);
        }
        assert_eq!(host.injected, [DEFAULT_SCRIPT_URL]);
        assert_eq!(host.passes, 0);

        loader.script_loaded(&mut host);
        assert_eq!(loader.status(), LoaderStatus::Ready);
        assert_eq!(host.passes, 1);

        for _ in 0..3 {
            loader.ensure_ready(&mut host);
        }
        assert_eq!(host.injected.len(), 1);
        assert_eq!(loader.injections(), 1);
        assert_eq!(host.passes, 4);
    }

    #[test]
    fn test_spurious_load_events_ignored() {
        let mut host = CountingHost::default();
        let mut loader = ScriptLoader::new("https://cdn.example.com/embed.js");

        loader.script_loaded(&mut host);
        assert_eq!(loader.status(), LoaderStatus::NotRequested);

        loader.ensure_ready(&mut host);
        loader.script_loaded(&mut host);
        loader.script_loaded(&mut host);
        assert_eq!(host.passes, 1);
        assert_eq!(host.injected, ["https://cdn.example.com/embed.js"]);
    }
}

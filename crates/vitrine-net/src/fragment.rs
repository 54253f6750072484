//! Header and footer fragments.
//!
//! Pages on the site carry no header or footer markup of their own. Both
//! live under a shared `components/` directory and are fetched at load time:
//!
//! 1. The components base is resolved from the page path (`./components` at
//!    the site root, `../components` one folder down).
//! 2. `{base}/{kind}/{kind}.html` is fetched and its `.header` / `.footer`
//!    element extracted.
//! 3. Relative image sources inside the fragment are rebased onto the
//!    fragment's own directory.
//! 4. The header goes at the start of `<body>`, the footer at the end. The
//!    header's menu script is added unless the page already loads it.
//!
//! Failures are logged and replaced by an inline error banner; nothing is
//! retried.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use parking_lot::Mutex;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use url::Url;
use vitrine_core::logging::targets;

use crate::error::{FragmentError, Result};

/// Inline style of the error banner.
pub const ERROR_BANNER_STYLE: &str =
    "padding: 20px; background: #fee; color: #c00; text-align: center;";

/// File name of the header's menu script.
pub const HEADER_SCRIPT: &str = "header.js";

/// Which fragment to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Header,
    Footer,
}

impl FragmentKind {
    /// Directory and file stem of the fragment.
    pub fn name(self) -> &'static str {
        match self {
            FragmentKind::Header => "header",
            FragmentKind::Footer => "footer",
        }
    }

    /// Capitalized name for messages.
    pub fn title(self) -> &'static str {
        match self {
            FragmentKind::Header => "Header",
            FragmentKind::Footer => "Footer",
        }
    }

    /// Selector of the fragment's root element.
    pub fn root_selector(self) -> &'static str {
        match self {
            FragmentKind::Header => ".header",
            FragmentKind::Footer => ".footer",
        }
    }

    /// Where the fragment goes in the page body.
    pub fn placement(self) -> Placement {
        match self {
            FragmentKind::Header => Placement::BodyStart,
            FragmentKind::Footer => Placement::BodyEnd,
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Insertion point in `<body>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Before the first child.
    BodyStart,
    /// After the last child.
    BodyEnd,
}

// ============================================================================
// Paths
// ============================================================================

/// Components directory relative to a page.
pub fn components_base(page_path: &str) -> &'static str {
    let depth = page_path.split('/').filter(|s| !s.is_empty()).count();
    if depth > 1 {
        "../components"
    } else {
        "./components"
    }
}

/// Relative path of a fragment's HTML file.
pub fn fragment_path(base: &str, kind: FragmentKind) -> String {
    format!("{base}/{kind}/{kind}.html")
}

/// Rebase an image source onto the fragment directory.
///
/// Returns `None` for sources that stay as they are: empty, absolute
/// (`/…`) or remote (`http…`).
pub fn rewrite_image_src(src: &str, base: &str, kind: FragmentKind) -> Option<String> {
    if let Some(rest) = src.strip_prefix("./") {
        return Some(format!("{base}/{kind}/{rest}"));
    }
    if src.is_empty() || src.starts_with("http") || src.starts_with('/') {
        return None;
    }
    Some(format!("{base}/{kind}/{src}"))
}

// ============================================================================
// Extraction
// ============================================================================

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| FragmentError::Selector(selector.to_string()))
}

/// Extract a fragment's root element from a fetched document, with image
/// sources rewritten. Returns the element's outer HTML.
pub fn extract_fragment(html: &str, kind: FragmentKind, base: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let root_selector = parse_selector(kind.root_selector())?;
    let image_selector = parse_selector("img[src]")?;

    let root = document
        .select(&root_selector)
        .next()
        .ok_or(FragmentError::MissingRoot { kind })?;

    Ok(rewrite_images(root, &image_selector, base, kind))
}

/// Serialize `root`, substituting each rewritten `<img>` tag in document order.
fn rewrite_images(
    root: ElementRef<'_>,
    image_selector: &Selector,
    base: &str,
    kind: FragmentKind,
) -> String {
    let html = root.html();
    let mut out = String::with_capacity(html.len());
    let mut cursor = 0;

    for image in root.select(image_selector) {
        let Some(new_src) = image
            .value()
            .attr("src")
            .and_then(|src| rewrite_image_src(src, base, kind))
        else {
            continue;
        };
        let tag = image.html();
        let Some(offset) = html[cursor..].find(&tag) else {
            continue;
        };
        let Some(rewritten) = replace_src(&tag, &new_src) else {
            continue;
        };
        let start = cursor + offset;
        out.push_str(&html[cursor..start]);
        out.push_str(&rewritten);
        cursor = start + tag.len();
    }

    out.push_str(&html[cursor..]);
    out
}

/// Replace the serialized `src` value of a single tag.
fn replace_src(tag: &str, new_src: &str) -> Option<String> {
    const MARKER: &str = " src=\"";
    let start = tag.find(MARKER)? + MARKER.len();
    let end = start + tag[start..].find('"')?;
    Some(format!(
        "{}{}{}",
        &tag[..start],
        escape_attribute(new_src),
        &tag[end..]
    ))
}

fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

// ============================================================================
// Page and Outcomes
// ============================================================================

/// The page a fragment is loaded into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// URL path of the page, e.g. `/services/index.html`.
    pub path: String,
    /// Whether the page already has a script whose `src` contains `header.js`.
    pub has_header_script: bool,
}

impl Page {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            has_header_script: false,
        }
    }

    /// Describe a page from its path and current markup.
    pub fn from_document(path: impl Into<String>, html: &str) -> Result<Self> {
        let selector = parse_selector("script[src*=\"header.js\"]")?;
        let document = Html::parse_document(html);
        Ok(Self {
            path: path.into(),
            has_header_script: document.select(&selector).next().is_some(),
        })
    }

    pub fn components_base(&self) -> &'static str {
        components_base(&self.path)
    }
}

/// A fetched fragment, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub placement: Placement,
    /// Outer HTML of the fragment root.
    pub html: String,
    /// Script to append to `<body>` (async), if one is needed.
    pub script: Option<String>,
}

/// Inline replacement shown when a fragment fails to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub kind: FragmentKind,
    pub placement: Placement,
    /// The underlying error, for diagnostics.
    pub cause: String,
}

impl ErrorBanner {
    pub fn new(kind: FragmentKind, cause: &FragmentError) -> Self {
        Self {
            kind,
            placement: kind.placement(),
            cause: cause.to_string(),
        }
    }

    /// Visible banner text.
    pub fn text(&self) -> String {
        format!(
            "Failed to load {}. Make sure the page is served over HTTP.",
            self.kind.title()
        )
    }

    pub fn to_html(&self) -> String {
        format!("<div style=\"{ERROR_BANNER_STYLE}\">{}</div>", self.text())
    }
}

/// Result of one load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Injected(Fragment),
    Failed(ErrorBanner),
}

// ============================================================================
// Scheduling
// ============================================================================

/// `document.readyState` when the loader starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

impl ReadyState {
    /// Parse a `document.readyState` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "loading" => Some(ReadyState::Loading),
            "interactive" => Some(ReadyState::Interactive),
            "complete" => Some(ReadyState::Complete),
            _ => None,
        }
    }
}

/// Moment at which a load attempt runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTrigger {
    /// Right away.
    Immediate,
    /// On the window `load` event.
    WindowLoad,
    /// `delay` after `DOMContentLoaded`.
    DomContentLoaded { delay: Duration },
}

/// Load attempts to register for a ready state.
pub fn load_triggers(state: ReadyState, dom_content_loaded_delay: Duration) -> Vec<LoadTrigger> {
    match state {
        ReadyState::Complete => vec![LoadTrigger::Immediate],
        ReadyState::Interactive => vec![LoadTrigger::WindowLoad],
        ReadyState::Loading => vec![
            LoadTrigger::WindowLoad,
            LoadTrigger::DomContentLoaded {
                delay: dom_content_loaded_delay,
            },
        ],
    }
}

// ============================================================================
// Loader
// ============================================================================

/// Fragment loader settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FragmentConfig {
    /// Origin page paths are resolved against.
    pub site_origin: String,
    /// Request timeout.
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Wait after `DOMContentLoaded` before loading.
    pub dom_content_loaded_delay_ms: u64,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            site_origin: "http://localhost/".to_string(),
            timeout_ms: 10_000,
            user_agent: format!("Vitrine/{} (Rust)", env!("CARGO_PKG_VERSION")),
            dom_content_loaded_delay_ms: 200,
        }
    }
}

/// Fetches fragments and injects each kind at most once.
#[derive(Debug)]
pub struct FragmentLoader {
    client: reqwest::Client,
    origin: Url,
    dom_content_loaded_delay: Duration,
    claimed: Mutex<HashSet<FragmentKind>>,
}

impl FragmentLoader {
    pub fn new(config: &FragmentConfig) -> Result<Self> {
        let origin = Url::parse(&config.site_origin)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            origin,
            dom_content_loaded_delay: Duration::from_millis(config.dom_content_loaded_delay_ms),
            claimed: Mutex::new(HashSet::new()),
        })
    }

    /// Absolute URL of a fragment as seen from `page`.
    pub fn fragment_url(&self, page: &Page, kind: FragmentKind) -> Result<Url> {
        let page_url = self.origin.join(&page.path)?;
        Ok(page_url.join(&fragment_path(page.components_base(), kind))?)
    }

    /// Load attempts for a ready state, with the configured delay.
    pub fn triggers(&self, state: ReadyState) -> Vec<LoadTrigger> {
        load_triggers(state, self.dom_content_loaded_delay)
    }

    /// Whether a load of `kind` has already started.
    pub fn is_claimed(&self, kind: FragmentKind) -> bool {
        self.claimed.lock().contains(&kind)
    }

    /// Fetch and extract a fragment without the once-per-kind guard.
    pub async fn fetch(&self, page: &Page, kind: FragmentKind) -> Result<Fragment> {
        let url = self.fragment_url(page, kind)?;
        tracing::debug!(target: targets::FRAGMENT, %url, %kind, "fetching fragment");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FragmentError::HttpStatus { kind, status });
        }
        let body = response.text().await?;

        let base = page.components_base();
        let html = extract_fragment(&body, kind, base)?;
        let script = (kind == FragmentKind::Header && !page.has_header_script)
            .then(|| format!("{base}/header/{HEADER_SCRIPT}"));

        Ok(Fragment {
            kind,
            placement: kind.placement(),
            html,
            script,
        })
    }

    /// Load a fragment once. Returns `None` if `kind` was already loaded
    /// (or attempted) by this loader.
    pub async fn load(&self, page: &Page, kind: FragmentKind) -> Option<LoadOutcome> {
        if !self.claimed.lock().insert(kind) {
            tracing::trace!(target: targets::FRAGMENT, %kind, "fragment already loaded");
            return None;
        }

        Some(match self.fetch(page, kind).await {
            Ok(fragment) => LoadOutcome::Injected(fragment),
            Err(error) => {
                tracing::error!(target: targets::FRAGMENT, %kind, %error, "error loading {kind}");
                LoadOutcome::Failed(ErrorBanner::new(kind, &error))
            }
        })
    }

    /// Run a load attempt for `trigger`, waiting out its delay first.
    pub async fn load_on(
        &self,
        trigger: LoadTrigger,
        page: &Page,
        kind: FragmentKind,
    ) -> Option<LoadOutcome> {
        if let LoadTrigger::DomContentLoaded { delay } = trigger {
            tokio::time::sleep(delay).await;
        }
        self.load(page, kind).await
    }
}

//! Fragment loading for Vitrine.
//!
//! The site's header and footer are shared HTML fragments fetched by each
//! page at load time. This crate resolves their location relative to the
//! page, fetches them with `reqwest`, extracts the fragment root with
//! `scraper`, rebases relative image paths, and reports either the fragment
//! to insert or an error banner to show in its place.
//!
//! # Example
//!
//! ```no_run
//! use vitrine_net::{FragmentConfig, FragmentKind, FragmentLoader, LoadOutcome, Page, ReadyState};
//!
//! # async fn run() -> vitrine_net::Result<()> {
//! let loader = FragmentLoader::new(&FragmentConfig::default())?;
//! let page = Page::from_document("/services/web.html", "<html><body></body></html>")?;
//!
//! for trigger in loader.triggers(ReadyState::Complete) {
//!     match loader.load_on(trigger, &page, FragmentKind::Header).await {
//!         Some(LoadOutcome::Injected(fragment)) => println!("{}", fragment.html),
//!         Some(LoadOutcome::Failed(banner)) => println!("{}", banner.to_html()),
//!         None => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fragment;

pub use error::{FragmentError, Result};
pub use fragment::{
    ERROR_BANNER_STYLE, ErrorBanner, Fragment, FragmentConfig, FragmentKind, FragmentLoader,
    HEADER_SCRIPT, LoadOutcome, LoadTrigger, Page, Placement, ReadyState, components_base,
    extract_fragment, fragment_path, load_triggers, rewrite_image_src,
};

//! Browser entry point for the landing page.
//!
//! Built for `wasm32-unknown-unknown`. On start it reads the optional
//! `<script type="application/json" id="site-config">` block, installs the
//! console logger, builds the page from the live document and binds every
//! listener the page asks for. `teardown()` removes them again.
//!
//! On other targets the crate is empty.

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod host;
#[cfg(target_arch = "wasm32")]
pub mod logger;

#[cfg(target_arch = "wasm32")]
pub use dom::WebDom;
#[cfg(target_arch = "wasm32")]
pub use host::{Bindings, WebApp};

/// Id of the inline JSON block holding the page configuration.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::cell::RefCell;
    use std::rc::Rc;

    use landing_app::PageBuilder;
    use landing_core::{CoreError, Dom, SiteConfig};
    use landing_relay::HttpFormRelay;
    use wasm_bindgen::prelude::wasm_bindgen;

    use crate::CONFIG_ELEMENT_ID;
    use crate::dom::WebDom;
    use crate::host::{Bindings, WebApp};
    use crate::logger;

    struct Host {
        app: Rc<WebApp>,
        bindings: Bindings,
    }

    thread_local! {
        static HOST: RefCell<Option<Host>> = const { RefCell::new(None) };
    }

    /// Config from the inline JSON block; defaults when absent or invalid.
    fn read_config(dom: &WebDom) -> (SiteConfig, Option<CoreError>) {
        let Some(json) = dom
            .element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
            .filter(|text| !text.trim().is_empty())
        else {
            return (SiteConfig::default(), None);
        };
        match SiteConfig::from_json(&json) {
            Ok(config) => (config, None),
            Err(e) => (SiteConfig::default(), Some(e)),
        }
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        let Some(dom) = WebDom::current() else {
            return;
        };
        let (config, config_error) = read_config(&dom);
        logger::init(config.log_level_filter());
        if let Some(e) = config_error {
            log::warn!("[web] #{CONFIG_ELEMENT_ID} ignored, using defaults: {e}");
        }

        teardown();
        let page = match PageBuilder::new(dom).config(config).build() {
            Ok(page) => page,
            Err(e) => {
                log::error!("[web] Page not started: {e}");
                return;
            }
        };
        let app = WebApp::new(page, HttpFormRelay::new());
        let bindings = app.start();
        HOST.with(|host| *host.borrow_mut() = Some(Host { app, bindings }));
    }

    /// Remove every listener and cancel pending timers.
    #[wasm_bindgen]
    pub fn teardown() {
        let previous = HOST.with(|host| host.borrow_mut().take());
        if let Some(Host { app, mut bindings }) = previous {
            bindings.unbind();
            app.clear_timers();
            log::info!("[web] Page torn down");
        }
    }
}

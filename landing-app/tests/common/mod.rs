//! 共享测试工具：MockRelay 与预置页面

#![allow(dead_code, clippy::unwrap_used)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;
use landing_app::{PageBuilder, Runtime};
use landing_core::test_utils::{LandingPage, TestDom};
use landing_relay::{FormRelay, FormSubmission, RelayError, RelayResponse, RelayResult};

/// Relay returning canned outcomes in order; answers 200 once they run out.
#[derive(Default)]
pub struct MockRelay {
    outcomes: RefCell<VecDeque<RelayResult<RelayResponse>>>,
    calls: Cell<usize>,
    received: RefCell<Vec<FormSubmission>>,
}

impl MockRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.outcomes
            .borrow_mut()
            .push_back(Ok(RelayResponse::new(status, body)));
        self
    }

    pub fn fail(self, error: RelayError) -> Self {
        self.outcomes.borrow_mut().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn received(&self) -> Vec<FormSubmission> {
        self.received.borrow().clone()
    }
}

#[async_trait(?Send)]
impl FormRelay for MockRelay {
    async fn submit(&self, submission: &FormSubmission) -> RelayResult<RelayResponse> {
        self.calls.set(self.calls.get() + 1);
        self.received.borrow_mut().push(submission.clone());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(RelayResponse::new(200, r#"{"ok":true}"#)))
    }
}

/// The stock page wired with default config and started.
pub fn runtime(relay: MockRelay) -> (Runtime<TestDom, MockRelay>, LandingPage) {
    let (dom, handles) = LandingPage::build();
    let page = PageBuilder::new(dom).build().unwrap();
    let mut runtime = Runtime::new(page, relay);
    runtime.start();
    (runtime, handles)
}

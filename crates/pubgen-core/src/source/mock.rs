//! Mock record source for testing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{FetchError, FetchFuture, RecordSource};
use crate::record::Record;

/// A canned reply for [`MockSource`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    Records(Vec<Record>),
    Bibtex(String),
    /// Fails the call with [`FetchError::Other`].
    Error(String),
}

/// A hand-rolled [`RecordSource`] that replays canned responses.
///
/// Responses are consumed in order, one per call (records and BibTeX calls
/// share the sequence); once exhausted the last one repeats.
pub struct MockSource {
    responses: Mutex<Vec<MockResponse>>,
    fallback: MockResponse,
    call_count: AtomicUsize,
}

impl MockSource {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Create a mock that returns responses in order, repeating the last one.
    pub fn with_sequence(mut responses: Vec<MockResponse>) -> Self {
        let fallback = responses
            .last()
            .cloned()
            .unwrap_or(MockResponse::Error("empty mock sequence".into()));
        // Reversed so pop() yields the next response.
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            fallback,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn next_response(&self) -> MockResponse {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        let mut seq = match self.responses.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        seq.pop().unwrap_or_else(|| self.fallback.clone())
    }
}

impl RecordSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    fn fetch_records<'a>(&'a self, _query: &'a str) -> FetchFuture<'a, Vec<Record>> {
        let response = self.next_response();
        Box::pin(async move {
            match response {
                MockResponse::Records(records) => Ok(records),
                MockResponse::Bibtex(_) => Err(FetchError::Other(
                    "mock: BibTeX response to a records call".into(),
                )),
                MockResponse::Error(msg) => Err(FetchError::Other(msg)),
            }
        })
    }

    fn fetch_bibtex<'a>(&'a self, _query: &'a str) -> FetchFuture<'a, String> {
        let response = self.next_response();
        Box::pin(async move {
            match response {
                MockResponse::Bibtex(blob) => Ok(blob),
                MockResponse::Records(_) => Err(FetchError::Other(
                    "mock: records response to a BibTeX call".into(),
                )),
                MockResponse::Error(msg) => Err(FetchError::Other(msg)),
            }
        })
    }
}

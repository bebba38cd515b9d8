//! Pull-based pagination over Graph list endpoints
//!
//! Graph list endpoints return an envelope of the form
//! `{"value": [...], "@odata.nextLink": "..."}` where the next-link cursor
//! is absent on the last page. Several catalog endpoints instead return a
//! bare object with no `value` array; those are treated as a single-item
//! sequence. [`ItemStream`] hides both shapes behind one cursor.
//!
//! The stream is stateless with respect to the server: constructing a new
//! stream with the same URL restarts from page 1.

use super::client::GraphClient;
use serde_json::Value;
use std::collections::VecDeque;

const NEXT_LINK: &str = "@odata.nextLink";

/// Lazy sequence of exported items behind a continuation cursor
///
/// Items are pulled one at a time with [`next`](ItemStream::next); the
/// underlying pages are fetched on demand through the retry client. When a
/// page request resolves to "no more data" (terminal refusal or retry
/// exhaustion), the sequence ends; items already yielded remain valid and
/// [`truncated`](ItemStream::truncated) reports the early end.
pub struct ItemStream<'a> {
    client: &'a GraphClient,
    next_url: Option<String>,
    buffer: VecDeque<Value>,
    truncated: bool,
}

impl<'a> ItemStream<'a> {
    /// Start a sequence at the given list URL
    pub fn new(client: &'a GraphClient, url: impl Into<String>) -> Self {
        Self {
            client,
            next_url: Some(url.into()),
            buffer: VecDeque::new(),
            truncated: false,
        }
    }

    /// Pull the next item, fetching further pages as needed
    pub async fn next(&mut self) -> Option<Value> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(item);
            }

            let url = self.next_url.take()?;
            let envelope = match self.client.get_json(&url).await {
                Some(envelope) => envelope,
                None => {
                    self.truncated = true;
                    return None;
                }
            };

            match envelope.get("value").and_then(Value::as_array) {
                Some(items) => {
                    self.buffer.extend(items.iter().cloned());
                    self.next_url = envelope
                        .get(NEXT_LINK)
                        .and_then(Value::as_str)
                        .map(str::to_string);
                    // An empty page with a cursor loops straight into the
                    // next fetch.
                }
                None => {
                    // Singleton envelope: the whole body is the item.
                    return Some(envelope);
                }
            }
        }
    }

    /// Whether the sequence ended early because a page request failed
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// The cursor the next page fetch would use, if any
    pub fn next_url(&self) -> Option<&str> {
        self.next_url.as_deref()
    }
}

//! Request lifecycle store.
//!
//! Correlates `Sending request` / `Received response` handler messages into
//! [`RequestState`] values and keeps the client's out-of-band error log.
//!
//! One mutex guards the ordered list, the id index and the error log. Each
//! state is an immutable `Arc`; completion swaps in a completed copy, so a
//! reader holding a reference never sees a half-updated request.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;

use crate::config::{DEFAULT_ERROR_METHOD, DEFAULT_SEND_METHOD};
use crate::error::{Result, TraceError};
use crate::events::{RequestId, TraceEvent};
use crate::logging::structured::LogContext;

use super::grammar::{parse_send_async_message, SendAsyncMessage};
use super::request_state::RequestState;
use super::snapshot::{RequestView, StoreSnapshot};

#[derive(Debug, Default)]
struct StoreInner {
    requests: Vec<Arc<RequestState>>,
    // request id -> position in `requests`
    index: HashMap<RequestId, usize>,
    errors: Vec<String>,
}

#[derive(Debug)]
pub struct RequestStore {
    send_method: String,
    error_methods: HashSet<String>,
    ctx: LogContext,
    inner: Mutex<StoreInner>,
}

impl Default for RequestStore {
    fn default() -> Self {
        Self::new(
            DEFAULT_SEND_METHOD,
            [DEFAULT_ERROR_METHOD],
            LogContext::new("store"),
        )
    }
}

impl RequestStore {
    pub fn new<I, S>(send_method: &str, error_methods: I, ctx: LogContext) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            send_method: send_method.to_string(),
            error_methods: error_methods.into_iter().map(Into::into).collect(),
            ctx,
            inner: Mutex::new(StoreInner::default()),
        }
    }

    /// Apply one trace event.
    ///
    /// Returns `Ok(false)` for events that carry no lifecycle information.
    /// Malformed messages and protocol violations leave the store unchanged.
    pub fn ingest(&self, event: &TraceEvent) -> Result<bool> {
        if event.method_name == self.send_method {
            self.on_send_async(event)
        } else if self.error_methods.contains(&event.method_name) {
            self.on_client_error(event);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn on_send_async(&self, event: &TraceEvent) -> Result<bool> {
        let ctx = self.ctx.with_request(event.request_id);
        // Parsing needs no lock.
        let parsed =
            parse_send_async_message(event.request_id, &event.method_name, &event.message)?;

        let mut inner = self.inner.lock();
        match parsed {
            SendAsyncMessage::Sent(sent) => {
                if inner.index.contains_key(&event.request_id) {
                    return Err(TraceError::DuplicateSend {
                        request_id: event.request_id,
                    });
                }

                let state = RequestState::new(event.request_id, &sent.method, &sent.url, sent.headers);
                let position = inner.requests.len();
                inner.requests.push(Arc::new(state));
                inner.index.insert(event.request_id, position);

                crate::log_debug!(ctx, "REQUEST_SENT", method = sent.method, url = sent.url);
            }
            SendAsyncMessage::Received(received) => {
                let position = match inner.index.get(&event.request_id) {
                    Some(position) => *position,
                    None => {
                        return Err(TraceError::UnknownRequest {
                            request_id: event.request_id,
                        })
                    }
                };

                if inner.requests[position].is_complete() {
                    return Err(TraceError::DuplicateCompletion {
                        request_id: event.request_id,
                    });
                }

                let completed = inner.requests[position].completed(
                    received.status_code,
                    &received.reason_phrase,
                    received.headers,
                    Utc::now(),
                );
                crate::log_debug!(
                    ctx,
                    "REQUEST_COMPLETED",
                    status = completed.status_code(),
                    time = completed.time()
                );
                inner.requests[position] = Arc::new(completed);
            }
        }

        Ok(true)
    }

    fn on_client_error(&self, event: &TraceEvent) {
        crate::log_warn!(
            self.ctx,
            "CLIENT_ERROR",
            reference = event.reference.as_deref().unwrap_or(""),
            message = event.message
        );
        self.inner.lock().errors.push(event.message.clone());
    }

    /// All requests in creation order, pending ones included.
    pub fn requests(&self) -> Vec<Arc<RequestState>> {
        self.inner.lock().requests.clone()
    }

    pub fn get(&self, request_id: RequestId) -> Option<Arc<RequestState>> {
        let inner = self.inner.lock();
        inner
            .index
            .get(&request_id)
            .map(|position| Arc::clone(&inner.requests[*position]))
    }

    pub fn contains(&self, request_id: RequestId) -> bool {
        self.inner.lock().index.contains_key(&request_id)
    }

    pub fn errors(&self) -> Vec<String> {
        self.inner.lock().errors.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn pending_count(&self) -> usize {
        self.inner
            .lock()
            .requests
            .iter()
            .filter(|r| !r.is_complete())
            .count()
    }

    pub fn completed_count(&self) -> usize {
        self.inner
            .lock()
            .requests
            .iter()
            .filter(|r| r.is_complete())
            .count()
    }

    /// Consistent point-in-time view for broadcast.
    ///
    /// References are copied under the lock; views are built outside it.
    pub fn snapshot(&self) -> StoreSnapshot {
        let (requests, errors) = {
            let inner = self.inner.lock();
            (inner.requests.clone(), inner.errors.clone())
        };
        StoreSnapshot {
            requests: requests.iter().map(|r| RequestView::from(r.as_ref())).collect(),
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::TraceEventType;
    use std::thread;

    fn send_message(url: &str) -> String {
        format!(
            "Sending request: Method: GET, RequestUri: '{}', Version: 1.1, Content: (null), Headers: {{ Host: localhost:5000 }}",
            url
        )
    }

    fn receive_message(status: u16) -> String {
        format!(
            "Received response: StatusCode: {}, ReasonPhrase: 'OK', Version: 1.1, Content: System.Net.Http.HttpConnectionResponseContent, Headers: {{ Content-Type: text/css, Content-Length: 1024 }}",
            status
        )
    }

    fn handler_event(request_id: RequestId, method_name: &str, message: &str) -> TraceEvent {
        TraceEvent {
            sequence_id: 1,
            event_type: TraceEventType::HandlerMessage,
            reference: None,
            request_id,
            method_name: method_name.to_string(),
            message: message.to_string(),
        }
    }

    fn error_event(message: &str) -> TraceEvent {
        TraceEvent {
            sequence_id: 1,
            event_type: TraceEventType::Error,
            reference: Some("HttpClient#1".to_string()),
            request_id: 0,
            method_name: DEFAULT_ERROR_METHOD.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_send_creates_pending_request() {
        let store = RequestStore::default();
        let applied = store
            .ingest(&handler_event(7, "SendAsyncCore", &send_message("http://localhost:5000/css/app.css")))
            .unwrap();
        assert!(applied);

        let state = store.get(7).unwrap();
        assert_eq!(state.url(), "http://localhost:5000/css/app.css");
        assert_eq!(state.status(), "(pending)");
        assert!(!state.is_complete());
        assert!(state.response_headers().is_empty());
        assert_eq!(store.len(), 1);
        assert_eq!(store.pending_count(), 1);
    }

    #[test]
    fn test_receive_completes_request() {
        let store = RequestStore::default();
        store
            .ingest(&handler_event(7, "SendAsyncCore", &send_message("http://localhost:5000/css/app.css")))
            .unwrap();
        let before = store.get(7).unwrap();

        assert!(store.ingest(&handler_event(7, "SendAsyncCore", &receive_message(200))).unwrap());

        let state = store.get(7).unwrap();
        assert!(state.is_complete());
        assert_eq!(state.status(), "200");
        assert_eq!(state.content_type(), Some("text/css"));
        assert_eq!(state.content_length(), "1 kB");
        assert_eq!(store.len(), 1);
        assert_eq!(store.completed_count(), 1);

        // Earlier readers keep their consistent pending view.
        assert!(!before.is_complete());
        assert_eq!(before.status_code(), 0);
    }

    #[test]
    fn test_duplicate_send_is_rejected() {
        let store = RequestStore::default();
        let event = handler_event(9, "SendAsyncCore", &send_message("http://localhost:5000/a"));
        store.ingest(&event).unwrap();
        let original = store.get(9).unwrap();

        let err = store.ingest(&event).unwrap_err();
        assert!(matches!(err, TraceError::DuplicateSend { request_id: 9 }));
        assert_eq!(store.len(), 1);
        assert_eq!(*store.get(9).unwrap(), *original);
    }

    #[test]
    fn test_receive_for_unknown_request() {
        let store = RequestStore::default();
        let err = store
            .ingest(&handler_event(42, "SendAsyncCore", &receive_message(200)))
            .unwrap_err();
        assert!(matches!(err, TraceError::UnknownRequest { request_id: 42 }));
        assert!(store.get(42).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_second_completion_is_rejected() {
        let store = RequestStore::default();
        store
            .ingest(&handler_event(7, "SendAsyncCore", &send_message("http://localhost:5000/a")))
            .unwrap();
        store
            .ingest(&handler_event(7, "SendAsyncCore", &receive_message(200)))
            .unwrap();
        let completed = store.get(7).unwrap();

        let err = store
            .ingest(&handler_event(7, "SendAsyncCore", &receive_message(500)))
            .unwrap_err();
        assert!(matches!(err, TraceError::DuplicateCompletion { request_id: 7 }));

        let after = store.get(7).unwrap();
        assert_eq!(*after, *completed);
        assert_eq!(after.status(), "200");
        assert_eq!(after.content_length(), "1 kB");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unrecognized_message_is_error() {
        let store = RequestStore::default();
        let err = store
            .ingest(&handler_event(1, "SendAsyncCore", "Sending request: ???"))
            .unwrap_err();
        assert!(matches!(err, TraceError::UnrecognizedMessage { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_error_event_only_grows_error_log() {
        let store = RequestStore::default();
        store
            .ingest(&handler_event(1, "SendAsyncCore", &send_message("http://localhost:5000/a")))
            .unwrap();

        assert!(store.ingest(&error_event("connection refused")).unwrap());
        assert_eq!(store.errors(), vec!["connection refused".to_string()]);
        assert_eq!(store.len(), 1);
        assert!(store.contains(1));
        assert!(!store.contains(0));
    }

    #[test]
    fn test_other_methods_not_handled() {
        let store = RequestStore::default();
        let applied = store
            .ingest(&handler_event(1, "SendAsync", "anything"))
            .unwrap();
        assert!(!applied);
        assert!(store.is_empty());
        assert!(store.errors().is_empty());
    }

    #[test]
    fn test_requests_keep_creation_order() {
        let store = RequestStore::default();
        for id in [5, 3, 8] {
            store
                .ingest(&handler_event(id, "SendAsyncCore", &send_message("http://h/x")))
                .unwrap();
        }
        store
            .ingest(&handler_event(3, "SendAsyncCore", &receive_message(204)))
            .unwrap();
        let ids: Vec<_> = store.requests().iter().map(|r| r.request_id()).collect();
        assert_eq!(ids, vec![5, 3, 8]);
    }

    #[test]
    fn test_concurrent_readers_see_whole_states() {
        let store = Arc::new(RequestStore::default());
        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for id in 0..200 {
                    store
                        .ingest(&handler_event(id, "SendAsyncCore", &send_message("http://h/x")))
                        .unwrap();
                    store
                        .ingest(&handler_event(id, "SendAsyncCore", &receive_message(200)))
                        .unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..200 {
                        for state in store.snapshot().requests {
                            assert_eq!(state.status_code != 0, state.end_time.is_some());
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(store.completed_count(), 200);
    }
}

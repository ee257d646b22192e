use std::thread::{self, JoinHandle};
use std::time::Duration;
use crossbeam::channel::{unbounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use serde_json::Value;
use tracing::{error, info};
use crate::core::config::EngineConfig;
use crate::core::engine::SearchEngine;
use crate::core::error::{Error, Result};
use crate::protocol::messages::{Request, Response};

/// Owns a [`SearchEngine`] on a dedicated thread.
///
/// Requests are queued on one channel and handled strictly one at a time; each
/// produces exactly one response on the other channel, in request order.
pub struct SearchWorker {
    requests: Option<Sender<Request>>,
    responses: Receiver<Response>,
    handle: Option<JoinHandle<()>>,
}

impl SearchWorker {
    pub fn spawn(config: EngineConfig) -> Result<Self> {
        let engine = SearchEngine::new(config)?;
        let (request_tx, request_rx) = unbounded();
        let (response_tx, response_rx) = unbounded();

        let handle = thread::Builder::new()
            .name("paperdex-search".to_string())
            .spawn(move || Self::run(engine, request_rx, response_tx))
            .map_err(|e| Error::internal(format!("failed to start search worker: {}", e)))?;

        Ok(SearchWorker {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
        })
    }

    fn run(mut engine: SearchEngine, requests: Receiver<Request>, responses: Sender<Response>) {
        info!("search worker started");
        while let Ok(request) = requests.recv() {
            let response = engine.handle(request);
            if responses.send(response).is_err() {
                break;
            }
        }
        info!("search worker stopped");
    }

    /// Queue a request without waiting for its response
    pub fn post(&self, request: Request) -> Result<()> {
        let sender = self.requests.as_ref().ok_or_else(closed)?;
        sender.send(request).map_err(|_| closed())
    }

    /// Queue a raw `{type, data}` envelope
    pub fn post_message(&self, message: Value) -> Result<()> {
        self.post(Request::from_value(message))
    }

    pub fn recv(&self) -> Result<Response> {
        self.responses.recv().map_err(|_| closed())
    }

    /// `Ok(None)` when nothing arrived within `timeout`
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<Response>> {
        match self.responses.recv_timeout(timeout) {
            Ok(response) => Ok(Some(response)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(closed()),
        }
    }

    pub fn try_recv(&self) -> Result<Option<Response>> {
        match self.responses.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(closed()),
        }
    }

    /// Post `request` and block for the next response. Only meaningful when no
    /// other responses are outstanding.
    pub fn call(&self, request: Request) -> Result<Response> {
        self.post(request)?;
        self.recv()
    }

    /// Close the request channel and wait for queued messages to drain
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("search worker thread panicked");
            }
        }
    }
}

impl Drop for SearchWorker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn closed() -> Error {
    Error::invalid_state("search worker has shut down")
}

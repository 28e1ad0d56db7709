//! `ComputeWorker`: a dedicated thread running [`compute`] behind channels.
//!
//! # Protocol
//!
//! The caller [`submit`](ComputeWorker::submit)s requests and polls for
//! responses with [`try_recv`](ComputeWorker::try_recv) (once per frame) or
//! [`recv_timeout`](ComputeWorker::recv_timeout).  Nothing but owned values
//! crosses the channels.
//!
//! Requests queued behind the one in flight are coalesced: when the worker
//! picks up work it drains the queue and runs only the newest request.  A
//! superseded request gets no response.  In-flight work is not cancelled; the
//! caller filters stale responses by `generation`.
//!
//! Dropping the worker closes the request channel and joins the thread.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::{ComputeError, ComputeRequest, ComputeResponse, ComputeResult, compute};

pub struct ComputeWorker {
    requests:  Option<Sender<ComputeRequest>>,
    responses: Receiver<ComputeResponse>,
    handle:    Option<JoinHandle<()>>,
}

impl ComputeWorker {
    /// Start the worker thread.
    pub fn spawn() -> ComputeResult<Self> {
        let (req_tx, req_rx) = mpsc::channel::<ComputeRequest>();
        let (resp_tx, resp_rx) = mpsc::channel::<ComputeResponse>();

        let handle = thread::Builder::new()
            .name("mst-compute".into())
            .spawn(move || run_worker(req_rx, resp_tx))
            .map_err(ComputeError::Spawn)?;

        Ok(Self { requests: Some(req_tx), responses: resp_rx, handle: Some(handle) })
    }

    /// Queue a request.  Fails only if the worker thread has exited.
    pub fn submit(&self, request: ComputeRequest) -> ComputeResult<()> {
        let tx = self.requests.as_ref().ok_or(ComputeError::Disconnected)?;
        tx.send(request).map_err(|_| ComputeError::Disconnected)
    }

    /// A finished response, if one is ready.  Never blocks.
    pub fn try_recv(&self) -> ComputeResult<Option<ComputeResponse>> {
        match self.responses.try_recv() {
            Ok(resp) => Ok(Some(resp)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ComputeError::Disconnected),
        }
    }

    /// Wait up to `timeout` for a response.
    pub fn recv_timeout(&self, timeout: Duration) -> ComputeResult<Option<ComputeResponse>> {
        match self.responses.recv_timeout(timeout) {
            Ok(resp) => Ok(Some(resp)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(ComputeError::Disconnected),
        }
    }
}

impl Drop for ComputeWorker {
    fn drop(&mut self) {
        // Closing the sender ends the worker's receive loop.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("compute worker panicked");
            }
        }
    }
}

fn run_worker(requests: Receiver<ComputeRequest>, responses: Sender<ComputeResponse>) {
    while let Ok(mut request) = requests.recv() {
        while let Ok(newer) = requests.try_recv() {
            log::debug!(
                "request generation {} superseded by {}",
                request.generation,
                newer.generation
            );
            request = newer;
        }
        let response = compute(&request);
        if responses.send(response).is_err() {
            break;
        }
    }
    log::debug!("compute worker exiting");
}

//! Background worker thread and its async request interface.
//!
//! The host owns one OS thread that holds the engine exclusively. Callers
//! talk to it through a cloneable `WorkerHandle`: each call sends an owned
//! request over a channel and awaits a one-shot reply. Requests run one at
//! a time in arrival order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;

use tokio::sync::oneshot;

use super::engine::{Engine, IndexOrigin};
use crate::cards::Card;
use crate::core::{CatalogError, EngineConfig, InitOptions, Result};
use crate::index::{AssetSource, IndexPart};
use crate::normalize::{process_raw_data, ProcessedCatalog, RawFile};
use crate::query::{FilterSet, SearchMode};

type Reply<T> = oneshot::Sender<Result<T>>;

enum Request {
    Init {
        cards: Vec<Card>,
        options: InitOptions,
        reply: Reply<IndexOrigin>,
    },
    ProcessRawData {
        files: Vec<RawFile>,
        reply: Reply<ProcessedCatalog>,
    },
    SearchByKeyword {
        keyword: Option<String>,
        mode: SearchMode,
        reply: Reply<()>,
    },
    FilterByAttributes {
        filters: FilterSet,
        reply: Reply<Vec<Card>>,
    },
    ExportIndex {
        reply: Reply<Vec<IndexPart>>,
    },
    CardCount {
        reply: Reply<usize>,
    },
    Shutdown,
}

/// State living on the worker thread.
struct Worker<S> {
    config: EngineConfig,
    source: S,
    engine: Option<Engine>,
}

impl<S: AssetSource> Worker<S> {
    fn run(mut self, requests: Receiver<Request>, stop: Arc<AtomicBool>) {
        for request in requests.iter() {
            if stop.load(Ordering::Acquire) {
                break;
            }
            match request {
                Request::Init {
                    cards,
                    options,
                    reply,
                } => {
                    // Drop the old engine first so two catalogs never coexist.
                    self.engine = None;
                    let engine = Engine::init(cards, &options, &self.source, self.config.clone());
                    let origin = engine.origin();
                    self.engine = Some(engine);
                    let _ = reply.send(Ok(origin));
                }
                Request::ProcessRawData { files, reply } => {
                    let _ = reply.send(process_raw_data(files));
                }
                Request::SearchByKeyword {
                    keyword,
                    mode,
                    reply,
                } => {
                    let result = self.ready_mut().map(|engine| {
                        engine
                            .query_mut()
                            .search_by_keyword(keyword.as_deref(), mode)
                    });
                    let _ = reply.send(result);
                }
                Request::FilterByAttributes { filters, reply } => {
                    let result = self
                        .ready()
                        .map(|engine| engine.query().filter_by_attributes(&filters));
                    let _ = reply.send(result);
                }
                Request::ExportIndex { reply } => {
                    let result = self.ready().and_then(|engine| {
                        engine
                            .query()
                            .index()
                            .export()
                            .map_err(CatalogError::from)
                    });
                    let _ = reply.send(result);
                }
                Request::CardCount { reply } => {
                    let result = self.ready().map(|engine| engine.query().catalog().len());
                    let _ = reply.send(result);
                }
                Request::Shutdown => break,
            }
        }
        log::debug!("card worker stopped");
    }

    fn ready(&self) -> Result<&Engine> {
        self.engine.as_ref().ok_or(CatalogError::NotReady)
    }

    fn ready_mut(&mut self) -> Result<&mut Engine> {
        self.engine.as_mut().ok_or(CatalogError::NotReady)
    }
}

/// Cloneable async interface to a running worker.
#[derive(Clone, Debug)]
pub struct WorkerHandle {
    requests: Sender<Request>,
}

impl WorkerHandle {
    async fn call<T>(&self, request: impl FnOnce(Reply<T>) -> Request) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(request(reply))
            .map_err(|_| CatalogError::WorkerGone)?;
        response.await.map_err(|_| CatalogError::WorkerGone)?
    }

    /// Load a catalog, replacing any previous one.
    ///
    /// Pre-built index parts in `options` are imported when they can be;
    /// otherwise the index is built from `cards`.
    pub async fn init(&self, cards: Vec<Card>, options: InitOptions) -> Result<IndexOrigin> {
        self.call(|reply| Request::Init {
            cards,
            options,
            reply,
        })
        .await
    }

    /// Flatten and link raw card files. Does not touch the loaded catalog.
    pub async fn process_raw_data(&self, files: Vec<RawFile>) -> Result<ProcessedCatalog> {
        self.call(|reply| Request::ProcessRawData { files, reply })
            .await
    }

    /// Replace the keyword working set.
    pub async fn search_by_keyword(
        &self,
        keyword: Option<String>,
        mode: SearchMode,
    ) -> Result<()> {
        self.call(|reply| Request::SearchByKeyword {
            keyword,
            mode,
            reply,
        })
        .await
    }

    /// Filter the keyword working set.
    pub async fn filter_by_attributes(&self, filters: FilterSet) -> Result<Vec<Card>> {
        self.call(|reply| Request::FilterByAttributes { filters, reply })
            .await
    }

    /// Serialize the live index.
    pub async fn export_index(&self) -> Result<Vec<IndexPart>> {
        self.call(|reply| Request::ExportIndex { reply }).await
    }

    /// Number of cards in the loaded catalog.
    pub async fn card_count(&self) -> Result<usize> {
        self.call(|reply| Request::CardCount { reply }).await
    }
}

/// Owner of the worker thread.
///
/// Dropping the host terminates the worker.
#[derive(Debug)]
pub struct WorkerHost {
    handle: WorkerHandle,
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHost {
    /// Start a worker that fetches pre-built files from `source`.
    pub fn spawn<S>(config: EngineConfig, source: S) -> Result<Self>
    where
        S: AssetSource + 'static,
    {
        let (requests, receiver) = channel();
        let stop = Arc::new(AtomicBool::new(false));
        let worker_stop = Arc::clone(&stop);
        let worker = Worker {
            config,
            source,
            engine: None,
        };

        let thread = std::thread::Builder::new()
            .name("card-worker".to_string())
            .spawn(move || worker.run(receiver, worker_stop))
            .map_err(CatalogError::Spawn)?;

        Ok(Self {
            handle: WorkerHandle { requests },
            stop,
            thread: Some(thread),
        })
    }

    /// A new handle to the worker.
    pub fn handle(&self) -> WorkerHandle {
        self.handle.clone()
    }

    /// Stop the worker and wait for its thread to exit.
    ///
    /// A request already running finishes; queued requests are dropped and
    /// their callers get `WorkerGone`, as do all later calls.
    pub fn terminate(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        self.stop.store(true, Ordering::Release);
        let _ = self.handle.requests.send(Request::Shutdown);
        if thread.join().is_err() {
            log::warn!("card worker panicked");
        }
    }

    /// Check if the worker thread is still owned by this host.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().map_or(false, |t| !t.is_finished())
    }
}

impl Drop for WorkerHost {
    fn drop(&mut self) {
        self.terminate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::MemorySource;

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
    }

    fn cards() -> Vec<Card> {
        vec![
            Card::new("S1/001", "C001", "S1").with_name("Fireheart").with_color("Red"),
            Card::new("S1/002", "C002", "S1").with_name("Frost").with_color("Blue"),
        ]
    }

    #[test]
    fn test_not_ready_before_init() {
        let host = WorkerHost::spawn(EngineConfig::default(), MemorySource::new()).unwrap();
        let handle = host.handle();
        runtime().block_on(async {
            let err = handle
                .filter_by_attributes(FilterSet::default())
                .await
                .unwrap_err();
            assert!(matches!(err, CatalogError::NotReady));
            let err = handle
                .search_by_keyword(Some("fire".into()), SearchMode::Precise)
                .await
                .unwrap_err();
            assert!(matches!(err, CatalogError::NotReady));
        });
    }

    #[test]
    fn test_search_then_filter() {
        let host = WorkerHost::spawn(EngineConfig::default(), MemorySource::new()).unwrap();
        let handle = host.handle();
        runtime().block_on(async {
            let origin = handle.init(cards(), InitOptions::new()).await.unwrap();
            assert_eq!(origin, IndexOrigin::Built);
            assert_eq!(handle.card_count().await.unwrap(), 2);

            handle
                .search_by_keyword(Some("fire".into()), SearchMode::Precise)
                .await
                .unwrap();
            let found = handle
                .filter_by_attributes(FilterSet::default())
                .await
                .unwrap();
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].id, "S1/001");
        });
    }

    #[test]
    fn test_terminate_reports_worker_gone() {
        let mut host = WorkerHost::spawn(EngineConfig::default(), MemorySource::new()).unwrap();
        let handle = host.handle();
        assert!(host.is_running());
        host.terminate();
        assert!(!host.is_running());

        let err = runtime().block_on(handle.card_count()).unwrap_err();
        assert!(matches!(err, CatalogError::WorkerGone));
        // Terminating twice is a no-op.
        host.terminate();
    }
}

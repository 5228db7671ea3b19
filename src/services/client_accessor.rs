//! Spec fetching and the process-wide memoized client.
//!
//! [`get_client_from_spec`] fetches a spec document and builds a client from
//! it. [`get_client`] runs that sequence once per process with the
//! configured spec URL and token. Every caller, concurrent or later, shares
//! the same outcome, failures included.

use futures::future::{BoxFuture, FutureExt, Shared};
use reqwest::Url;
use std::future::Future;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};
use tracing::{debug, info, instrument};

use crate::domain::errors::ClientError;
use crate::domain::models::{CsrfToken, HttpConfig};
use crate::domain::ports::SpecSource;
use crate::infrastructure::http::{build_http_client, HttpSpecFetcher, ReqwestTransport};
use crate::services::client_factory::{ApiClient, ClientFactory};
use crate::services::settings::ProcessSettings;

/// Settled outcome shared by every caller of a [`ClientAccessor`]
pub type ClientResult<T = ApiClient> = Result<Arc<T>, Arc<ClientError>>;

/// Future resolving to the shared outcome; cheap to clone
pub type SharedClientFuture<T = ApiClient> = Shared<BoxFuture<'static, ClientResult<T>>>;

type Initializer<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, ClientError>> + Send + Sync>;

/// Fetches a spec document and builds a client from it
pub struct SpecClientLoader {
    source: Arc<dyn SpecSource>,
    factory: ClientFactory,
}

impl SpecClientLoader {
    pub fn new(source: Arc<dyn SpecSource>, factory: ClientFactory) -> Self {
        Self { source, factory }
    }

    /// reqwest-backed loader; fetcher and client transport share one pool
    pub fn with_http_config(config: &HttpConfig) -> Result<Self, ClientError> {
        let http_client = build_http_client(config)?;
        Ok(Self::new(
            Arc::new(HttpSpecFetcher::new(http_client.clone())),
            ClientFactory::new(Arc::new(ReqwestTransport::from_client(http_client))),
        ))
    }

    #[instrument(skip(self, token))]
    pub async fn load(&self, spec_url: &str, token: CsrfToken) -> Result<ApiClient, ClientError> {
        let url = Url::parse(spec_url).map_err(|e| ClientError::invalid_url(spec_url, e))?;
        let spec_text = self.source.fetch_spec(&url).await?;
        self.factory.make_client_at(&spec_text, token, Some(&url))
    }
}

/// Fetches the spec at `spec_url` and builds a client that sends `token` on unsafe requests
///
/// Network and JSON errors propagate unchanged; there is no retry and no timeout.
pub async fn get_client_from_spec(spec_url: &str, token: CsrfToken) -> Result<ApiClient, ClientError> {
    SpecClientLoader::with_http_config(&HttpConfig::default())?
        .load(spec_url, token)
        .await
}

/// Lazily-initialized, single-assignment client cache
///
/// The initializer runs at most once: the shared future is stored before it
/// is first polled, so concurrent first callers all await the same attempt.
/// A failed attempt stays cached.
pub struct ClientAccessor<T = ApiClient> {
    init: Initializer<T>,
    slot: Mutex<Option<SharedClientFuture<T>>>,
}

impl<T: Send + Sync + 'static> ClientAccessor<T> {
    pub fn new<F, Fut>(init: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        Self {
            init: Box::new(move || init().boxed()),
            slot: Mutex::new(None),
        }
    }

    /// Returns the shared outcome, starting initialization on the first call
    pub fn get(&self) -> SharedClientFuture<T> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.get_or_insert_with(|| {
            debug!("starting client initialization");
            (self.init)()
                .map(|result| result.map(Arc::new).map_err(Arc::new))
                .boxed()
                .shared()
        })
        .clone()
    }

    /// The settled outcome, if initialization has finished
    pub fn peek(&self) -> Option<ClientResult<T>> {
        let slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().and_then(Shared::peek).cloned()
    }

    pub fn is_started(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Drops the cached outcome so the next `get` initializes again
    ///
    /// For test harnesses only.
    pub fn reset(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

static PROCESS_CLIENT: LazyLock<ClientAccessor> = LazyLock::new(|| {
    ClientAccessor::new(|| async {
        let settings = ProcessSettings::load()?;
        info!(spec_url = %settings.spec_url, "initializing process-wide API client");
        SpecClientLoader::with_http_config(&settings.http)?
            .load(&settings.spec_url, settings.token)
            .await
    })
});

/// The process-wide client, built from configuration on first use
pub fn get_client() -> SharedClientFuture {
    PROCESS_CLIENT.get()
}

/// The accessor behind [`get_client`]
pub fn process_client() -> &'static ClientAccessor {
    &PROCESS_CLIENT
}

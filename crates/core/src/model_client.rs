use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tool_choice_model::{ErrorKind, ModelProvider, ModelRequest, ModelResponse};
use tracing::Instrument;

use crate::error::Error;

type SendRequestResult = Result<ModelResponse, Error>;
type BoxedSendRequestFuture =
    Pin<Box<dyn Future<Output = SendRequestResult> + Send>>;
#[rustfmt::skip]
type HandlerFn = Arc<
    dyn Fn(&ModelRequest, Duration) -> BoxedSendRequestFuture + Send + Sync
>;

/// The round-trip bound used when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A wrapper around a model provider that bounds every round trip with a
/// timeout and provides a type-erased interface for the other modules.
#[derive(Clone)]
pub struct ModelClient {
    handler_fn: HandlerFn,
    timeout: Duration,
}

impl ModelClient {
    #[inline]
    pub fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since `ModelClient` doesn't have a
        // generic parameter and we don't want it either.
        let handler_fn: HandlerFn =
            Arc::new(move |req: &ModelRequest, limit: Duration| {
                trace!("got a request: {:?}", req);
                let fut = provider.send_request(req);
                Box::pin(
                    async move {
                        match timeout(limit, fut).await {
                            Ok(Ok(resp)) => {
                                trace!("got a response: {resp:?}");
                                Ok(resp)
                            }
                            Ok(Err(err)) => {
                                error!("got an error: {err:?}");
                                Err(Error::service(&err))
                            }
                            Err(_) => {
                                error!("no response within {limit:?}");
                                Err(Error::Service {
                                    kind: ErrorKind::Timeout,
                                    message: format!(
                                        "no response within {limit:?}"
                                    ),
                                })
                            }
                        }
                    }
                    .instrument(trace_span!("model client req")),
                )
            });
        Self {
            handler_fn,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets how long a single round trip may take.
    #[inline]
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Sends a request and waits for the response.
    ///
    /// # Cancel safety
    ///
    /// This method is cancel safe. Dropping the future abandons the
    /// underlying round trip.
    #[inline]
    pub async fn send_request(
        &self,
        req: &ModelRequest,
    ) -> Result<ModelResponse, Error> {
        (self.handler_fn)(req, self.timeout).await
    }
}

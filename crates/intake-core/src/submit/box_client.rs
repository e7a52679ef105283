//! BoxSubmissionClient -- object-safe dynamic dispatch wrapper for SubmissionClient.
//!
//! 1. Define an object-safe `SubmissionClientDyn` trait with boxed futures
//! 2. Blanket-impl `SubmissionClientDyn` for all `T: SubmissionClient`
//! 3. `BoxSubmissionClient` wraps `Box<dyn SubmissionClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use intake_types::error::SubmissionError;
use intake_types::value::Payload;

use super::client::SubmissionClient;

/// Object-safe version of [`SubmissionClient`] with boxed futures.
pub trait SubmissionClientDyn: Send + Sync {
    fn name(&self) -> &str;

    fn submit_boxed<'a>(
        &'a self,
        payload: &'a Payload,
    ) -> Pin<Box<dyn Future<Output = Result<(), SubmissionError>> + Send + 'a>>;
}

impl<T: SubmissionClient> SubmissionClientDyn for T {
    fn name(&self) -> &str {
        SubmissionClient::name(self)
    }

    fn submit_boxed<'a>(
        &'a self,
        payload: &'a Payload,
    ) -> Pin<Box<dyn Future<Output = Result<(), SubmissionError>> + Send + 'a>> {
        Box::pin(self.submit(payload))
    }
}

/// Type-erased submission client for runtime backend selection
/// (e.g., a real endpoint when configured, the simulator otherwise).
pub struct BoxSubmissionClient {
    inner: Box<dyn SubmissionClientDyn>,
}

impl BoxSubmissionClient {
    pub fn new<T: SubmissionClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }
}

impl SubmissionClient for BoxSubmissionClient {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn submit(&self, payload: &Payload) -> Result<(), SubmissionError> {
        self.inner.submit_boxed(payload).await
    }
}

impl std::fmt::Debug for BoxSubmissionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxSubmissionClient")
            .field("name", &self.inner.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysRejects;

    impl SubmissionClient for AlwaysRejects {
        fn name(&self) -> &str {
            "rejects"
        }

        async fn submit(&self, _payload: &Payload) -> Result<(), SubmissionError> {
            Err(SubmissionError::Rejected { status: 422 })
        }
    }

    #[tokio::test]
    async fn boxed_client_delegates() {
        let client = BoxSubmissionClient::new(AlwaysRejects);
        assert_eq!(SubmissionClient::name(&client), "rejects");

        let err = client.submit(&Payload::new()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Rejected { status: 422 }));
    }

    #[test]
    fn debug_shows_backend_name() {
        let client = BoxSubmissionClient::new(AlwaysRejects);
        assert!(format!("{client:?}").contains("rejects"));
    }
}

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use streamflix_model::{MediaKind, VideoDescriptor};

use crate::providers::MetadataProvider;

/// Why a trailer lookup produced nothing. Never fatal to the carousel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupFailure {
    #[error("video lookup failed: {0}")]
    Provider(String),

    #[error("video lookup timed out after {0:?}")]
    TimedOut(Duration),
}

/// Lists the videos attached to a title.
#[async_trait]
pub trait VideoLookup: Send + Sync {
    async fn videos(
        &self,
        id: u64,
        kind: MediaKind,
    ) -> Result<Vec<VideoDescriptor>, LookupFailure>;
}

/// Serves trailer lookups from any [`MetadataProvider`].
pub struct ProviderLookup<P: ?Sized> {
    provider: Arc<P>,
}

impl<P: ?Sized> ProviderLookup<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }
}

impl<P: MetadataProvider + ?Sized> fmt::Debug for ProviderLookup<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderLookup")
            .field("provider", &self.provider.name())
            .finish()
    }
}

#[async_trait]
impl<P: MetadataProvider + ?Sized> VideoLookup for ProviderLookup<P> {
    async fn videos(
        &self,
        id: u64,
        kind: MediaKind,
    ) -> Result<Vec<VideoDescriptor>, LookupFailure> {
        self.provider
            .videos(kind, id)
            .await
            .map(|list| list.results)
            .map_err(|e| LookupFailure::Provider(e.to_string()))
    }
}

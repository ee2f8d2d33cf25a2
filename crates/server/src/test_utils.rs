//! In-memory providers and request helpers for route tests.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    http::{Request, header},
    response::Response,
};
use brain::{
    ChatProvider, ChatRequest, GeneratedImage, ImageFetcher, ImageProvider, ImageRequest,
    ProviderError,
};
use bytes::Bytes;

use crate::{config::ServerConfig, state::AppState};

type Responder<Req, Out> = Box<dyn Fn(&Req) -> Result<Out, ProviderError> + Send + Sync>;

pub struct FakeChat {
    responder: Responder<ChatRequest, String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatRequest>>,
}

impl FakeChat {
    pub fn new(
        responder: impl Fn(&ChatRequest) -> Result<String, ProviderError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn replying(reply: &'static str) -> Arc<Self> {
        Self::new(move |_| Ok(reply.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for FakeChat {
    fn name(&self) -> &'static str {
        "fake-chat"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn chat(&self, request: ChatRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = (self.responder)(&request);
        *self.last_request.lock().unwrap() = Some(request);
        result
    }
}

pub struct FakeImages {
    responder: Responder<ImageRequest, GeneratedImage>,
    calls: AtomicUsize,
    last_request: Mutex<Option<ImageRequest>>,
}

impl FakeImages {
    pub fn new(
        responder: impl Fn(&ImageRequest) -> Result<GeneratedImage, ProviderError>
        + Send
        + Sync
        + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn returning_url(url: &'static str) -> Arc<Self> {
        Self::new(move |_| {
            Ok(GeneratedImage {
                url: Some(url.to_string()),
                revised_prompt: None,
            })
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ImageRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageProvider for FakeImages {
    fn name(&self) -> &'static str {
        "fake-images"
    }

    async fn generate_image(&self, request: ImageRequest) -> Result<GeneratedImage, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = (self.responder)(&request);
        *self.last_request.lock().unwrap() = Some(request);
        result
    }
}

pub struct FakeFetcher {
    responder: Box<dyn Fn(&str) -> Result<Bytes, ProviderError> + Send + Sync>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new(
        responder: impl Fn(&str) -> Result<Bytes, ProviderError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn serving(bytes: &'static [u8]) -> Arc<Self> {
        Self::new(move |_| Ok(Bytes::from_static(bytes)))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.responder)(url)
    }
}

fn unexpected() -> ProviderError {
    ProviderError::RequestFailed("unexpected provider call".to_string())
}

/// Providers that fail if anything reaches them.
pub fn idle_fakes() -> (Arc<FakeChat>, Arc<FakeImages>, Arc<FakeFetcher>) {
    (
        FakeChat::new(|_| Err(unexpected())),
        FakeImages::new(|_| Err(unexpected())),
        FakeFetcher::new(|_| Err(unexpected())),
    )
}

pub fn test_state(
    chat: Arc<FakeChat>,
    images: Arc<FakeImages>,
    fetcher: Arc<FakeFetcher>,
) -> AppState {
    AppState::with_providers(ServerConfig::default(), chat, images, fetcher)
}

pub fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Bytes {
    to_bytes(response.into_body(), usize::MAX).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

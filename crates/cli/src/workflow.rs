//! Background generation for the interactive session
//!
//! Requests run as spawned tasks. Their results come back over a channel and
//! are only applied to the [`BrandSession`] when the owner drains or waits,
//! so the session is never touched from two places at once.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    api::ApiClient,
    session::{Applied, BrandSession, SessionError, WorkflowEvent},
};

pub struct Workflow {
    api: ApiClient,
    session: BrandSession,
    events_tx: UnboundedSender<WorkflowEvent>,
    events_rx: UnboundedReceiver<WorkflowEvent>,
}

impl Workflow {
    pub fn new(api: ApiClient) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            session: BrandSession::new(),
            events_tx,
            events_rx,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &BrandSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut BrandSession {
        &mut self.session
    }

    pub fn start_prompt_generation(&mut self) -> Result<(), SessionError> {
        let brand = self.session.begin_prompt_generation()?;
        let epoch = self.session.epoch();
        let api = self.api.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let result = api
                .generate_prompts(&brand)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(WorkflowEvent::PromptsReady { epoch, result });
        });
        Ok(())
    }

    /// Starts a logo request for the concept at 1-based `number`.
    pub fn start_logo_generation(&mut self, number: usize) -> Result<(), SessionError> {
        let prompt = self.session.prompt_at(number)?.to_string();
        self.start_logo_for(prompt)
    }

    pub fn start_logo_for(&mut self, prompt: String) -> Result<(), SessionError> {
        let request = self.session.begin_logo_generation(&prompt)?;
        let epoch = self.session.epoch();
        let api = self.api.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let result = api
                .generate_logo(&request)
                .await
                .map_err(|e| e.logo_message());
            let _ = tx.send(WorkflowEvent::LogoReady {
                epoch,
                prompt,
                result,
            });
        });
        Ok(())
    }

    /// Applies whatever has arrived without blocking.
    pub fn drain(&mut self) -> Vec<Applied> {
        let mut applied = Vec::new();
        while let Ok(event) = self.events_rx.try_recv() {
            applied.push(self.session.apply_event(event));
        }
        applied
    }

    /// Blocks until nothing is in flight for the current epoch.
    pub async fn wait(&mut self) -> Vec<Applied> {
        let mut applied = Vec::new();
        while self.session.is_busy() {
            match self.events_rx.recv().await {
                Some(event) => applied.push(self.session.apply_event(event)),
                None => break,
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::Query,
        http::StatusCode,
        response::IntoResponse,
        routing::{get, post},
    };
    use models::{
        BrandData, DownloadLogoQuery, ErrorResponse, GenerateLogoRequest, GenerateLogoResponse,
        GeneratePromptsResponse, HealthResponse,
    };

    use crate::{api::ClientError, session::BrandField};

    const IMAGE_URL: &str = "https://oaidalleapiprodscus.blob.core.windows.net/a.png";

    async fn prompts(Json(brand): Json<BrandData>) -> impl IntoResponse {
        if brand.name == "Broken" {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to generate logo concepts")),
            )
                .into_response();
        }
        Json(GeneratePromptsResponse {
            prompts: vec![
                format!("A rocket mark for {}", brand.name),
                format!("A star mark for {}", brand.name),
            ],
        })
        .into_response()
    }

    async fn logo(Json(request): Json<GenerateLogoRequest>) -> impl IntoResponse {
        if request.prompt.contains("forbidden") {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Content policy violation")),
            )
                .into_response();
        }
        if request.prompt.contains("gateway") {
            return (StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").into_response();
        }
        Json(GenerateLogoResponse {
            image_url: IMAGE_URL.to_string(),
            prompt: format!("Professional logo design: {}", request.prompt),
            original_prompt: request.prompt,
            brand_name: request.brand_name.unwrap_or_else(|| "Brand".to_string()),
        })
        .into_response()
    }

    async fn download(Query(query): Query<DownloadLogoQuery>) -> impl IntoResponse {
        match query.url.as_deref() {
            Some(IMAGE_URL) => (
                StatusCode::OK,
                format!("png:{}", query.filename.unwrap_or_default()),
            )
                .into_response(),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("URL is required")),
            )
                .into_response(),
        }
    }

    /// Serves a canned Brandmark API on an ephemeral port.
    async fn spawn_server() -> ApiClient {
        let app = Router::new()
            .route(
                "/api/health",
                get(|| async {
                    Json(HealthResponse {
                        status: "ok".into(),
                        version: "test".into(),
                    })
                }),
            )
            .route("/api/generate-prompts", post(prompts))
            .route("/api/generate-logo", post(logo))
            .route("/api/download-logo", get(download));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        ApiClient::new(&format!("http://{}/", addr))
    }

    fn named(api: ApiClient, name: &str) -> Workflow {
        let mut workflow = Workflow::new(api);
        let session = workflow.session_mut();
        session.set_field(BrandField::Name, name);
        session.set_field(BrandField::Description, "Rockets for everyone");
        workflow
    }

    #[tokio::test]
    async fn test_client_round_trips() {
        let api = spawn_server().await;

        assert_eq!(api.health().await.unwrap().status, "ok");

        let brand = BrandData {
            name: "Acme".into(),
            ..Default::default()
        };
        let concepts = api.generate_prompts(&brand).await.unwrap();
        assert_eq!(concepts[0], "A rocket mark for Acme");

        let response = api
            .generate_logo(&GenerateLogoRequest {
                prompt: "A rocket mark".into(),
                brand_name: Some("Acme".into()),
            })
            .await
            .unwrap();
        assert_eq!(response.image_url, IMAGE_URL);
        assert_eq!(response.original_prompt, "A rocket mark");

        let bytes = api.download(IMAGE_URL, "acme-logo-1.png").await.unwrap();
        assert_eq!(&bytes[..], b"png:acme-logo-1.png");
    }

    #[tokio::test]
    async fn test_client_error_bodies() {
        let api = spawn_server().await;

        let err = api
            .generate_logo(&GenerateLogoRequest {
                prompt: "something forbidden".into(),
                brand_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Server { status: 400, .. }));
        assert_eq!(err.logo_message(), "Content policy violation");

        let err = api
            .generate_logo(&GenerateLogoRequest {
                prompt: "gateway down".into(),
                brand_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status(502)));

        let err = api.download("https://elsewhere/x.png", "x.png").await.unwrap_err();
        assert_eq!(err.to_string(), "URL is required");

        let unreachable = ApiClient::new("http://127.0.0.1:9");
        assert!(matches!(
            unreachable.health().await,
            Err(ClientError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_generation_results_are_applied() {
        let mut workflow = named(spawn_server().await, "Acme");

        workflow.start_prompt_generation().unwrap();
        assert!(workflow.session().is_busy());
        let applied = workflow.wait().await;
        assert_eq!(applied, vec![Applied::Prompts(2)]);
        assert_eq!(workflow.session().prompts[1], "A star mark for Acme");

        workflow.start_logo_generation(1).unwrap();
        workflow.start_logo_generation(2).unwrap();
        assert_eq!(workflow.session().generating_logos.len(), 2);
        let applied = workflow.wait().await;
        assert_eq!(applied.len(), 2);
        assert!(applied.iter().all(|a| matches!(a, Applied::Logo(_))));
        assert_eq!(workflow.session().logos.len(), 2);
        assert!(workflow.session().logos.iter().all(|l| l.brand_name == "Acme"));
        assert!(workflow.drain().is_empty());
    }

    #[tokio::test]
    async fn test_failures_are_recorded() {
        let mut workflow = named(spawn_server().await, "Broken");

        workflow.start_prompt_generation().unwrap();
        let applied = workflow.wait().await;
        assert_eq!(
            applied,
            vec![Applied::PromptsFailed("Failed to generate logo concepts".into())]
        );
        assert!(!workflow.session().generating_prompts);

        workflow.start_logo_for("gateway down".into()).unwrap();
        workflow.wait().await;
        assert_eq!(
            workflow.session().logo_error.as_deref(),
            Some(crate::api::LOGO_FAILED_FALLBACK)
        );
    }

    #[tokio::test]
    async fn test_results_after_reset_are_discarded() {
        let mut workflow = named(spawn_server().await, "Acme");
        workflow.session_mut().prompts = vec!["A rocket".into()];

        workflow.start_prompt_generation().unwrap();
        workflow.start_logo_generation(1).unwrap();
        workflow.session_mut().reset();
        assert!(!workflow.session().is_busy());

        for _ in 0..2 {
            let event = workflow.events_rx.recv().await.unwrap();
            assert_eq!(workflow.session_mut().apply_event(event), Applied::Stale);
        }
        assert!(workflow.session().prompts.is_empty());
        assert!(workflow.session().logos.is_empty());
        assert_eq!(workflow.session().brand, BrandData::default());
    }
}

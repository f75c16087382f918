// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides a scripted generation service, sample model payloads, and pipeline builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `nutrivision_server`

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use nutrivision_server::errors::{AppError, AppResult};
use nutrivision_server::llm::{
    GenerateContentRequest, GenerateContentResponse, GenerationService, Part,
};
use nutrivision_server::orchestrator::{Orchestrator, PipelineState};
use nutrivision_server::planner::{ImageRequestClient, PlanRequestClient};
use serde_json::{json, Value};
use tokio::sync::{oneshot, Notify};

/// Plan model identifier used by test pipelines
pub const TEST_PLAN_MODEL: &str = "test-plan-model";
/// Image model identifier used by test pipelines
pub const TEST_IMAGE_MODEL: &str = "test-image-model";
/// Base64 of the 8-byte PNG signature
pub const PNG_BASE64: &str = "iVBORw0KGgo=";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

enum Reply {
    Ready(AppResult<GenerateContentResponse>),
    Deferred(oneshot::Receiver<AppResult<GenerateContentResponse>>),
}

/// Generation service answering from a queue of scripted replies
///
/// Every call is recorded. Deferred replies stay pending until the test
/// resolves them through the returned sender.
#[derive(Default)]
pub struct ScriptedService {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<GenerateContentRequest>>,
    called: Notify,
}

impl ScriptedService {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue an immediate reply
    pub fn push(&self, reply: AppResult<GenerateContentResponse>) {
        self.replies.lock().unwrap().push_back(Reply::Ready(reply));
    }

    /// Queue a reply the test resolves later
    pub fn push_deferred(&self) -> oneshot::Sender<AppResult<GenerateContentResponse>> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(Reply::Deferred(rx));
        tx
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<GenerateContentRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Wait until at least `count` calls were made
    pub async fn wait_for_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.call_count() < count {
                self.called.notified().await;
            }
        })
        .await
        .expect("timed out waiting for generation calls");
    }
}

#[async_trait]
impl GenerationService for ScriptedService {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        self.called.notify_one();

        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(AppError::internal("deferred reply dropped"))),
            None => Err(AppError::internal("no scripted reply left")),
        }
    }
}

fn meal(name: &str, description: &str, calories: f64, macros: [f64; 3]) -> Value {
    json!({
        "name": name,
        "description": description,
        "calories": calories,
        "macros": { "protein": macros[0], "carbs": macros[1], "fats": macros[2] }
    })
}

/// A complete plan payload as the text model would return it
pub fn sample_plan_json() -> Value {
    let breakfast = meal(
        "Greek Yogurt Parfait",
        "Yogurt with berries and oats",
        420.0,
        [28.0, 52.0, 11.0],
    );
    let lunch = meal(
        "Grilled Chicken Quinoa Bowl",
        "Chicken, quinoa, greens",
        650.5,
        [48.0, 62.0, 18.5],
    );
    let dinner = meal(
        "Baked Salmon with Asparagus",
        "Salmon, asparagus, rice",
        720.0,
        [46.0, 58.0, 28.0],
    );
    let snack = meal(
        "Apple and Almonds",
        "A crisp apple with almonds",
        359.5,
        [23.5, 58.0, 10.75],
    );
    json!({
        "dailyPlan": {
            "totalCalories": 2150,
            "totalMacros": { "protein": 145.5, "carbs": 230, "fats": 68.25 },
            "meals": {
                "breakfast": breakfast,
                "lunch": lunch,
                "dinner": dinner,
                "snacks": [snack]
            },
            "advice": ["Spread protein evenly across meals"]
        },
        "recommendations": ["Drink 2.5L of water"],
        "tips": ["Prep lunch the night before"]
    })
}

/// Text-model response carrying `plan` as its JSON text
pub fn plan_response(plan: &Value) -> GenerateContentResponse {
    GenerateContentResponse::from_parts(vec![Part::text(plan.to_string())])
}

/// Image-model response with a caption followed by the PNG payload
pub fn image_response() -> GenerateContentResponse {
    GenerateContentResponse::from_parts(vec![
        Part::text("Here is your infographic"),
        Part::inline("image/png", PNG_BASE64),
    ])
}

/// Transport failure as the Gemini client reports it
pub fn transport_error() -> AppError {
    AppError::external_unavailable("Gemini", "HTTP request failed: connection refused")
}

pub fn plan_client(service: &Arc<ScriptedService>) -> PlanRequestClient {
    PlanRequestClient::new(service.clone(), TEST_PLAN_MODEL)
}

pub fn image_client(service: &Arc<ScriptedService>) -> ImageRequestClient {
    ImageRequestClient::new(service.clone(), TEST_IMAGE_MODEL)
}

/// Orchestrator wired to a scripted service
pub fn orchestrator(service: &Arc<ScriptedService>) -> Arc<Orchestrator> {
    init_test_logging();
    Arc::new(Orchestrator::new(plan_client(service), image_client(service)))
}

/// Wait until the pipeline leaves its busy states
pub async fn wait_until_settled(orchestrator: &Orchestrator) -> PipelineState {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let state = orchestrator.state().await;
            if !state.is_busy() {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("pipeline did not settle")
}

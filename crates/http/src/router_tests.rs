use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{Value, json};
use surveyplus_core::PolicyConfig;
use surveyplus_llm::{CompletionRequest, LlmError, REPORT_MAX_TOKENS, TextGenerator};
use surveyplus_service::{InterviewController, NoopObserver, ReportService, StudyService};
use surveyplus_storage::InMemoryStorage;

use crate::{AppState, create_router};

const CANNED_REPORT: &str = r#"```json
{"executiveSummary": "People want faster checkout.",
 "findings": [{"researchQuestion": "What slows checkout?", "answer": "Forms.",
   "themes": [{"theme": "Form fatigue", "count": 1, "total": 1, "quotes": ["too many fields"]}]}],
 "unexpectedInsights": [], "furtherResearch": ["Mobile checkout"]}
```"#;

struct CannedGenerator;

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        if request.max_tokens == REPORT_MAX_TOKENS {
            return Ok(CANNED_REPORT.to_owned());
        }
        Ok("What made that part slow for you?".to_owned())
    }
}

/// Serves the router on an ephemeral port and returns its base URL.
async fn spawn_server() -> String {
    let store = Arc::new(InMemoryStorage::new());
    let generator = Arc::new(CannedGenerator);
    // One question that concludes on the first reply keeps the scenarios short.
    let config = PolicyConfig { max_last_question_followups: 0, ..PolicyConfig::default() };
    let state = Arc::new(AppState {
        study_service: Arc::new(StudyService::new(store.clone())),
        interview_controller: Arc::new(
            InterviewController::new(store.clone(), generator.clone(), config)
                .with_observer(Arc::new(NoopObserver)),
        ),
        report_service: Arc::new(ReportService::new(store, generator)),
    });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

async fn post(client: &reqwest::Client, url: String, body: Value) -> (StatusCode, Value) {
    let resp = client.post(url).json(&body).send().await.unwrap();
    let status = resp.status();
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

async fn get(client: &reqwest::Client, url: String) -> (StatusCode, Value) {
    let resp = client.get(url).send().await.unwrap();
    let status = resp.status();
    let body = resp.json::<Value>().await.unwrap_or(Value::Null);
    (status, body)
}

async fn active_study(client: &reqwest::Client, base: &str) -> String {
    let (status, study) = post(
        client,
        format!("{base}/api/studies"),
        json!({
            "name": "Checkout",
            "research_goal": "Understand checkout friction",
            "research_questions": ["What slows checkout?"],
            "question_framework": ["Tell me about your last checkout."]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = study["id"].as_str().unwrap().to_owned();
    let (status, _) = post(client, format!("{base}/api/studies/{id}/activate"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    id
}

#[tokio::test]
async fn health_reports_ok() {
    let base = spawn_server().await;
    let body = reqwest::get(format!("{base}/health")).await.unwrap().text().await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn full_interview_then_report() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let study_id = active_study(&client, &base).await;

    let (status, started) = post(
        &client,
        format!("{base}/api/studies/{study_id}/interviews"),
        json!({"participant_metadata": {"segment": "mobile"}}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(started["messages"].as_array().unwrap().len(), 2);
    assert_eq!(started["progress"]["question_index"], 0);
    let interview_id = started["id"].as_str().unwrap().to_owned();

    let (status, turn) = post(
        &client,
        format!("{base}/api/interviews/{interview_id}/messages"),
        json!({"text": "There were too many fields to fill in."}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(turn["decision"], "conclude");
    assert_eq!(turn["interview"]["status"], "complete");
    assert_eq!(turn["used_fallback"], false);

    let (status, summarized) =
        post(&client, format!("{base}/api/interviews/{interview_id}/summary"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(summarized["ai_summary"].is_string());

    let (status, report) =
        post(&client, format!("{base}/api/studies/{study_id}/report"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["participant_count"], 1);
    assert_eq!(report["executive_summary"], "People want faster checkout.");

    let (status, stored) = get(&client, format!("{base}/api/studies/{study_id}/report")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["id"], report["id"]);

    let (_, stats) = get(&client, format!("{base}/api/studies/{study_id}/stats")).await;
    assert_eq!(stats["complete"], 1);
    assert_eq!(stats["completion_rate"], 100);
}

#[tokio::test]
async fn empty_reply_is_bad_request() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let study_id = active_study(&client, &base).await;
    let (_, started) =
        post(&client, format!("{base}/api/studies/{study_id}/interviews"), json!({})).await;
    let interview_id = started["id"].as_str().unwrap();

    let (status, body) = post(
        &client,
        format!("{base}/api/interviews/{interview_id}/messages"),
        json!({"text": "   "}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn abandoned_interview_rejects_replies() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let study_id = active_study(&client, &base).await;
    let (_, started) =
        post(&client, format!("{base}/api/studies/{study_id}/interviews"), json!({})).await;
    let interview_id = started["id"].as_str().unwrap();

    let (status, abandoned) =
        post(&client, format!("{base}/api/interviews/{interview_id}/abandon"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(abandoned["status"], "abandoned");

    let (status, _) = post(
        &client,
        format!("{base}/api/interviews/{interview_id}/messages"),
        json!({"text": "hello?"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn draft_study_cannot_host_interviews() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let (_, study) = post(
        &client,
        format!("{base}/api/studies"),
        json!({"name": "Draft", "research_goal": "g", "question_framework": ["q"]}),
    )
    .await;
    let id = study["id"].as_str().unwrap();
    assert_eq!(study["status"], "draft");

    let (status, _) = post(&client, format!("{base}/api/studies/{id}/interviews"), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn empty_framework_cannot_be_activated() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let (_, study) = post(
        &client,
        format!("{base}/api/studies"),
        json!({"name": "Empty", "research_goal": "g"}),
    )
    .await;
    let id = study["id"].as_str().unwrap();

    let (status, _) = post(&client, format!("{base}/api/studies/{id}/activate"), json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn report_without_complete_interviews_is_bad_request() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let study_id = active_study(&client, &base).await;

    let (status, _) =
        post(&client, format!("{base}/api/studies/{study_id}/report"), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = get(&client, format!("{base}/api/studies/{study_id}/report")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_study_removes_its_interviews() {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let study_id = active_study(&client, &base).await;
    let (_, started) =
        post(&client, format!("{base}/api/studies/{study_id}/interviews"), json!({})).await;
    let interview_id = started["id"].as_str().unwrap();

    let resp = client.delete(format!("{base}/api/studies/{study_id}")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let (status, _) = get(&client, format!("{base}/api/interviews/{interview_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&client, format!("{base}/api/studies/{study_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ABOUTME: Integration tests for the generation pipeline state machine
// ABOUTME: End-to-end runs, failure paths, busy rejection, reset, and stale-response suppression
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{
    image_response, orchestrator, plan_response, sample_plan_json, transport_error,
    wait_until_settled, ScriptedService, PNG_BASE64,
};
use nutrivision_server::constants::messages;
use nutrivision_server::errors::{AppError, ErrorCode};
use nutrivision_server::llm::GenerateContentResponse;
use nutrivision_server::models::{ProfileDraft, UserProfile};
use nutrivision_server::orchestrator::{PipelinePhase, PipelineState, RunOutcome};

#[tokio::test]
async fn test_end_to_end_success() {
    let service = ScriptedService::new();
    service.push(Ok(plan_response(&sample_plan_json())));
    service.push(Ok(image_response()));
    let pipeline = orchestrator(&service);

    let profile = ProfileDraft::new().snapshot().unwrap();
    let snapshot = pipeline.generate(profile).await.unwrap();

    assert_eq!(snapshot.phase, PipelinePhase::Success);
    assert!(snapshot.error.is_none());
    assert!(snapshot.run_id.is_some());
    let plan = snapshot.plan.unwrap();
    assert_eq!(plan.daily_plan.meals.breakfast.name, "Greek Yogurt Parfait");
    assert_eq!(
        snapshot.image_data_uri.as_deref(),
        Some(format!("data:image/png;base64,{PNG_BASE64}").as_str())
    );

    let requests = service.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0]
        .prompt_text()
        .contains("- Dietary Restrictions: None"));
    let image_prompt = requests[1].prompt_text();
    for (name, kcal) in [
        ("Greek Yogurt Parfait", "420"),
        ("Grilled Chicken Quinoa Bowl", "650.5"),
        ("Baked Salmon with Asparagus", "720"),
    ] {
        assert!(image_prompt.contains(&format!("{name} ({kcal}kcal)")));
    }
}

#[tokio::test]
async fn test_transport_error_skips_image_call() {
    let service = ScriptedService::new();
    service.push(Err(transport_error()));
    let pipeline = orchestrator(&service);

    let snapshot = pipeline.generate(UserProfile::default()).await.unwrap();

    assert_eq!(snapshot.phase, PipelinePhase::Error);
    assert!(!snapshot.error.unwrap().is_empty());
    assert!(snapshot.plan.is_none());
    assert_eq!(service.call_count(), 1);
}

#[tokio::test]
async fn test_image_failure_discards_plan() {
    let service = ScriptedService::new();
    service.push(Ok(plan_response(&sample_plan_json())));
    service.push(Ok(GenerateContentResponse::default()));
    let pipeline = orchestrator(&service);

    let snapshot = pipeline.generate(UserProfile::default()).await.unwrap();

    assert_eq!(snapshot.phase, PipelinePhase::Error);
    assert_eq!(snapshot.error.as_deref(), Some("No image generated by the model"));
    assert!(snapshot.plan.is_none());
    assert!(snapshot.image_data_uri.is_none());
    assert!(pipeline.image().await.is_none());
}

#[tokio::test]
async fn test_blank_error_message_falls_back() {
    let service = ScriptedService::new();
    service.push(Err(AppError::new(ErrorCode::InternalError, "")));
    let pipeline = orchestrator(&service);

    let snapshot = pipeline.generate(UserProfile::default()).await.unwrap();
    assert_eq!(snapshot.error.as_deref(), Some(messages::UNEXPECTED_ERROR));
}

#[tokio::test]
async fn test_begin_is_immediate_and_blocks_resubmission() {
    let service = ScriptedService::new();
    let pipeline = orchestrator(&service);

    let ticket = pipeline.begin(UserProfile::default()).await.unwrap();
    assert_eq!(pipeline.state().await, PipelineState::Loading);
    let snapshot = pipeline.snapshot().await;
    assert_eq!(snapshot.phase, PipelinePhase::Loading);
    assert_eq!(snapshot.run_id, Some(ticket.run_id()));
    assert_eq!(snapshot.stage_message.as_deref(), Some(messages::STAGE_PLAN));

    let err = pipeline.begin(UserProfile::default()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceLocked);
    assert_eq!(service.call_count(), 0);
}

#[tokio::test]
async fn test_error_state_allows_new_submission() {
    let service = ScriptedService::new();
    service.push(Err(transport_error()));
    service.push(Ok(plan_response(&sample_plan_json())));
    service.push(Ok(image_response()));
    let pipeline = orchestrator(&service);

    let first = pipeline.generate(UserProfile::default()).await.unwrap();
    assert_eq!(first.phase, PipelinePhase::Error);

    let second = pipeline.generate(UserProfile::default()).await.unwrap();
    assert_eq!(second.phase, PipelinePhase::Success);
    assert!(second.error.is_none());
    assert_ne!(first.run_id, second.run_id);
}

#[tokio::test]
async fn test_plan_hidden_while_image_pending() {
    let service = ScriptedService::new();
    service.push(Ok(plan_response(&sample_plan_json())));
    let release_image = service.push_deferred();
    let pipeline = orchestrator(&service);

    let ticket = pipeline.begin(UserProfile::default()).await.unwrap();
    let runner = {
        let pipeline = pipeline.clone();
        tokio::spawn(async move { pipeline.execute(ticket).await })
    };
    service.wait_for_calls(2).await;

    assert!(matches!(
        pipeline.state().await,
        PipelineState::AwaitingImage(_)
    ));
    let snapshot = pipeline.snapshot().await;
    assert_eq!(snapshot.phase, PipelinePhase::GeneratingImage);
    assert_eq!(snapshot.stage_message.as_deref(), Some(messages::STAGE_IMAGE));
    assert!(snapshot.plan.is_none());
    assert!(pipeline.begin(UserProfile::default()).await.is_err());

    release_image.send(Ok(image_response())).unwrap();
    assert_eq!(runner.await.unwrap(), RunOutcome::Completed);
    assert_eq!(pipeline.snapshot().await.phase, PipelinePhase::Success);
}

#[tokio::test]
async fn test_reset_clears_every_state() {
    let service = ScriptedService::new();
    service.push(Ok(plan_response(&sample_plan_json())));
    service.push(Ok(image_response()));
    service.push(Err(transport_error()));
    let pipeline = orchestrator(&service);

    pipeline.generate(UserProfile::default()).await.unwrap();
    pipeline.reset().await;
    let snapshot = pipeline.snapshot().await;
    assert_eq!(snapshot.phase, PipelinePhase::Idle);
    assert!(snapshot.plan.is_none() && snapshot.image_data_uri.is_none());
    assert!(snapshot.run_id.is_none());

    pipeline.generate(UserProfile::default()).await.unwrap();
    pipeline.reset().await;
    assert_eq!(pipeline.state().await, PipelineState::Idle);

    pipeline.begin(UserProfile::default()).await.unwrap();
    pipeline.reset().await;
    assert_eq!(pipeline.state().await, PipelineState::Idle);
}

#[tokio::test]
async fn test_plan_arriving_after_reset_is_ignored() {
    let service = ScriptedService::new();
    let release_plan = service.push_deferred();
    let pipeline = orchestrator(&service);

    let ticket = pipeline.begin(UserProfile::default()).await.unwrap();
    let runner = {
        let pipeline = pipeline.clone();
        tokio::spawn(async move { pipeline.execute(ticket).await })
    };
    service.wait_for_calls(1).await;

    pipeline.reset().await;
    release_plan
        .send(Ok(plan_response(&sample_plan_json())))
        .unwrap();

    assert_eq!(runner.await.unwrap(), RunOutcome::Superseded);
    assert_eq!(pipeline.state().await, PipelineState::Idle);
    // The superseded run never reaches the image stage
    assert_eq!(service.call_count(), 1);
}

#[tokio::test]
async fn test_failure_arriving_after_reset_is_ignored() {
    let service = ScriptedService::new();
    let release_plan = service.push_deferred();
    let pipeline = orchestrator(&service);

    let ticket = pipeline.begin(UserProfile::default()).await.unwrap();
    let runner = {
        let pipeline = pipeline.clone();
        tokio::spawn(async move { pipeline.execute(ticket).await })
    };
    service.wait_for_calls(1).await;

    pipeline.reset().await;
    release_plan.send(Err(transport_error())).unwrap();

    assert_eq!(runner.await.unwrap(), RunOutcome::Superseded);
    assert_eq!(pipeline.snapshot().await.phase, PipelinePhase::Idle);
}

#[tokio::test]
async fn test_image_arriving_after_reset_is_ignored() {
    let service = ScriptedService::new();
    service.push(Ok(plan_response(&sample_plan_json())));
    let release_image = service.push_deferred();
    let pipeline = orchestrator(&service);

    let ticket = pipeline.begin(UserProfile::default()).await.unwrap();
    let runner = {
        let pipeline = pipeline.clone();
        tokio::spawn(async move { pipeline.execute(ticket).await })
    };
    service.wait_for_calls(2).await;

    pipeline.reset().await;
    release_image.send(Ok(image_response())).unwrap();

    assert_eq!(runner.await.unwrap(), RunOutcome::Superseded);
    assert_eq!(pipeline.state().await, PipelineState::Idle);
    assert!(pipeline.image().await.is_none());
}

#[tokio::test]
async fn test_stale_run_does_not_clobber_newer_run() {
    let service = ScriptedService::new();
    let release_stale = service.push_deferred();
    service.push(Ok(plan_response(&sample_plan_json())));
    service.push(Ok(image_response()));
    let pipeline = orchestrator(&service);

    let stale_ticket = pipeline.begin(UserProfile::default()).await.unwrap();
    let stale = {
        let pipeline = pipeline.clone();
        tokio::spawn(async move { pipeline.execute(stale_ticket).await })
    };
    service.wait_for_calls(1).await;
    pipeline.reset().await;

    let fresh = pipeline.generate(UserProfile::default()).await.unwrap();
    assert_eq!(fresh.phase, PipelinePhase::Success);

    release_stale.send(Err(transport_error())).unwrap();
    assert_eq!(stale.await.unwrap(), RunOutcome::Superseded);

    let after = pipeline.snapshot().await;
    assert_eq!(after.phase, PipelinePhase::Success);
    assert_eq!(after.run_id, fresh.run_id);
}

#[tokio::test]
async fn test_submit_runs_in_background() {
    let service = ScriptedService::new();
    service.push(Ok(plan_response(&sample_plan_json())));
    service.push(Ok(image_response()));
    let pipeline = orchestrator(&service);

    let snapshot = pipeline.submit(UserProfile::default()).await.unwrap();
    assert_eq!(snapshot.phase, PipelinePhase::Loading);

    let state = wait_until_settled(&pipeline).await;
    assert!(matches!(state, PipelineState::Success { .. }));
}

#[tokio::test]
async fn test_duplicate_restriction_kept_once() {
    let mut draft = ProfileDraft::new();
    draft.add_restriction("Vegan").unwrap();
    let err = draft.add_restriction("Vegan").unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
    assert_eq!(draft.restrictions(), ["Vegan".to_owned()]);

    let service = ScriptedService::new();
    service.push(Ok(plan_response(&sample_plan_json())));
    service.push(Ok(image_response()));
    let pipeline = orchestrator(&service);
    pipeline.generate(draft.snapshot().unwrap()).await.unwrap();
    assert!(service.requests()[0]
        .prompt_text()
        .contains("- Dietary Restrictions: Vegan\n"));
}

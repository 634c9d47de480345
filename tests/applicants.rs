mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{FakeBackend, STAFF_ID, TestApp, assert_redirect, body_text, org_id};
use remit_console::models::org::{OrgProfile, OrgStatus};
use serde_json::json;

#[tokio::test]
async fn requests_without_staff_identity_go_to_login() {
    let app = TestApp::new(FakeBackend::default());

    let request = Request::builder()
        .uri("/dashboard/dsa-applicant-list")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_redirect(&response, "/login");
    assert!(app.backend.calls().is_empty());
}

#[tokio::test]
async fn applicant_list_forwards_filters_and_paginates() {
    let backend = FakeBackend {
        profiles: vec![OrgProfile {
            id: org_id(),
            status: OrgStatus::PendingDocuments,
            ..Default::default()
        }],
        total: 35,
        ..Default::default()
    };
    let app = TestApp::new(backend);

    let response = app
        .get("/dashboard/dsa-applicant-list?page=2&search-term=Acme&status=accepted,pending")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let requests = app.backend.calls_to("list_org_profiles");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["offset"], 10);
    assert_eq!(requests[0]["limit"], 10);
    assert_eq!(requests[0]["company_name"], "Acme");
    assert_eq!(requests[0]["statuses"], json!(["Accepted", "Pending"]));

    let (template, view) = app.renderer.last().unwrap();
    assert_eq!(template, "dsa-applicant-list.html");
    assert_eq!(view["pagination"]["total_count"], 35);
    assert_eq!(view["pagination"]["total_pages"], 4);
    assert_eq!(view["pagination"]["current_page"], 2);
    assert_eq!(view["applicants"][0]["status_text"], "Pending Documents");
    assert_eq!(view["csrf_token"], common::CSRF_TOKEN);
}

#[tokio::test]
async fn applicant_list_survives_backend_failure() {
    let app = TestApp::new(FakeBackend {
        fail_lists: true,
        ..Default::default()
    });

    let response = app.get("/dashboard/dsa-applicant-list?page=junk").await;
    assert_eq!(response.status(), StatusCode::OK);

    let view = app.renderer.last_context();
    assert_eq!(view["applicants"], json!([]));
    assert_eq!(view["pagination"]["current_page"], 1);
}

#[tokio::test]
async fn applicant_detail_tolerates_decorative_failures() {
    let app = TestApp::new(FakeBackend {
        fail_lists: true,
        ..FakeBackend::with_profile(org_id())
    });

    let response = app.get(&format!("/dashboard/dsa-applicant/{}", org_id())).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "rendered dsa-applicant-detail.html");

    let view = app.renderer.last_context();
    assert_eq!(view["status_text"], "Incomplete");
    assert_eq!(view["all_docs_submitted"], false);
    assert_eq!(view["documents"].as_array().unwrap().len(), 9);
    assert_eq!(view["users"], json!([]));
}

#[tokio::test]
async fn missing_applicant_redirects_to_error_page() {
    let app = TestApp::new(FakeBackend::default());

    let response = app.get(&format!("/dashboard/dsa-applicant/{}", org_id())).await;
    assert_redirect(&response, "/error");

    let response = app.get("/dashboard/dsa-applicant/not-a-uuid").await;
    assert_redirect(&response, "/error");
}

#[tokio::test]
async fn status_update_is_recorded_with_staff_id() {
    let app = TestApp::new(FakeBackend::with_profile(org_id()));

    let response = app
        .post(
            &format!("/dashboard/dsa-applicant/{}/status", org_id()),
            &[("csrf_token", common::CSRF_TOKEN), ("status", "accepted"), ("remark", "Looks good")],
        )
        .await;
    assert_redirect(&response, &format!("/dashboard/dsa-applicant/{}", org_id()));

    let updates = app.backend.calls_to("update_org_status");
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0]["status"], "Accepted");
    assert_eq!(updates[0]["remark"], "Looks good");
    assert_eq!(updates[0]["updated_by"], STAFF_ID);
}

#[tokio::test]
async fn decision_verb_sets_matching_status() {
    let app = TestApp::new(FakeBackend::with_profile(org_id()));

    let response = app
        .post(&format!("/dashboard/dsa-applicant/{}/status", org_id()), &[("status", "accept")])
        .await;
    assert_redirect(&response, &format!("/dashboard/dsa-applicant/{}", org_id()));

    let updates = app.backend.calls_to("update_org_status");
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0]["status"], "Accepted");
}

#[tokio::test]
async fn rejection_without_remark_rerenders_detail() {
    let app = TestApp::new(FakeBackend::with_profile(org_id()));

    let response = app
        .post(&format!("/dashboard/dsa-applicant/{}/status", org_id()), &[("status", "rejected")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.backend.mutations().is_empty());

    let (template, view) = app.renderer.last().unwrap();
    assert_eq!(template, "dsa-applicant-detail.html");
    assert!(view["errors"]["remark"].is_string());
    assert_eq!(view["form"]["status"], "rejected");
}

#[tokio::test]
async fn dsa_code_requires_terminal_for_selected_channel() {
    let app = TestApp::new(FakeBackend::with_profile(org_id()));
    let uri = format!("/dashboard/dsa-applicant/{}/dsa-code", org_id());

    let response = app
        .post(&uri, &[("dsa_code", "dsa01"), ("TransactionOTC", "on")])
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(app.renderer.last_context()["errors"]["terminal_id_otc"].is_string());
    assert!(app.backend.mutations().is_empty());

    let response = app
        .post(
            &uri,
            &[("dsa_code", "dsa01"), ("TransactionOTC", "on"), ("terminal_id_otc", "T-100")],
        )
        .await;
    assert_redirect(&response, &format!("/dashboard/dsa-applicant/{}", org_id()));

    let updates = app.backend.calls_to("update_dsa_code");
    assert_eq!(updates[0]["dsa_code"], "DSA01");
    assert_eq!(updates[0]["transaction_types"], "OTC");
}

#[tokio::test]
async fn user_list_and_detail() {
    let app = TestApp::new(FakeBackend::default());

    let response = app
        .get(&format!("/dashboard/users?org_id={}&invite_status=invited", org_id()))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let requests = app.backend.calls_to("list_users");
    assert_eq!(requests[0]["org_id"], org_id().to_string());
    assert_eq!(requests[0]["invite_statuses"], json!(["Invited"]));

    let response = app.get("/dashboard/users/missing").await;
    assert_redirect(&response, "/error");
}

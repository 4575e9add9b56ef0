//! Organization admin endpoints against the mock server.

mod common;

use axum::http::Method;
use common::MockServer;
use github_admin::{Error, Organization, RenameOrgResponse};

#[tokio::test]
async fn create_org_sends_login_and_admin() {
    let server = MockServer::start(201, r#"{"login":"acme"}"#).await;
    let client = server.client();

    let org = Organization {
        login: Some("acme".to_string()),
        name: Some("Acme Corp".to_string()),
        ..Default::default()
    };
    let (created, response) = client.admin().create_org(&org, "alice").await.unwrap();

    assert_eq!(response.status.as_u16(), 201);
    assert_eq!(
        created,
        Organization {
            login: Some("acme".to_string()),
            ..Default::default()
        }
    );

    let req = server.single_request();
    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path, "/api/v3/admin/organizations");
    assert_eq!(req.body_str(), r#"{"login":"acme","admin":"alice"}"#);
    assert_eq!(req.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn create_org_decodes_full_fixture() {
    let server = MockServer::start(
        201,
        r#"{
            "login": "acme",
            "id": 1,
            "node_id": "MDEyOk9yZ2FuaXphdGlvbjE=",
            "url": "https://ghe.example.com/api/v3/orgs/acme",
            "description": null,
            "public_repos": 0,
            "created_at": "2024-05-01T09:30:00Z"
        }"#,
    )
    .await;

    let org = Organization {
        login: Some("acme".to_string()),
        ..Default::default()
    };
    let (created, _) = server.client().admin().create_org(&org, "alice").await.unwrap();

    assert_eq!(created.login.as_deref(), Some("acme"));
    assert_eq!(created.id, Some(1));
    assert_eq!(created.node_id.as_deref(), Some("MDEyOk9yZ2FuaXphdGlvbjE="));
    assert_eq!(created.public_repos, Some(0));
    assert_eq!(created.created_at.unwrap().timestamp(), 1_714_555_800);
    assert!(created.description.is_none());
    assert!(created.name.is_none());
}

#[tokio::test]
async fn create_org_reports_validation_error() {
    let server = MockServer::start(
        422,
        r#"{"message":"Validation Failed","errors":[{"resource":"Organization","field":"login","code":"already_exists"}],"documentation_url":"https://docs.github.com/enterprise-server/rest/enterprise-admin/orgs"}"#,
    )
    .await;

    let org = Organization {
        login: Some("acme".to_string()),
        ..Default::default()
    };
    let err = server
        .client()
        .admin()
        .create_org(&org, "alice")
        .await
        .unwrap_err();

    match err {
        Error::Api(resp) => {
            assert_eq!(resp.status.as_u16(), 422);
            assert_eq!(resp.message, "Validation Failed");
            assert_eq!(resp.method, Method::POST);
            assert!(resp.url.path().ends_with("/admin/organizations"));
            assert_eq!(resp.errors[0].field.as_deref(), Some("login"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn rename_org_without_login_fails_locally() {
    let server = MockServer::start(202, "{}").await;

    let org = Organization {
        name: Some("Acme Corp".to_string()),
        ..Default::default()
    };
    let err = server
        .client()
        .admin()
        .rename_org(&org, "acme-corp")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingField("login")));
    assert_eq!(err.to_string(), "login must be provided");
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn rename_org_patches_current_login() {
    let server = MockServer::start(
        202,
        r#"{"message":"Job queued to rename organization. It may take a few minutes to complete.","url":"https://ghe.example.com/api/v3/organizations/1"}"#,
    )
    .await;

    let org = Organization {
        login: Some("acme".to_string()),
        ..Default::default()
    };
    let (renamed, response) = server
        .client()
        .admin()
        .rename_org(&org, "acme-corp")
        .await
        .unwrap();

    assert_eq!(response.status.as_u16(), 202);
    assert_eq!(
        renamed,
        RenameOrgResponse {
            message: Some(
                "Job queued to rename organization. It may take a few minutes to complete."
                    .to_string()
            ),
            url: Some("https://ghe.example.com/api/v3/organizations/1".to_string()),
        }
    );

    let req = server.single_request();
    assert_eq!(req.method, Method::PATCH);
    assert_eq!(req.path, "/api/v3/admin/organizations/acme");
    assert_eq!(req.body_str(), r#"{"login":"acme-corp"}"#);
}

#[tokio::test]
async fn rename_org_by_name_rejects_empty_name() {
    let server = MockServer::start(202, "{}").await;

    let err = server
        .client()
        .admin()
        .rename_org_by_name("", "acme-corp")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingField("org")));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn rename_org_by_name_not_found() {
    let server = MockServer::start(
        404,
        r#"{"message":"Not Found","documentation_url":"https://docs.github.com/rest"}"#,
    )
    .await;

    let err = server
        .client()
        .admin()
        .rename_org_by_name("ghost", "spirit")
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("404 Not Found"));
}

#[tokio::test]
async fn rename_org_with_empty_login_reports_login() {
    let server = MockServer::start(202, "{}").await;

    let org = Organization {
        login: Some(String::new()),
        ..Default::default()
    };
    let err = server
        .client()
        .admin()
        .rename_org(&org, "acme-corp")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "login must be provided");
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn rename_org_by_name_rejects_empty_new_name() {
    let server = MockServer::start(202, "{}").await;

    let err = server
        .client()
        .admin()
        .rename_org_by_name("acme", "")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::MissingField("login")));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn create_org_rejects_empty_admin() {
    let server = MockServer::start(201, r#"{"login":"acme"}"#).await;

    let org = Organization {
        login: Some("acme".to_string()),
        ..Default::default()
    };
    let err = server.client().admin().create_org(&org, "").await.unwrap_err();

    assert!(matches!(err, Error::MissingField("admin")));
    assert!(server.requests().is_empty());
}

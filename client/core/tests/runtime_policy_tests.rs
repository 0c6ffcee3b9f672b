//! Runtime policy CRUD operations against a stub deployment.
use serde_json::json;
use wiremock::matchers::body_partial_json;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

use khulnasoft_client::errors::ResourceNotFound;
use khulnasoft_client::RuntimePolicy;

mod helpers;

#[tokio::test]
async fn get_runtime_policy_decodes_the_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/runtime_policies/default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "default",
            "description": "default runtime policy",
            "application_scopes": ["Global"],
            "runtime_type": "host",
            "enabled": true,
            "enforce": false,
            "drift_prevention": {
                "enabled": true,
                "exec_lockdown": true,
                "image_lockdown": false,
                "exec_lockdown_white_list": ["/bin/sh"],
            },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = helpers::csp_client(&server.uri());
    client.set_token("token");
    let policy = client
        .get_runtime_policy("default")
        .await
        .expect("fetch must succeed");
    assert_eq!(policy.name, "default");
    assert_eq!(policy.application_scopes, vec!["Global".to_string()]);
    assert!(policy.enabled);
    assert!(!policy.enforce);
    assert!(policy.drift_prevention.exec_lockdown);
    assert_eq!(
        policy.drift_prevention.exec_lockdown_white_list,
        vec!["/bin/sh".to_string()],
    );
}

#[tokio::test]
async fn missing_runtime_policy_classifies_as_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/runtime_policies/gone"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let mut client = helpers::csp_client(&server.uri());
    client.set_token("token");
    let error = client
        .get_runtime_policy("gone")
        .await
        .expect_err("missing policy must error");
    assert!(error.is::<ResourceNotFound>());
}

#[tokio::test]
async fn create_runtime_policy_posts_the_document() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/runtime_policies"))
        .and(body_partial_json(json!({
            "name": "lockdown",
            "enabled": true,
            "enforce": true,
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = helpers::csp_client(&server.uri());
    client.set_token("token");
    let policy = RuntimePolicy {
        name: "lockdown".to_string(),
        enabled: true,
        enforce: true,
        ..RuntimePolicy::default()
    };
    client
        .create_runtime_policy(&policy)
        .await
        .expect("create must succeed");
}

#[tokio::test]
async fn delete_runtime_policy_removes_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v2/runtime_policies/lockdown"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = helpers::csp_client(&server.uri());
    client.set_token("token");
    client
        .delete_runtime_policy("lockdown")
        .await
        .expect("delete must succeed");
}

use lexlogic_core::client::{
    AgenticLogApi, AtomApi, ChatApi, FragmentApi, LogPage, ReasoningApi, RuleApi,
};
use lexlogic_core::models::{
    Agent, CreateChatMessage, LogOrder, PrologQuery, QueryStatus, RegenerateFeedback, UpdateRule,
};
use lexlogic_core::{ApiError, HttpBackend};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn backend() -> (MockServer, HttpBackend) {
    let server = MockServer::start().await;
    let backend = HttpBackend::new(server.uri()).unwrap();
    (server, backend)
}

#[tokio::test]
async fn test_list_atoms_with_spans() {
    let (server, backend) = backend().await;
    Mock::given(method("GET"))
        .and(path("/regulation-fragments/3/atoms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 7,
                "regulation_fragment_id": 3,
                "predicate": "bird(X)",
                "description": "X is a bird",
                "is_negated": false,
                "is_fact": true,
                "spans": [{"id": 1, "atom_id": 7, "start": 2, "end": 5}]
            }
        ])))
        .mount(&server)
        .await;

    let atoms = backend.list_atoms(3).await.unwrap();
    assert_eq!(atoms.len(), 1);
    assert_eq!(atoms[0].predicate, "bird(X)");
    assert_eq!(atoms[0].spans[0].range(), 2..5);
}

#[tokio::test]
async fn test_get_fragment_with_naive_timestamp() {
    let (server, backend) = backend().await;
    Mock::given(method("GET"))
        .and(path("/regulation-fragments/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "title": "Art. 12",
            "content": "A cat sat.",
            "created_at": "2025-03-01T10:15:30.123456",
            "llm_identifier": "GPT_4o_MINI",
            "formalism": "PROLOG",
            "used_tokens_in": 1000,
            "used_tokens_out": 500
        })))
        .mount(&server)
        .await;

    let fragment = backend.get_fragment(3).await.unwrap();
    assert_eq!(fragment.title, "Art. 12");
    assert_eq!(fragment.used_tokens_in, Some(1000));
    assert_eq!(fragment.source, None);
}

#[tokio::test]
async fn test_not_found_maps_to_status() {
    let (server, backend) = backend().await;
    Mock::given(method("GET"))
        .and(path("/regulation-fragments/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Regulation fragment not found"})),
        )
        .mount(&server)
        .await;

    let err = backend.get_fragment(99).await.unwrap_err();
    assert!(err.is_not_found());
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Regulation fragment not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let (server, backend) = backend().await;
    Mock::given(method("GET"))
        .and(path("/regulation-fragments/3/rules"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert!(matches!(
        backend.list_rules(3).await,
        Err(ApiError::Decode(_))
    ));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let backend = HttpBackend::new("http://127.0.0.1:1").unwrap();
    assert!(matches!(
        backend.list_fragments().await,
        Err(ApiError::Network(_))
    ));
}

#[tokio::test]
async fn test_regenerate_rules_sends_feedback() {
    let (server, backend) = backend().await;
    Mock::given(method("POST"))
        .and(path("/regulation-fragments/3/rules/regenerate"))
        .and(body_json(json!({"feedback": "merge the two compliance rules"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    backend
        .regenerate_rules(
            3,
            &RegenerateFeedback {
                feedback: "merge the two compliance rules".into(),
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_rule_only_sends_set_fields() {
    let (server, backend) = backend().await;
    Mock::given(method("PUT"))
        .and(path("/rules/10"))
        .and(body_json(json!({"definition": "flies(X) :- bird(X), \\+ penguin(X)."})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 10,
            "regulation_fragment_id": 3,
            "description": "Birds fly unless penguins",
            "definition": "flies(X) :- bird(X), \\+ penguin(X).",
            "is_goal": true,
            "created_at": "2025-03-01T10:15:30Z"
        })))
        .mount(&server)
        .await;

    let update = UpdateRule {
        definition: Some("flies(X) :- bird(X), \\+ penguin(X).".into()),
        ..Default::default()
    };
    let rule = backend.update_rule(10, &update).await.unwrap();
    assert_eq!(rule.head(), "flies(X)");
}

#[tokio::test]
async fn test_run_example() {
    let (server, backend) = backend().await;
    Mock::given(method("POST"))
        .and(path("/regulation-fragments/3/run-example"))
        .and(body_json(json!({"facts": "bird(tweety)."})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "answers": [{"status": "success", "answers": [{"variable": "X", "value": "tweety"}]}]
        })))
        .mount(&server)
        .await;

    let response = backend
        .run_example(
            3,
            &PrologQuery {
                facts: "bird(tweety).".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.status, QueryStatus::Success);
    assert_eq!(response.error_message(), None);
}

#[tokio::test]
async fn test_formalism_text() {
    let (server, backend) = backend().await;
    Mock::given(method("GET"))
        .and(path("/regulation-fragments/3/formalism"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": ":- dynamic bird/1."})))
        .mount(&server)
        .await;

    assert_eq!(backend.formalism_text(3).await.unwrap(), ":- dynamic bird/1.");
}

#[tokio::test]
async fn test_agentic_log_query_parameters() {
    let (server, backend) = backend().await;
    Mock::given(method("GET"))
        .and(path("/regulation-fragments/3/agentic-logs"))
        .and(query_param("cursor", "41"))
        .and(query_param("limit", "20"))
        .and(query_param("order-date", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 42,
                "user_prompt": "Extract atoms",
                "system_prompt": null,
                "message_source": "MODEL",
                "regulation_fragment_id": 3,
                "created_at": "2025-03-01T10:15:30Z"
            }
        ])))
        .mount(&server)
        .await;

    let page = LogPage {
        cursor: Some(41),
        limit: Some(20),
        order: LogOrder::Asc,
    };
    let logs = backend.agentic_logs(3, page).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].id, 42);
    assert!(!logs[0].is_error);
}

#[tokio::test]
async fn test_send_chat_message() {
    let (server, backend) = backend().await;
    Mock::given(method("POST"))
        .and(path("/regulations/3/chat"))
        .and(body_json(json!({"content": "Why is tweety compliant?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5,
            "created_at": "2025-03-01T10:15:30Z",
            "content": "Why is tweety compliant?",
            "agent": "USER"
        })))
        .mount(&server)
        .await;

    let message = backend
        .send_chat_message(
            3,
            &CreateChatMessage {
                content: "Why is tweety compliant?".into(),
            },
        )
        .await
        .unwrap();
    assert_eq!(message.id, 5);
    assert_eq!(message.agent, Agent::User);
}

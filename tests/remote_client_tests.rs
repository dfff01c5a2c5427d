use chatline::remote::{ChatService, GraphClient, RemoteError};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn client_for(server: &MockServer) -> GraphClient {
    GraphClient::new("test-token".to_string(), Some(server.uri()))
}

fn message_json(id: &str, content: &str, minute: u32) -> serde_json::Value {
    json!({
        "id": id,
        "body": {"contentType": "text", "content": content},
        "from": {"user": {"id": "u-sam", "displayName": "Sam"}},
        "createdDateTime": format!("2024-03-01T09:{minute:02}:00Z"),
    })
}

// ============================================================================
// Requests
// ============================================================================

#[tokio::test]
async fn test_send_chat_message_posts_body_with_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chats/chat-1/messages"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_json(json!({"body": {"content": "hello"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(message_json("42", "hello", 5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let sent = client.send_chat_message("chat-1", "hello").await.unwrap();

    assert_eq!(sent.id, "42");
    assert_eq!(sent.body.content, "hello");
    assert_eq!(sent.sender().map(|u| u.id.as_str()), Some("u-sam"));
}

#[tokio::test]
async fn test_current_user() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "u-me", "displayName": "Me"})),
        )
        .mount(&mock_server)
        .await;

    let me = client_for(&mock_server).current_user().await.unwrap();
    assert_eq!(me.id, "u-me");
    assert_eq!(me.display_name.as_deref(), Some("Me"));
}

#[tokio::test]
async fn test_list_chats_unwraps_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/chats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": [{
                "id": "chat-1",
                "topic": null,
                "chatType": "oneOnOne",
                "members": [
                    {"userId": "u-me", "displayName": "Me"},
                    {"userId": "u-sam", "displayName": "Sam"}
                ]
            }]
        })))
        .mount(&mock_server)
        .await;

    let chats = client_for(&mock_server).list_chats().await.unwrap();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0].chat_type.as_deref(), Some("oneOnOne"));
    assert_eq!(chats[0].members[1].display_name.as_deref(), Some("Sam"));
}

#[tokio::test]
async fn test_list_message_replies() {
    let mock_server = MockServer::start().await;

    let mut reply = message_json("r1-a", "next week", 7);
    reply["replyToId"] = json!("r1");
    Mock::given(method("GET"))
        .and(path("/teams/t-1/channels/c-1/messages/r1/replies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": [reply]})))
        .mount(&mock_server)
        .await;

    let replies = client_for(&mock_server)
        .list_message_replies("t-1", "c-1", "r1")
        .await
        .unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].reply_to_id.as_deref(), Some("r1"));
}

#[tokio::test]
async fn test_empty_collection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/joinedTeams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .mount(&mock_server)
        .await;

    let teams = client_for(&mock_server).list_joined_teams().await.unwrap();
    assert!(teams.is_empty());
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_error_status_becomes_api_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chats/chat-1/messages"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).list_chat_messages("chat-1").await;
    match result {
        Err(RemoteError::Api { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "Forbidden");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_becomes_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/t-1/channels"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).list_channels("t-1").await;
    assert!(matches!(result, Err(RemoteError::Parse(_))));
}

use commit_board_sync::domain::model::{Board, BoardList, Card};
use commit_board_sync::domain::ports::BoardService;
use commit_board_sync::{SyncError, TrelloClient, TrelloSettings};
use httpmock::prelude::*;
use serde_json::json;

const KEY: &str = "app-key";
const TOKEN: &str = "auth-token";

fn settings(server: &MockServer) -> TrelloSettings {
    TrelloSettings::new(KEY, TOKEN).with_api_base(server.base_url())
}

async fn connected(server: &MockServer) -> TrelloClient {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/1/members/me")
                .query_param("key", KEY)
                .query_param("token", TOKEN);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"id": "m1", "fullName": "Ada Lovelace", "username": "ada"}));
        })
        .await;

    TrelloClient::connect(settings(server)).await.unwrap()
}

fn board() -> Board {
    Board {
        id: "b1".to_string(),
        name: "Mertrellial".to_string(),
    }
}

fn card() -> Card {
    Card {
        id: "c3".to_string(),
        short_id: 3,
        name: "Parser".to_string(),
    }
}

#[tokio::test]
async fn test_connect_reads_member() {
    let server = MockServer::start_async().await;

    let trello = connected(&server).await;

    assert_eq!(trello.member().full_name, "Ada Lovelace");
    assert_eq!(trello.member().username, "ada");
}

#[tokio::test]
async fn test_connect_with_expired_token_fails() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/1/members/me");
            then.status(401).body("invalid token");
        })
        .await;

    let result = TrelloClient::connect(settings(&server)).await;

    assert!(matches!(result, Err(SyncError::AuthenticationError { .. })));
}

#[tokio::test]
async fn test_connect_without_credentials_makes_no_request() {
    let server = MockServer::start_async().await;
    let me = server
        .mock_async(|when, then| {
            when.method(GET).path("/1/members/me");
            then.status(200).json_body(json!({"id": "m1"}));
        })
        .await;

    let result =
        TrelloClient::connect(TrelloSettings::new("", TOKEN).with_api_base(server.base_url()))
            .await;

    assert!(matches!(result, Err(SyncError::MissingConfigError { .. })));
    assert_eq!(me.hits_async().await, 0);
}

#[tokio::test]
async fn test_find_board_by_exact_name() {
    let server = MockServer::start_async().await;
    let trello = connected(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/1/members/me/boards")
                .query_param("key", KEY)
                .query_param("token", TOKEN);
            then.status(200).json_body(json!([
                {"id": "b0", "name": "mertrellial"},
                {"id": "b1", "name": "Mertrellial"},
                {"id": "b2", "name": "Mertrellial"}
            ]));
        })
        .await;

    let found = trello.find_board_by_name("Mertrellial").await.unwrap();
    assert_eq!(found.map(|b| b.id), Some("b1".to_string()));

    let missing = trello.find_board_by_name("Unknown").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_cards_for_board() {
    let server = MockServer::start_async().await;
    let trello = connected(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/1/boards/b1/cards");
            then.status(200).json_body(json!([
                {"id": "c3", "idShort": 3, "name": "Parser"},
                {"id": "c4", "idShort": 4, "name": "Docs"}
            ]));
        })
        .await;

    let cards = trello.cards_for_board(&board()).await.unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0], card());
    assert_eq!(cards[1].short_id, 4);
}

#[tokio::test]
async fn test_add_comment_posts_text() {
    let server = MockServer::start_async().await;
    let trello = connected(&server).await;
    let comment = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/1/cards/c3/actions/comments")
                .query_param("text", "3:Ada - added NUnit test library")
                .query_param("key", KEY)
                .query_param("token", TOKEN);
            then.status(200).json_body(json!({"id": "a1"}));
        })
        .await;

    trello
        .add_comment(&card(), "3:Ada - added NUnit test library")
        .await
        .unwrap();

    comment.assert_async().await;
}

#[tokio::test]
async fn test_lists_and_move_card() {
    let server = MockServer::start_async().await;
    let trello = connected(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/1/boards/b1/lists");
            then.status(200).json_body(json!([
                {"id": "l1", "name": "Development"},
                {"id": "l2", "name": "Testing"}
            ]));
        })
        .await;
    let moved = server
        .mock_async(|when, then| {
            when.method(PUT).path("/1/cards/c3").query_param("idList", "l2");
            then.status(200).json_body(json!({"id": "c3"}));
        })
        .await;

    let lists = trello.lists_for_board(&board()).await.unwrap();
    let testing = lists.iter().find(|l| l.name == "Testing").unwrap();
    trello.move_card(&card(), testing).await.unwrap();

    moved.assert_async().await;
    assert_eq!(
        lists[0],
        BoardList {
            id: "l1".to_string(),
            name: "Development".to_string()
        }
    );
}

#[tokio::test]
async fn test_server_error_is_board_service_error() {
    let server = MockServer::start_async().await;
    let trello = connected(&server).await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/1/boards/b1/lists");
            then.status(500);
        })
        .await;

    let err = trello.lists_for_board(&board()).await.unwrap_err();

    assert!(matches!(
        err,
        SyncError::BoardServiceError { status: 500, ref endpoint } if endpoint == "boards/b1/lists"
    ));
}

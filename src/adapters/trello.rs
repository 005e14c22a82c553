use crate::domain::model::{Board, BoardList, Card};
use crate::domain::ports::BoardService;
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.trello.com";

#[derive(Debug, Clone)]
pub struct TrelloSettings {
    pub api_base: String,
    pub app_key: String,
    pub auth_token: String,
    pub timeout: Duration,
}

impl TrelloSettings {
    pub fn new(app_key: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            app_key: app_key.into(),
            auth_token: auth_token.into(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(rename = "fullName", default)]
    pub full_name: String,
    #[serde(default)]
    pub username: String,
}

/// Trello REST client. Every request carries the application key and token.
pub struct TrelloClient {
    client: Client,
    settings: TrelloSettings,
    member: Member,
}

impl TrelloClient {
    /// Build the client and check the credentials against `/1/members/me`.
    pub async fn connect(settings: TrelloSettings) -> Result<Self> {
        if settings.app_key.trim().is_empty() || settings.auth_token.trim().is_empty() {
            return Err(SyncError::MissingConfigError {
                field: "trello.app_key / trello.auth_token".to_string(),
            });
        }

        let client = Client::builder().timeout(settings.timeout).build()?;
        let mut trello = Self {
            client,
            settings,
            member: Member::default(),
        };

        trello.member = trello
            .get_json::<Member>("members/me", &[])
            .await
            .map_err(|e| SyncError::AuthenticationError {
                message: format!("Perhaps your auth token has expired? ({})", e),
            })?;
        tracing::info!("Connected to Trello as {}", trello.member.full_name);

        Ok(trello)
    }

    pub fn member(&self) -> &Member {
        &self.member
    }

    fn url(&self, path: &str) -> String {
        format!("{}/1/{}", self.settings.api_base.trim_end_matches('/'), path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.query(&[
            ("key", self.settings.app_key.as_str()),
            ("token", self.settings.auth_token.as_str()),
        ])
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response> {
        let response = self.authorized(request).send().await?;
        tracing::debug!("Trello {} -> {}", path, response.status());

        if !response.status().is_success() {
            return Err(SyncError::BoardServiceError {
                status: response.status().as_u16(),
                endpoint: path.to_string(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let request = self.client.get(self.url(path)).query(query);
        let response = self.send(request, path).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl BoardService for TrelloClient {
    async fn find_board_by_name(&self, name: &str) -> Result<Option<Board>> {
        let boards: Vec<Board> = self
            .get_json("members/me/boards", &[("fields", "name")])
            .await?;
        Ok(boards.into_iter().find(|board| board.name == name))
    }

    async fn cards_for_board(&self, board: &Board) -> Result<Vec<Card>> {
        self.get_json(
            &format!("boards/{}/cards", board.id),
            &[("fields", "idShort,name")],
        )
        .await
    }

    async fn add_comment(&self, card: &Card, text: &str) -> Result<()> {
        let path = format!("cards/{}/actions/comments", card.id);
        let request = self.client.post(self.url(&path)).query(&[("text", text)]);
        self.send(request, &path).await?;
        Ok(())
    }

    async fn lists_for_board(&self, board: &Board) -> Result<Vec<BoardList>> {
        self.get_json(&format!("boards/{}/lists", board.id), &[("fields", "name")])
            .await
    }

    async fn move_card(&self, card: &Card, list: &BoardList) -> Result<()> {
        let path = format!("cards/{}", card.id);
        let request = self
            .client
            .put(self.url(&path))
            .query(&[("idList", list.id.as_str())]);
        self.send(request, &path).await?;
        Ok(())
    }
}

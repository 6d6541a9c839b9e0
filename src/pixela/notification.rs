// src/pixela/notification.rs

use super::{Call, Client, Envelope, PixelaError, Reply};

use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Parameters for `POST /v1/users/{username}/graphs/{graph_id}/notifications`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCreateInput {
    #[serde(skip)]
    pub graph_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remind_by: Option<String>,

    #[serde(rename = "channelID", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

/// Parameters for `PUT .../graphs/{graph_id}/notifications/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationUpdateInput {
    #[serde(skip)]
    pub graph_id: String,

    #[serde(skip)]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remind_by: Option<String>,

    #[serde(rename = "channelID", skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationDefinition {
    pub id: String,
    pub name: String,
    pub target: String,
    pub condition: String,
    pub threshold: String,
    pub remind_by: String,

    #[serde(rename = "channelID")]
    pub channel_id: String,
}

#[derive(Deserialize)]
struct NotificationList {
    #[serde(default)]
    notifications: Vec<NotificationDefinition>,
}

#[derive(Debug, Clone)]
pub struct Notifications {
    client: Client,
}

impl Notifications {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn notification_url(&self, graph_id: &str, tail: &str) -> String {
        self.client
            .user_url(&format!("/graphs/{}/notifications{}", graph_id, tail))
    }

    pub async fn create(&self, input: &NotificationCreateInput) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::POST, self.notification_url(&input.graph_id, "")).json(input)?;
        self.client.mutate(call).await
    }

    pub async fn get_all(&self, graph_id: &str) -> Result<Reply<Vec<NotificationDefinition>>, PixelaError> {
        let call = Call::new(Method::GET, self.notification_url(graph_id, ""));
        let reply: Reply<NotificationList> = self.client.query(call).await?;
        Ok(reply.map(|list| list.notifications))
    }

    pub async fn update(&self, input: &NotificationUpdateInput) -> Result<Envelope, PixelaError> {
        let url = self.notification_url(&input.graph_id, &format!("/{}", input.id));
        let call = Call::new(Method::PUT, url).json(input)?;
        self.client.mutate(call).await
    }

    pub async fn delete(&self, graph_id: &str, id: &str) -> Result<Envelope, PixelaError> {
        let url = self.notification_url(graph_id, &format!("/{}", id));
        self.client.mutate(Call::new(Method::DELETE, url)).await
    }
}

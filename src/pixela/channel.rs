// src/pixela/channel.rs

use super::{Call, Client, Envelope, PixelaError, Reply};

use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Type-specific settings of a channel. Only Slack exists today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
}

impl ChannelDetail {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.user_name.is_none() && self.channel_name.is_none()
    }
}

/// Parameters for `POST /v1/users/{username}/channels`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChannelCreateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ChannelDetail>,
}

/// Parameters for `PUT /v1/users/{username}/channels/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChannelUpdateInput {
    #[serde(skip)]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ChannelDetail>,
}

/// A channel as listed by the API; `detail` always carries all three keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelDefinition {
    pub id: String,
    pub name: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub detail: ListedDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListedDetail {
    pub url: String,
    pub user_name: String,
    pub channel_name: String,
}

#[derive(Deserialize)]
struct ChannelList {
    #[serde(default)]
    channels: Vec<ChannelDefinition>,
}

#[derive(Debug, Clone)]
pub struct Channels {
    client: Client,
}

impl Channels {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, input: &ChannelCreateInput) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::POST, self.client.user_url("/channels")).json(input)?;
        self.client.mutate(call).await
    }

    pub async fn get_all(&self) -> Result<Reply<Vec<ChannelDefinition>>, PixelaError> {
        let call = Call::new(Method::GET, self.client.user_url("/channels"));
        let reply: Reply<ChannelList> = self.client.query(call).await?;
        Ok(reply.map(|list| list.channels))
    }

    pub async fn update(&self, input: &ChannelUpdateInput) -> Result<Envelope, PixelaError> {
        let url = self.client.user_url(&format!("/channels/{}", input.id));
        let call = Call::new(Method::PUT, url).json(input)?;
        self.client.mutate(call).await
    }

    pub async fn delete(&self, id: &str) -> Result<Envelope, PixelaError> {
        let url = self.client.user_url(&format!("/channels/{}", id));
        self.client.mutate(Call::new(Method::DELETE, url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixela::tests::client_for;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn create_nests_slack_detail() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/users/pa/channels"))
            .and(body_json(serde_json::json!({
                "id": "ch1",
                "type": "slack",
                "detail": {"url": "https://hooks.slack.com/x", "userName": "bot"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"message":"Success.","isSuccess":true}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let input = ChannelCreateInput {
            id: Some("ch1".into()),
            name: None,
            kind: Some("slack".into()),
            detail: Some(ChannelDetail {
                url: Some("https://hooks.slack.com/x".into()),
                user_name: Some("bot".into()),
                channel_name: None,
            }),
        };
        let env = client_for(&server, 0).channels().create(&input).await.unwrap();

        assert!(env.is_success);
    }

    #[tokio::test]
    async fn get_all_fills_missing_detail_keys() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/users/pa/channels"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"channels":[{"id":"ch1","name":"alerts","type":"slack","detail":{"url":"u"}}]}"#,
            ))
            .mount(&server)
            .await;

        let reply = client_for(&server, 0).channels().get_all().await.unwrap();

        let Reply::Data(channels) = reply else {
            panic!("expected channel list");
        };
        assert_eq!(
            serde_json::to_string(&channels[0]).unwrap(),
            r#"{"id":"ch1","name":"alerts","type":"slack","detail":{"url":"u","userName":"","channelName":""}}"#
        );
    }
}

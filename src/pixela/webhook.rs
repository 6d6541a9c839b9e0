// src/pixela/webhook.rs

use super::{Call, Client, Envelope, Outcome, PixelaError, Reply};

use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Parameters for `POST /v1/users/{username}/webhooks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WebhookCreateInput {
    #[serde(rename = "graphID", skip_serializing_if = "Option::is_none")]
    pub graph_id: Option<String>,

    /// `increment`, `decrement`, `add`, `subtract` or `stopwatch`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
}

/// Answer to webhook creation: the envelope plus the new hash.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCreated {
    #[serde(default)]
    pub webhook_hash: String,

    #[serde(flatten)]
    pub envelope: Envelope,
}

impl Outcome for WebhookCreated {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookDefinition {
    #[serde(rename = "webhookHash")]
    pub webhook_hash: String,

    #[serde(rename = "graphId", alias = "graphID")]
    pub graph_id: String,

    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Deserialize)]
struct WebhookList {
    #[serde(default)]
    webhooks: Vec<WebhookDefinition>,
}

#[derive(Debug, Clone)]
pub struct Webhooks {
    client: Client,
}

impl Webhooks {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, input: &WebhookCreateInput) -> Result<WebhookCreated, PixelaError> {
        let call = Call::new(Method::POST, self.client.user_url("/webhooks")).json(input)?;
        self.client.mutate(call).await
    }

    pub async fn get_all(&self) -> Result<Reply<Vec<WebhookDefinition>>, PixelaError> {
        let call = Call::new(Method::GET, self.client.user_url("/webhooks"));
        let reply: Reply<WebhookList> = self.client.query(call).await?;
        Ok(reply.map(|list| list.webhooks))
    }

    /// The hash is the credential; no token is sent.
    pub async fn invoke(&self, hash: &str) -> Result<Envelope, PixelaError> {
        let url = self.client.user_url(&format!("/webhooks/{}", hash));
        self.client
            .mutate(Call::new(Method::POST, url).anonymous())
            .await
    }

    pub async fn delete(&self, hash: &str) -> Result<Envelope, PixelaError> {
        let url = self.client.user_url(&format!("/webhooks/{}", hash));
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
    async fn create_returns_hash_with_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/users/pa/webhooks"))
            .and(body_json(serde_json::json!({"graphID": "g1", "type": "increment"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"webhookHash":"abc","message":"Success.","isSuccess":true}"#,
            ))
            .mount(&server)
            .await;

        let input = WebhookCreateInput {
            graph_id: Some("g1".into()),
            kind: Some("increment".into()),
            quantity: None,
        };
        let created = client_for(&server, 0).webhooks().create(&input).await.unwrap();

        assert_eq!(
            serde_json::to_string(&created).unwrap(),
            r#"{"webhookHash":"abc","message":"Success.","isSuccess":true,"isRejected":false,"statusCode":200}"#
        );
    }

    #[tokio::test]
    async fn invoke_sends_no_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/users/pa/webhooks/abc"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"message":"Success.","isSuccess":true}"#,
            ))
            .mount(&server)
            .await;

        let env = client_for(&server, 0).webhooks().invoke("abc").await.unwrap();
        assert!(env.is_success);

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("X-USER-TOKEN").is_none());
    }

    #[test]
    fn definition_accepts_either_graph_id_spelling() {
        let upper: WebhookDefinition =
            serde_json::from_str(r#"{"webhookHash":"h","graphID":"g","type":"increment"}"#).unwrap();
        let lower: WebhookDefinition =
            serde_json::from_str(r#"{"webhookHash":"h","graphId":"g","type":"increment"}"#).unwrap();

        assert_eq!(upper, lower);
        assert_eq!(
            serde_json::to_string(&upper).unwrap(),
            r#"{"webhookHash":"h","graphId":"g","type":"increment"}"#
        );
    }
}

// src/pixela/pixel.rs

use super::{Call, Client, Envelope, PixelaError, Reply};

use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Parameters for `POST /v1/users/{username}/graphs/{graph_id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelCreateInput {
    #[serde(skip)]
    pub graph_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_data: Option<String>,
}

/// Parameters for `PUT /v1/users/{username}/graphs/{graph_id}/{date}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PixelUpdateInput {
    #[serde(skip)]
    pub graph_id: String,

    #[serde(skip)]
    pub date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_data: Option<String>,
}

/// Quantity registered on one date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quantity {
    pub quantity: String,
    pub optional_data: String,
}

#[derive(Debug, Clone)]
pub struct Pixels {
    client: Client,
}

impl Pixels {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn pixel_url(&self, graph_id: &str, tail: &str) -> String {
        self.client.user_url(&format!("/graphs/{}{}", graph_id, tail))
    }

    pub async fn create(&self, input: &PixelCreateInput) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::POST, self.pixel_url(&input.graph_id, "")).json(input)?;
        self.client.mutate(call).await
    }

    pub async fn increment(&self, graph_id: &str) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::PUT, self.pixel_url(graph_id, "/increment"));
        self.client.mutate(call).await
    }

    pub async fn decrement(&self, graph_id: &str) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::PUT, self.pixel_url(graph_id, "/decrement"));
        self.client.mutate(call).await
    }

    pub async fn get(&self, graph_id: &str, date: &str) -> Result<Reply<Quantity>, PixelaError> {
        let call = Call::new(Method::GET, self.pixel_url(graph_id, &format!("/{}", date)));
        self.client.query(call).await
    }

    pub async fn update(&self, input: &PixelUpdateInput) -> Result<Envelope, PixelaError> {
        let url = self.pixel_url(&input.graph_id, &format!("/{}", input.date));
        let call = Call::new(Method::PUT, url).json(input)?;
        self.client.mutate(call).await
    }

    pub async fn delete(&self, graph_id: &str, date: &str) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::DELETE, self.pixel_url(graph_id, &format!("/{}", date)));
        self.client.mutate(call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixela::tests::client_for;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn create_posts_exactly_the_given_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/users/pa/graphs/g1"))
            .and(body_json(serde_json::json!({"date": "20200101", "quantity": "5"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"message":"Success.","isSuccess":true}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let input = PixelCreateInput {
            graph_id: "g1".into(),
            date: Some("20200101".into()),
            quantity: Some("5".into()),
            optional_data: None,
        };
        let env = client_for(&server, 0).pixels().create(&input).await.unwrap();

        assert_eq!(env, Envelope::success("Success."));
    }

    #[tokio::test]
    async fn get_decodes_quantity() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/users/pa/graphs/g1/20200101"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"quantity":"5","optionalData":"OD"}"#),
            )
            .mount(&server)
            .await;

        let reply = client_for(&server, 0).pixels().get("g1", "20200101").await.unwrap();

        assert_eq!(
            reply,
            Reply::Data(Quantity {
                quantity: "5".into(),
                optional_data: "OD".into(),
            })
        );
    }

    #[tokio::test]
    async fn missing_pixel_is_a_failure_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string(
                r#"{"message":"Specified pixel not found.","isSuccess":false}"#,
            ))
            .mount(&server)
            .await;

        let reply = client_for(&server, 0).pixels().get("g1", "20200101").await.unwrap();

        assert_eq!(
            reply,
            Reply::Failure(Envelope::failure("Specified pixel not found.", 404))
        );
    }
}

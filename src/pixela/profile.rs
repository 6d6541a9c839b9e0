// src/pixela/profile.rs

use super::{Call, Client, Envelope, PixelaError};

use reqwest::Method;
use serde::Serialize;

/// Parameters for `PUT /@{username}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravatar_icon_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(rename = "aboutURL", skip_serializing_if = "Option::is_none")]
    pub about_url: Option<String>,

    #[serde(rename = "contributeURLs", skip_serializing_if = "Option::is_none")]
    pub contribute_urls: Option<Vec<String>>,

    #[serde(rename = "pinnedGraphID", skip_serializing_if = "Option::is_none")]
    pub pinned_graph_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Profile {
    client: Client,
}

impl Profile {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn update(&self, input: &ProfileUpdateInput) -> Result<Envelope, PixelaError> {
        let url = self.client.url(&format!("/@{}", self.client.username()));
        let call = Call::new(Method::PUT, url).json(input)?;
        self.client.mutate(call).await
    }

    /// Public profile page. No request is made.
    pub fn url(&self) -> String {
        self.client.url(&format!("/@{}", self.client.username()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixela::tests::client_for;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn update_targets_profile_path() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/@pa"))
            .and(body_json(serde_json::json!({
                "displayName": "display-name",
                "contributeURLs": ["https://example.com"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"message":"Success.","isSuccess":true}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let input = ProfileUpdateInput {
            display_name: Some("display-name".into()),
            contribute_urls: Some(vec!["https://example.com".into()]),
            ..ProfileUpdateInput::default()
        };
        let env = client_for(&server, 0).profile().update(&input).await.unwrap();

        assert!(env.is_success);
    }

    #[tokio::test]
    async fn url_points_at_profile_page() {
        let server = MockServer::start().await;
        let profile = client_for(&server, 0).profile();

        assert_eq!(profile.url(), format!("{}/@pa", server.uri()));
    }
}

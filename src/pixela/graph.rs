// src/pixela/graph.rs

use super::{Call, Client, Envelope, PixelaError, Reply};

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Parameters for `POST /v1/users/{username}/graphs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphCreateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// `int` or `float`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_sufficient: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_secret: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_optional_data: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_on_monday: Option<bool>,
}

/// Parameters for `PUT /v1/users/{username}/graphs/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphUpdateInput {
    #[serde(skip)]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(rename = "purgeCacheURLs", skip_serializing_if = "Option::is_none")]
    pub purge_cache_urls: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_sufficient: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_secret: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish_optional_data: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_on_monday: Option<bool>,
}

/// Query for the SVG rendering of a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphSvgInput {
    pub id: String,
    pub date: Option<String>,
    pub mode: Option<String>,
    pub appearance: Option<String>,
}

/// Graph detail page. Only the URL is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphUrlInput {
    pub id: String,
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelDatesInput {
    pub id: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub with_body: Option<bool>,
}

/// Body of `graph add` / `graph subtract`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphQuantityInput {
    #[serde(skip)]
    pub id: String,

    pub quantity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphDefinition {
    pub id: String,
    pub name: String,
    pub unit: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub color: String,
    pub timezone: String,

    #[serde(rename = "purgeCacheURLs")]
    pub purge_cache_urls: Option<Vec<String>>,

    pub self_sufficient: String,
    pub is_secret: bool,
    pub publish_optional_data: bool,
}

fn zero() -> Number {
    Number::from(0)
}

/// `GET .../graphs/{id}/stats`. Quantities are passed through unchanged so
/// int graphs print `5`, float graphs `5.25`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub total_pixels_count: u64,

    #[serde(default = "zero")]
    pub max_quantity: Number,

    #[serde(default)]
    pub max_date: String,

    #[serde(default = "zero")]
    pub min_quantity: Number,

    #[serde(default)]
    pub min_date: String,

    #[serde(default = "zero")]
    pub total_quantity: Number,

    #[serde(default = "zero")]
    pub avg_quantity: Number,

    #[serde(default = "zero")]
    pub todays_quantity: Number,

    #[serde(default = "zero")]
    pub yesterday_quantity: Number,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_pixels_count: 0,
            max_quantity: zero(),
            max_date: String::new(),
            min_quantity: zero(),
            min_date: String::new(),
            total_quantity: zero(),
            avg_quantity: zero(),
            todays_quantity: zero(),
            yesterday_quantity: zero(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PixelWithBody {
    pub date: String,
    pub quantity: String,
    pub optional_data: String,
}

/// Latest pixel of a graph.
pub type GraphPixel = PixelWithBody;

/// Dates only, or full pixels with `withBody=true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PixelDates {
    Dates(Vec<String>),
    WithBody(Vec<PixelWithBody>),
}

impl Default for PixelDates {
    fn default() -> Self {
        PixelDates::Dates(Vec::new())
    }
}

#[derive(Deserialize)]
struct GraphList {
    #[serde(default)]
    graphs: Vec<GraphDefinition>,
}

#[derive(Deserialize)]
struct PixelList {
    pixels: PixelDates,
}

#[derive(Debug, Clone)]
pub struct Graphs {
    client: Client,
}

impl Graphs {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    fn graph_url(&self, id: &str, tail: &str) -> String {
        self.client.user_url(&format!("/graphs/{}{}", id, tail))
    }

    pub async fn create(&self, input: &GraphCreateInput) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::POST, self.client.user_url("/graphs")).json(input)?;
        self.client.mutate(call).await
    }

    pub async fn get_all(&self) -> Result<Reply<Vec<GraphDefinition>>, PixelaError> {
        let call = Call::new(Method::GET, self.client.user_url("/graphs"));
        let reply: Reply<GraphList> = self.client.query(call).await?;
        Ok(reply.map(|list| list.graphs))
    }

    pub async fn get(&self, id: &str) -> Result<Reply<GraphDefinition>, PixelaError> {
        let call = Call::new(Method::GET, self.graph_url(id, "/graph-def"));
        self.client.query(call).await
    }

    pub async fn svg(&self, input: &GraphSvgInput) -> Result<String, PixelaError> {
        let call = Call::new(Method::GET, self.graph_url(&input.id, ""))
            .param("date", input.date.as_deref())
            .param("mode", input.mode.as_deref())
            .param("appearance", input.appearance.as_deref());
        self.client.text(call).await
    }

    /// Graph detail page. No request is made.
    pub fn url(&self, input: &GraphUrlInput) -> String {
        let url = self.graph_url(&input.id, ".html");
        match &input.mode {
            Some(mode) => format!("{}?mode={}", url, mode),
            None => url,
        }
    }

    pub async fn stats(&self, id: &str) -> Result<Reply<Stats>, PixelaError> {
        let call = Call::new(Method::GET, self.graph_url(id, "/stats"));
        self.client.query(call).await
    }

    pub async fn update(&self, input: &GraphUpdateInput) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::PUT, self.graph_url(&input.id, "")).json(input)?;
        self.client.mutate(call).await
    }

    pub async fn delete(&self, id: &str) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::DELETE, self.graph_url(id, ""));
        self.client.mutate(call).await
    }

    pub async fn pixel_dates(&self, input: &PixelDatesInput) -> Result<Reply<PixelDates>, PixelaError> {
        let with_body = input.with_body.map(|b| b.to_string());
        let call = Call::new(Method::GET, self.graph_url(&input.id, "/pixels"))
            .param("from", input.from.as_deref())
            .param("to", input.to.as_deref())
            .param("withBody", with_body.as_deref());
        let reply: Reply<PixelList> = self.client.query(call).await?;
        Ok(reply.map(|list| list.pixels))
    }

    pub async fn stopwatch(&self, id: &str) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::POST, self.graph_url(id, "/stopwatch"));
        self.client.mutate(call).await
    }

    pub async fn add(&self, input: &GraphQuantityInput) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::PUT, self.graph_url(&input.id, "/add")).json(input)?;
        self.client.mutate(call).await
    }

    pub async fn subtract(&self, input: &GraphQuantityInput) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::PUT, self.graph_url(&input.id, "/subtract")).json(input)?;
        self.client.mutate(call).await
    }

    pub async fn latest_pixel(&self, id: &str) -> Result<Reply<GraphPixel>, PixelaError> {
        let call = Call::new(Method::GET, self.graph_url(id, "/latest"));
        self.client.query(call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixela::tests::client_for;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn update_body_omits_path_id_and_absent_fields() {
        let input = GraphUpdateInput {
            id: "g1".into(),
            is_secret: Some(false),
            ..GraphUpdateInput::default()
        };

        assert_eq!(serde_json::to_string(&input).unwrap(), r#"{"isSecret":false}"#);
    }

    #[test]
    fn pixel_dates_decode_both_shapes() {
        let dates: PixelDates = serde_json::from_str(r#"["20200101"]"#).unwrap();
        assert_eq!(dates, PixelDates::Dates(vec!["20200101".into()]));

        let bodies: PixelDates =
            serde_json::from_str(r#"[{"date":"20200101","quantity":"5","optionalData":"OD"}]"#)
                .unwrap();
        assert_eq!(
            bodies,
            PixelDates::WithBody(vec![PixelWithBody {
                date: "20200101".into(),
                quantity: "5".into(),
                optional_data: "OD".into(),
            }])
        );
    }

    #[tokio::test]
    async fn get_all_unwraps_graph_list() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/users/pa/graphs"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"graphs":[{"id":"g1","name":"reading","unit":"pages","type":"int","color":"shibafu","timezone":"Asia/Tokyo","purgeCacheURLs":[],"selfSufficient":"none","isSecret":false,"publishOptionalData":false}]}"#,
            ))
            .mount(&server)
            .await;

        let reply = client_for(&server, 0).graphs().get_all().await.unwrap();

        match reply {
            Reply::Data(graphs) => {
                assert_eq!(graphs.len(), 1);
                assert_eq!(graphs[0].id, "g1");
                assert_eq!(graphs[0].kind, "int");
                assert_eq!(graphs[0].purge_cache_urls, Some(vec![]));
            }
            Reply::Failure(env) => panic!("unexpected failure: {:?}", env),
        }
    }

    #[tokio::test]
    async fn svg_passes_optional_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/users/pa/graphs/g1"))
            .and(query_param("mode", "badge"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<svg/>"))
            .expect(1)
            .mount(&server)
            .await;

        let input = GraphSvgInput {
            id: "g1".into(),
            mode: Some("badge".into()),
            ..GraphSvgInput::default()
        };
        let svg = client_for(&server, 0).graphs().svg(&input).await.unwrap();

        assert_eq!(svg, "<svg/>");
    }

    #[tokio::test]
    async fn add_puts_quantity() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/v1/users/pa/graphs/g1/add"))
            .and(body_json(serde_json::json!({"quantity": "3"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"message":"Success.","isSuccess":true}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let input = GraphQuantityInput {
            id: "g1".into(),
            quantity: "3".into(),
        };
        let env = client_for(&server, 0).graphs().add(&input).await.unwrap();

        assert!(env.is_success);
    }

    #[tokio::test]
    async fn url_appends_mode() {
        let server = MockServer::start().await;
        let graphs = client_for(&server, 0).graphs();

        let url = graphs.url(&GraphUrlInput {
            id: "g1".into(),
            mode: Some("simple".into()),
        });

        assert_eq!(url, format!("{}/v1/users/pa/graphs/g1.html?mode=simple", server.uri()));
    }
}

// src/pixela/user.rs

use super::{Call, Client, Envelope, PixelaError};

use reqwest::Method;
use serde::{Serialize, Serializer};

/// Parameters for `POST /v1/users`. Username and token come from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateInput {
    #[serde(serialize_with = "yes_no", skip_serializing_if = "Option::is_none")]
    pub agree_terms_of_service: Option<bool>,

    #[serde(serialize_with = "yes_no", skip_serializing_if = "Option::is_none")]
    pub not_minor: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thanks_code: Option<String>,
}

/// Parameters for `PUT /v1/users/{username}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thanks_code: Option<String>,
}

#[derive(Serialize)]
struct UserCreateBody<'a> {
    token: &'a str,
    username: &'a str,

    #[serde(flatten)]
    input: &'a UserCreateInput,
}

/// The API spells booleans of the sign-up form as "yes" / "no".
fn yes_no<S: Serializer>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(true) => serializer.serialize_str("yes"),
        Some(false) => serializer.serialize_str("no"),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone)]
pub struct Users {
    client: Client,
}

impl Users {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn create(&self, input: &UserCreateInput) -> Result<Envelope, PixelaError> {
        let body = UserCreateBody {
            token: self.client.token(),
            username: self.client.username(),
            input,
        };
        let call = Call::new(Method::POST, self.client.url("/v1/users"))
            .anonymous()
            .json(&body)?;
        self.client.mutate(call).await
    }

    pub async fn update(&self, input: &UserUpdateInput) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::PUT, self.client.user_url("")).json(input)?;
        self.client.mutate(call).await
    }

    pub async fn delete(&self) -> Result<Envelope, PixelaError> {
        let call = Call::new(Method::DELETE, self.client.user_url(""));
        self.client.mutate(call).await
    }
}

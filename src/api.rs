// src/api.rs

//! Capability traits over the Pixela client, one per resource family, and the
//! factory that hands them to command handlers.
//!
//! Handlers only ever see `dyn XxxApi`, so tests swap in fakes without an
//! HTTP server.

use crate::config::Settings;
use crate::pixela::{
    ChannelCreateInput, ChannelDefinition, ChannelUpdateInput, Channels, Client, Envelope,
    GraphCreateInput, GraphDefinition, GraphPixel, GraphQuantityInput, GraphSvgInput,
    GraphUpdateInput, GraphUrlInput, Graphs, NotificationCreateInput, NotificationDefinition,
    NotificationUpdateInput, Notifications, PixelCreateInput, PixelDates, PixelDatesInput,
    PixelUpdateInput, PixelaError, Pixels, Profile, ProfileUpdateInput, Quantity, Reply, Stats,
    UserCreateInput, UserUpdateInput, Users, WebhookCreateInput, WebhookCreated,
    WebhookDefinition, Webhooks,
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::{Arc, OnceLock};

pub type ApiResult<T> = std::result::Result<T, PixelaError>;

#[async_trait]
pub trait UserApi: Send + Sync {
    async fn create(&self, input: &UserCreateInput) -> ApiResult<Envelope>;
    async fn update(&self, input: &UserUpdateInput) -> ApiResult<Envelope>;
    async fn delete(&self) -> ApiResult<Envelope>;
}

#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn update(&self, input: &ProfileUpdateInput) -> ApiResult<Envelope>;
    fn url(&self) -> String;
}

#[async_trait]
pub trait GraphApi: Send + Sync {
    async fn create(&self, input: &GraphCreateInput) -> ApiResult<Envelope>;
    async fn get_all(&self) -> ApiResult<Reply<Vec<GraphDefinition>>>;
    async fn get(&self, id: &str) -> ApiResult<Reply<GraphDefinition>>;
    async fn svg(&self, input: &GraphSvgInput) -> ApiResult<String>;
    fn url(&self, input: &GraphUrlInput) -> String;
    async fn stats(&self, id: &str) -> ApiResult<Reply<Stats>>;
    async fn update(&self, input: &GraphUpdateInput) -> ApiResult<Envelope>;
    async fn delete(&self, id: &str) -> ApiResult<Envelope>;
    async fn pixel_dates(&self, input: &PixelDatesInput) -> ApiResult<Reply<PixelDates>>;
    async fn stopwatch(&self, id: &str) -> ApiResult<Envelope>;
    async fn add(&self, input: &GraphQuantityInput) -> ApiResult<Envelope>;
    async fn subtract(&self, input: &GraphQuantityInput) -> ApiResult<Envelope>;
    async fn latest_pixel(&self, id: &str) -> ApiResult<Reply<GraphPixel>>;
}

#[async_trait]
pub trait PixelApi: Send + Sync {
    async fn create(&self, input: &PixelCreateInput) -> ApiResult<Envelope>;
    async fn increment(&self, graph_id: &str) -> ApiResult<Envelope>;
    async fn decrement(&self, graph_id: &str) -> ApiResult<Envelope>;
    async fn get(&self, graph_id: &str, date: &str) -> ApiResult<Reply<Quantity>>;
    async fn update(&self, input: &PixelUpdateInput) -> ApiResult<Envelope>;
    async fn delete(&self, graph_id: &str, date: &str) -> ApiResult<Envelope>;
}

#[async_trait]
pub trait ChannelApi: Send + Sync {
    async fn create(&self, input: &ChannelCreateInput) -> ApiResult<Envelope>;
    async fn get_all(&self) -> ApiResult<Reply<Vec<ChannelDefinition>>>;
    async fn update(&self, input: &ChannelUpdateInput) -> ApiResult<Envelope>;
    async fn delete(&self, id: &str) -> ApiResult<Envelope>;
}

#[async_trait]
pub trait NotificationApi: Send + Sync {
    async fn create(&self, input: &NotificationCreateInput) -> ApiResult<Envelope>;
    async fn get_all(&self, graph_id: &str) -> ApiResult<Reply<Vec<NotificationDefinition>>>;
    async fn update(&self, input: &NotificationUpdateInput) -> ApiResult<Envelope>;
    async fn delete(&self, graph_id: &str, id: &str) -> ApiResult<Envelope>;
}

#[async_trait]
pub trait WebhookApi: Send + Sync {
    async fn create(&self, input: &WebhookCreateInput) -> ApiResult<WebhookCreated>;
    async fn get_all(&self) -> ApiResult<Reply<Vec<WebhookDefinition>>>;
    async fn invoke(&self, hash: &str) -> ApiResult<Envelope>;
    async fn delete(&self, hash: &str) -> ApiResult<Envelope>;
}

#[async_trait]
impl UserApi for Users {
    async fn create(&self, input: &UserCreateInput) -> ApiResult<Envelope> {
        Users::create(self, input).await
    }

    async fn update(&self, input: &UserUpdateInput) -> ApiResult<Envelope> {
        Users::update(self, input).await
    }

    async fn delete(&self) -> ApiResult<Envelope> {
        Users::delete(self).await
    }
}

#[async_trait]
impl ProfileApi for Profile {
    async fn update(&self, input: &ProfileUpdateInput) -> ApiResult<Envelope> {
        Profile::update(self, input).await
    }

    fn url(&self) -> String {
        Profile::url(self)
    }
}

#[async_trait]
impl GraphApi for Graphs {
    async fn create(&self, input: &GraphCreateInput) -> ApiResult<Envelope> {
        Graphs::create(self, input).await
    }

    async fn get_all(&self) -> ApiResult<Reply<Vec<GraphDefinition>>> {
        Graphs::get_all(self).await
    }

    async fn get(&self, id: &str) -> ApiResult<Reply<GraphDefinition>> {
        Graphs::get(self, id).await
    }

    async fn svg(&self, input: &GraphSvgInput) -> ApiResult<String> {
        Graphs::svg(self, input).await
    }

    fn url(&self, input: &GraphUrlInput) -> String {
        Graphs::url(self, input)
    }

    async fn stats(&self, id: &str) -> ApiResult<Reply<Stats>> {
        Graphs::stats(self, id).await
    }

    async fn update(&self, input: &GraphUpdateInput) -> ApiResult<Envelope> {
        Graphs::update(self, input).await
    }

    async fn delete(&self, id: &str) -> ApiResult<Envelope> {
        Graphs::delete(self, id).await
    }

    async fn pixel_dates(&self, input: &PixelDatesInput) -> ApiResult<Reply<PixelDates>> {
        Graphs::pixel_dates(self, input).await
    }

    async fn stopwatch(&self, id: &str) -> ApiResult<Envelope> {
        Graphs::stopwatch(self, id).await
    }

    async fn add(&self, input: &GraphQuantityInput) -> ApiResult<Envelope> {
        Graphs::add(self, input).await
    }

    async fn subtract(&self, input: &GraphQuantityInput) -> ApiResult<Envelope> {
        Graphs::subtract(self, input).await
    }

    async fn latest_pixel(&self, id: &str) -> ApiResult<Reply<GraphPixel>> {
        Graphs::latest_pixel(self, id).await
    }
}

#[async_trait]
impl PixelApi for Pixels {
    async fn create(&self, input: &PixelCreateInput) -> ApiResult<Envelope> {
        Pixels::create(self, input).await
    }

    async fn increment(&self, graph_id: &str) -> ApiResult<Envelope> {
        Pixels::increment(self, graph_id).await
    }

    async fn decrement(&self, graph_id: &str) -> ApiResult<Envelope> {
        Pixels::decrement(self, graph_id).await
    }

    async fn get(&self, graph_id: &str, date: &str) -> ApiResult<Reply<Quantity>> {
        Pixels::get(self, graph_id, date).await
    }

    async fn update(&self, input: &PixelUpdateInput) -> ApiResult<Envelope> {
        Pixels::update(self, input).await
    }

    async fn delete(&self, graph_id: &str, date: &str) -> ApiResult<Envelope> {
        Pixels::delete(self, graph_id, date).await
    }
}

#[async_trait]
impl ChannelApi for Channels {
    async fn create(&self, input: &ChannelCreateInput) -> ApiResult<Envelope> {
        Channels::create(self, input).await
    }

    async fn get_all(&self) -> ApiResult<Reply<Vec<ChannelDefinition>>> {
        Channels::get_all(self).await
    }

    async fn update(&self, input: &ChannelUpdateInput) -> ApiResult<Envelope> {
        Channels::update(self, input).await
    }

    async fn delete(&self, id: &str) -> ApiResult<Envelope> {
        Channels::delete(self, id).await
    }
}

#[async_trait]
impl NotificationApi for Notifications {
    async fn create(&self, input: &NotificationCreateInput) -> ApiResult<Envelope> {
        Notifications::create(self, input).await
    }

    async fn get_all(&self, graph_id: &str) -> ApiResult<Reply<Vec<NotificationDefinition>>> {
        Notifications::get_all(self, graph_id).await
    }

    async fn update(&self, input: &NotificationUpdateInput) -> ApiResult<Envelope> {
        Notifications::update(self, input).await
    }

    async fn delete(&self, graph_id: &str, id: &str) -> ApiResult<Envelope> {
        Notifications::delete(self, graph_id, id).await
    }
}

#[async_trait]
impl WebhookApi for Webhooks {
    async fn create(&self, input: &WebhookCreateInput) -> ApiResult<WebhookCreated> {
        Webhooks::create(self, input).await
    }

    async fn get_all(&self) -> ApiResult<Reply<Vec<WebhookDefinition>>> {
        Webhooks::get_all(self).await
    }

    async fn invoke(&self, hash: &str) -> ApiResult<Envelope> {
        Webhooks::invoke(self, hash).await
    }

    async fn delete(&self, hash: &str) -> ApiResult<Envelope> {
        Webhooks::delete(self, hash).await
    }
}

/// Substitutes installed in place of the real client.
#[derive(Default, Clone)]
struct Overrides {
    user: Option<Arc<dyn UserApi>>,
    profile: Option<Arc<dyn ProfileApi>>,
    graph: Option<Arc<dyn GraphApi>>,
    pixel: Option<Arc<dyn PixelApi>>,
    channel: Option<Arc<dyn ChannelApi>>,
    notification: Option<Arc<dyn NotificationApi>>,
    webhook: Option<Arc<dyn WebhookApi>>,
}

/// Builds the HTTP client on first use and hands out one capability per
/// resource family.
///
/// Commands that never touch the network (`completion`, delete without
/// `--delete-me`) never build a client.
pub struct ClientFactory {
    settings: Settings,
    client: OnceLock<Client>,
    overrides: Overrides,
}

impl ClientFactory {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            client: OnceLock::new(),
            overrides: Overrides::default(),
        }
    }

    fn client(&self) -> Result<&Client> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }

        let client = Client::new(&self.settings).context("failed to build HTTP client")?;
        tracing::debug!(base_url = %self.settings.base_url, "pixela client ready");

        Ok(self.client.get_or_init(|| client))
    }

    pub fn user(&self) -> Result<Arc<dyn UserApi>> {
        match &self.overrides.user {
            Some(api) => Ok(Arc::clone(api)),
            None => Ok(Arc::new(self.client()?.users())),
        }
    }

    pub fn profile(&self) -> Result<Arc<dyn ProfileApi>> {
        match &self.overrides.profile {
            Some(api) => Ok(Arc::clone(api)),
            None => Ok(Arc::new(self.client()?.profile())),
        }
    }

    pub fn graph(&self) -> Result<Arc<dyn GraphApi>> {
        match &self.overrides.graph {
            Some(api) => Ok(Arc::clone(api)),
            None => Ok(Arc::new(self.client()?.graphs())),
        }
    }

    pub fn pixel(&self) -> Result<Arc<dyn PixelApi>> {
        match &self.overrides.pixel {
            Some(api) => Ok(Arc::clone(api)),
            None => Ok(Arc::new(self.client()?.pixels())),
        }
    }

    pub fn channel(&self) -> Result<Arc<dyn ChannelApi>> {
        match &self.overrides.channel {
            Some(api) => Ok(Arc::clone(api)),
            None => Ok(Arc::new(self.client()?.channels())),
        }
    }

    pub fn notification(&self) -> Result<Arc<dyn NotificationApi>> {
        match &self.overrides.notification {
            Some(api) => Ok(Arc::clone(api)),
            None => Ok(Arc::new(self.client()?.notifications())),
        }
    }

    pub fn webhook(&self) -> Result<Arc<dyn WebhookApi>> {
        match &self.overrides.webhook {
            Some(api) => Ok(Arc::clone(api)),
            None => Ok(Arc::new(self.client()?.webhooks())),
        }
    }
}

#[cfg(test)]
impl ClientFactory {
    pub fn with_user(mut self, api: Arc<dyn UserApi>) -> Self {
        self.overrides.user = Some(api);
        self
    }

    pub fn with_graph(mut self, api: Arc<dyn GraphApi>) -> Self {
        self.overrides.graph = Some(api);
        self
    }

    pub fn with_pixel(mut self, api: Arc<dyn PixelApi>) -> Self {
        self.overrides.pixel = Some(api);
        self
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::*;
    use super::*;

    #[tokio::test]
    async fn injected_substitute_is_returned_instead_of_client() {
        let fake = Arc::new(EnvelopeFake::answering(Canned::Ok(Envelope::success("Success."))));
        let factory = ClientFactory::new(settings()).with_pixel(fake.clone());

        let env = factory.pixel().unwrap().increment("g1").await.unwrap();

        assert!(env.is_success);
        assert_eq!(fake.calls(), vec!["increment g1".to_string()]);
        assert!(factory.client.get().is_none());
    }

    #[test]
    fn client_is_built_once_and_reused() {
        let factory = ClientFactory::new(settings());

        factory.graph().unwrap();
        let first = factory.client().unwrap() as *const Client;
        factory.webhook().unwrap();
        let second = factory.client().unwrap() as *const Client;

        assert_eq!(first, second);
    }
}

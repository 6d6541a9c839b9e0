// src/commands/webhook.rs

use crate::api::{ClientFactory, WebhookApi};
use crate::cli::{WebhookCommand, WebhookCreateArgs};
use crate::pixela::{WebhookCreateInput, WebhookDefinition};
use crate::render::{emit_outcome, emit_reply};
use crate::util::string_field;

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct WebhookList {
    webhooks: Vec<WebhookDefinition>,
}

pub async fn run(cmd: WebhookCommand, factory: &ClientFactory, out: &mut dyn Write) -> Result<()> {
    let api = factory.webhook()?;
    let api = api.as_ref();

    match cmd {
        WebhookCommand::Create(args) => create(&args, api, out).await,
        WebhookCommand::Get => get_all(api, out).await,
        WebhookCommand::Invoke(args) => invoke(&args.hash, api, out).await,
        WebhookCommand::Delete(args) => delete(&args.hash, api, out).await,
    }
}

pub fn create_input(args: &WebhookCreateArgs) -> WebhookCreateInput {
    WebhookCreateInput {
        graph_id: string_field(&args.graph_id),
        kind: string_field(&args.kind),
        quantity: string_field(&args.quantity),
    }
}

async fn create(args: &WebhookCreateArgs, api: &dyn WebhookApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .create(&create_input(args))
        .await
        .context("webhook create failed")?;
    emit_outcome(out, &result, "webhook create")
}

async fn get_all(api: &dyn WebhookApi, out: &mut dyn Write) -> Result<()> {
    let reply = api.get_all().await.context("webhook get all failed")?;
    emit_reply(out, reply.map(|webhooks| WebhookList { webhooks }), "webhook get all")
}

async fn invoke(hash: &str, api: &dyn WebhookApi, out: &mut dyn Write) -> Result<()> {
    let result = api.invoke(hash).await.context("webhook invoke failed")?;
    emit_outcome(out, &result, "webhook invoke")
}

async fn delete(hash: &str, api: &dyn WebhookApi, out: &mut dyn Write) -> Result<()> {
    let result = api.delete(hash).await.context("webhook delete failed")?;
    emit_outcome(out, &result, "webhook delete")
}

// src/commands/channel.rs

use crate::api::{ChannelApi, ClientFactory};
use crate::cli::{ChannelCommand, ChannelCreateArgs, ChannelFields, ChannelUpdateArgs};
use crate::pixela::{ChannelCreateInput, ChannelDefinition, ChannelDetail, ChannelUpdateInput};
use crate::render::{emit_outcome, emit_reply};
use crate::util::string_field;

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ChannelList {
    channels: Vec<ChannelDefinition>,
}

pub async fn run(cmd: ChannelCommand, factory: &ClientFactory, out: &mut dyn Write) -> Result<()> {
    let api = factory.channel()?;
    let api = api.as_ref();

    match cmd {
        ChannelCommand::Create(args) => create(&args, api, out).await,
        ChannelCommand::Get => get_all(api, out).await,
        ChannelCommand::Update(args) => update(&args, api, out).await,
        ChannelCommand::Delete(args) => delete(&args.id, api, out).await,
    }
}

/// Slack settings nest under `detail`; no Slack flag means no `detail`.
fn detail(fields: &ChannelFields) -> Option<ChannelDetail> {
    let detail = ChannelDetail {
        url: string_field(&fields.slack_url),
        user_name: string_field(&fields.slack_user_name),
        channel_name: string_field(&fields.slack_channel_name),
    };

    (!detail.is_empty()).then_some(detail)
}

pub fn create_input(args: &ChannelCreateArgs) -> ChannelCreateInput {
    ChannelCreateInput {
        id: string_field(&args.id),
        name: string_field(&args.fields.name),
        kind: string_field(&args.fields.kind),
        detail: detail(&args.fields),
    }
}

pub fn update_input(args: &ChannelUpdateArgs) -> ChannelUpdateInput {
    ChannelUpdateInput {
        id: args.id.clone(),
        name: string_field(&args.fields.name),
        kind: string_field(&args.fields.kind),
        detail: detail(&args.fields),
    }
}

async fn create(args: &ChannelCreateArgs, api: &dyn ChannelApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .create(&create_input(args))
        .await
        .context("channel create failed")?;
    emit_outcome(out, &result, "channel create")
}

async fn get_all(api: &dyn ChannelApi, out: &mut dyn Write) -> Result<()> {
    let reply = api.get_all().await.context("channel get all failed")?;
    emit_reply(out, reply.map(|channels| ChannelList { channels }), "channel get all")
}

async fn update(args: &ChannelUpdateArgs, api: &dyn ChannelApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .update(&update_input(args))
        .await
        .context("channel update failed")?;
    emit_outcome(out, &result, "channel update")
}

async fn delete(id: &str, api: &dyn ChannelApi, out: &mut dyn Write) -> Result<()> {
    let result = api.delete(id).await.context("channel delete failed")?;
    emit_outcome(out, &result, "channel delete")
}

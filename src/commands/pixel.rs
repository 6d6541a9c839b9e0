// src/commands/pixel.rs

use crate::api::{ClientFactory, PixelApi};
use crate::cli::{PixelCommand, PixelCreateArgs, PixelUpdateArgs};
use crate::pixela::{PixelCreateInput, PixelUpdateInput};
use crate::render::{emit_outcome, emit_reply};
use crate::util::string_field;

use anyhow::{Context, Result};
use std::io::Write;

pub async fn run(cmd: PixelCommand, factory: &ClientFactory, out: &mut dyn Write) -> Result<()> {
    let api = factory.pixel()?;
    let api = api.as_ref();

    match cmd {
        PixelCommand::Create(args) => create(&args, api, out).await,
        PixelCommand::Increment(args) => increment(&args.graph_id, api, out).await,
        PixelCommand::Decrement(args) => decrement(&args.graph_id, api, out).await,
        PixelCommand::Get(args) => get(&args.graph_id, &args.date, api, out).await,
        PixelCommand::Update(args) => update(&args, api, out).await,
        PixelCommand::Delete(args) => delete(&args.graph_id, &args.date, api, out).await,
    }
}

pub fn create_input(args: &PixelCreateArgs) -> PixelCreateInput {
    PixelCreateInput {
        graph_id: args.graph_id.clone(),
        date: string_field(&args.date),
        quantity: string_field(&args.quantity),
        optional_data: string_field(&args.optional_data),
    }
}

pub fn update_input(args: &PixelUpdateArgs) -> PixelUpdateInput {
    PixelUpdateInput {
        graph_id: args.graph_id.clone(),
        date: args.date.clone(),
        quantity: string_field(&args.quantity),
        optional_data: string_field(&args.optional_data),
    }
}

async fn create(args: &PixelCreateArgs, api: &dyn PixelApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .create(&create_input(args))
        .await
        .context("pixel create failed")?;
    emit_outcome(out, &result, "pixel create")
}

async fn increment(graph_id: &str, api: &dyn PixelApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .increment(graph_id)
        .await
        .context("pixel increment failed")?;
    emit_outcome(out, &result, "pixel increment")
}

async fn decrement(graph_id: &str, api: &dyn PixelApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .decrement(graph_id)
        .await
        .context("pixel decrement failed")?;
    emit_outcome(out, &result, "pixel decrement")
}

async fn get(graph_id: &str, date: &str, api: &dyn PixelApi, out: &mut dyn Write) -> Result<()> {
    let reply = api.get(graph_id, date).await.context("pixel get failed")?;
    emit_reply(out, reply, "pixel get")
}

async fn update(args: &PixelUpdateArgs, api: &dyn PixelApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .update(&update_input(args))
        .await
        .context("pixel update failed")?;
    emit_outcome(out, &result, "pixel update")
}

async fn delete(graph_id: &str, date: &str, api: &dyn PixelApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .delete(graph_id, date)
        .await
        .context("pixel delete failed")?;
    emit_outcome(out, &result, "pixel delete")
}

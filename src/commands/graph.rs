// src/commands/graph.rs

use super::confirmed;
use crate::api::{ClientFactory, GraphApi};
use crate::cli::{
    GraphCommand, GraphCreateArgs, GraphDetailArgs, GraphPixelsArgs, GraphQuantityArgs,
    GraphSvgArgs, GraphUpdateArgs,
};
use crate::error::Failure;
use crate::pixela::{
    GraphCreateInput, GraphDefinition, GraphQuantityInput, GraphSvgInput, GraphUpdateInput,
    GraphUrlInput, PixelDates, PixelDatesInput,
};
use crate::render::{embedded_error, emit_outcome, emit_reply, emit_text};
use crate::util::{bool_field, list_field, opposing_pair, string_field};

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct GraphList {
    graphs: Vec<GraphDefinition>,
}

#[derive(Serialize)]
struct PixelList {
    pixels: PixelDates,
}

pub async fn run(cmd: GraphCommand, factory: &ClientFactory, out: &mut dyn Write) -> Result<()> {
    if let GraphCommand::Delete(args) = &cmd {
        if !confirmed(&args.confirm, out)? {
            return Ok(());
        }
    }

    let api = factory.graph()?;
    let api = api.as_ref();

    match cmd {
        GraphCommand::Create(args) => create(&args, api, out).await,
        GraphCommand::GetAll => get_all(api, out).await,
        GraphCommand::Get(args) => get(&args.id, api, out).await,
        GraphCommand::Svg(args) => svg(&args, api, out).await,
        GraphCommand::Detail(args) => emit_text(out, &api.url(&url_input(&args))),
        GraphCommand::Stats(args) => stats(&args.id, api, out).await,
        GraphCommand::Update(args) => update(&args, api, out).await,
        GraphCommand::Delete(args) => delete(&args.id, api, out).await,
        GraphCommand::Pixels(args) => pixels(&args, api, out).await,
        GraphCommand::Stopwatch(args) => stopwatch(&args.id, api, out).await,
        GraphCommand::Add(args) => add(&args, api, out).await,
        GraphCommand::Subtract(args) => subtract(&args, api, out).await,
        GraphCommand::GetLatestPixel(args) => latest_pixel(&args.id, api, out).await,
    }
}

// ---------------------------------------------------------------------------
// builders
// ---------------------------------------------------------------------------

pub fn create_input(args: &GraphCreateArgs) -> GraphCreateInput {
    GraphCreateInput {
        id: string_field(&args.id),
        name: string_field(&args.name),
        unit: string_field(&args.unit),
        kind: string_field(&args.kind),
        color: string_field(&args.color),
        timezone: string_field(&args.timezone),
        self_sufficient: string_field(&args.self_sufficient),
        is_secret: bool_field(args.secret),
        publish_optional_data: bool_field(args.publish_optional_data),
        start_on_monday: bool_field(args.start_on_monday),
    }
}

pub fn update_input(args: &GraphUpdateArgs) -> GraphUpdateInput {
    GraphUpdateInput {
        id: args.id.clone(),
        name: string_field(&args.name),
        unit: string_field(&args.unit),
        color: string_field(&args.color),
        timezone: string_field(&args.timezone),
        purge_cache_urls: list_field(&args.purge_cache_urls),
        self_sufficient: string_field(&args.self_sufficient),
        is_secret: opposing_pair(args.secret, args.publish),
        publish_optional_data: opposing_pair(args.publish_optional_data, args.hide_optional_data),
        start_on_monday: bool_field(args.start_on_monday),
    }
}

pub fn svg_input(args: &GraphSvgArgs) -> GraphSvgInput {
    GraphSvgInput {
        id: args.id.clone(),
        date: string_field(&args.date),
        mode: string_field(&args.mode),
        appearance: string_field(&args.appearance),
    }
}

pub fn url_input(args: &GraphDetailArgs) -> GraphUrlInput {
    GraphUrlInput {
        id: args.id.clone(),
        mode: string_field(&args.mode),
    }
}

pub fn pixels_input(args: &GraphPixelsArgs) -> PixelDatesInput {
    PixelDatesInput {
        id: args.id.clone(),
        from: string_field(&args.from),
        to: string_field(&args.to),
        with_body: bool_field(args.with_body),
    }
}

pub fn quantity_input(args: &GraphQuantityArgs) -> GraphQuantityInput {
    GraphQuantityInput {
        id: args.id.clone(),
        quantity: args.quantity.clone(),
    }
}

// ---------------------------------------------------------------------------
// handlers
// ---------------------------------------------------------------------------

async fn create(args: &GraphCreateArgs, api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .create(&create_input(args))
        .await
        .context("graph create failed")?;
    emit_outcome(out, &result, "graph create")
}

async fn get_all(api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    let reply = api.get_all().await.context("graph get all failed")?;
    emit_reply(out, reply.map(|graphs| GraphList { graphs }), "graph get all")
}

async fn get(id: &str, api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    let reply = api.get(id).await.context("graph get failed")?;
    emit_reply(out, reply, "graph get")
}

/// Prints the SVG as is. On failure the API's JSON error body is pulled out
/// of the error text and printed like any other failed answer.
async fn svg(args: &GraphSvgArgs, api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    match api.svg(&svg_input(args)).await {
        Ok(svg) => emit_text(out, &svg),
        Err(err) => {
            let text = err.to_string();
            match embedded_error(&text) {
                Some(body) => {
                    emit_text(out, body)?;
                    Err(Failure::AlreadyReported.into())
                }
                None => Err(anyhow::Error::new(err).context("graph svg failed")),
            }
        }
    }
}

async fn stats(id: &str, api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    let reply = api.stats(id).await.context("graph stats failed")?;
    emit_reply(out, reply, "graph stats")
}

async fn update(args: &GraphUpdateArgs, api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .update(&update_input(args))
        .await
        .context("graph update failed")?;
    emit_outcome(out, &result, "graph update")
}

async fn delete(id: &str, api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    let result = api.delete(id).await.context("graph delete failed")?;
    emit_outcome(out, &result, "graph delete")
}

async fn pixels(args: &GraphPixelsArgs, api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    let reply = api
        .pixel_dates(&pixels_input(args))
        .await
        .context("graph get pixel dates failed")?;
    emit_reply(out, reply.map(|pixels| PixelList { pixels }), "graph get pixel dates")
}

async fn stopwatch(id: &str, api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    let result = api.stopwatch(id).await.context("graph stopwatch failed")?;
    emit_outcome(out, &result, "graph stopwatch")
}

async fn add(args: &GraphQuantityArgs, api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .add(&quantity_input(args))
        .await
        .context("graph add failed")?;
    emit_outcome(out, &result, "graph add")
}

async fn subtract(args: &GraphQuantityArgs, api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .subtract(&quantity_input(args))
        .await
        .context("graph subtract failed")?;
    emit_outcome(out, &result, "graph subtract")
}

async fn latest_pixel(id: &str, api: &dyn GraphApi, out: &mut dyn Write) -> Result<()> {
    let reply = api
        .latest_pixel(id)
        .await
        .context("graph get latest pixel failed")?;
    emit_reply(out, reply, "graph get latest pixel")
}

// src/commands/profile.rs

use crate::api::{ClientFactory, ProfileApi};
use crate::cli::{ProfileCommand, ProfileUpdateArgs};
use crate::pixela::ProfileUpdateInput;
use crate::render::{emit_outcome, emit_text};
use crate::util::{list_field, string_field};

use anyhow::{Context, Result};
use std::io::Write;

pub async fn run(cmd: ProfileCommand, factory: &ClientFactory, out: &mut dyn Write) -> Result<()> {
    let api = factory.profile()?;

    match cmd {
        ProfileCommand::Update(args) => update(&args, api.as_ref(), out).await,
        ProfileCommand::Get => emit_text(out, &api.url()),
    }
}

pub fn update_input(args: &ProfileUpdateArgs) -> ProfileUpdateInput {
    ProfileUpdateInput {
        display_name: string_field(&args.display_name),
        gravatar_icon_email: string_field(&args.gravatar_icon_email),
        title: string_field(&args.title),
        timezone: string_field(&args.timezone),
        about_url: string_field(&args.about_url),
        contribute_urls: list_field(&args.contribute_urls),
        pinned_graph_id: string_field(&args.pinned_graph_id),
    }
}

async fn update(args: &ProfileUpdateArgs, api: &dyn ProfileApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .update(&update_input(args))
        .await
        .context("user profile update failed")?;
    emit_outcome(out, &result, "user profile update")
}

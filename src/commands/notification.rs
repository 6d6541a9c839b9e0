// src/commands/notification.rs

use crate::api::{ClientFactory, NotificationApi};
use crate::cli::{NotificationCommand, NotificationCreateArgs, NotificationUpdateArgs};
use crate::pixela::{NotificationCreateInput, NotificationDefinition, NotificationUpdateInput};
use crate::render::{emit_outcome, emit_reply};
use crate::util::string_field;

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct NotificationList {
    notifications: Vec<NotificationDefinition>,
}

pub async fn run(
    cmd: NotificationCommand,
    factory: &ClientFactory,
    out: &mut dyn Write,
) -> Result<()> {
    let api = factory.notification()?;
    let api = api.as_ref();

    match cmd {
        NotificationCommand::Create(args) => create(&args, api, out).await,
        NotificationCommand::Get(args) => get_all(&args.graph_id, api, out).await,
        NotificationCommand::Update(args) => update(&args, api, out).await,
        NotificationCommand::Delete(args) => delete(&args.graph_id, &args.id, api, out).await,
    }
}

pub fn create_input(args: &NotificationCreateArgs) -> NotificationCreateInput {
    let fields = &args.fields;

    NotificationCreateInput {
        graph_id: args.graph_id.clone(),
        id: string_field(&args.id),
        name: string_field(&fields.name),
        target: string_field(&fields.target),
        condition: string_field(&fields.condition),
        threshold: string_field(&fields.threshold),
        remind_by: string_field(&fields.remind_by),
        channel_id: string_field(&fields.channel_id),
    }
}

pub fn update_input(args: &NotificationUpdateArgs) -> NotificationUpdateInput {
    let fields = &args.fields;

    NotificationUpdateInput {
        graph_id: args.graph_id.clone(),
        id: args.id.clone(),
        name: string_field(&fields.name),
        target: string_field(&fields.target),
        condition: string_field(&fields.condition),
        threshold: string_field(&fields.threshold),
        remind_by: string_field(&fields.remind_by),
        channel_id: string_field(&fields.channel_id),
    }
}

async fn create(
    args: &NotificationCreateArgs,
    api: &dyn NotificationApi,
    out: &mut dyn Write,
) -> Result<()> {
    let result = api
        .create(&create_input(args))
        .await
        .context("notification create failed")?;
    emit_outcome(out, &result, "notification create")
}

async fn get_all(graph_id: &str, api: &dyn NotificationApi, out: &mut dyn Write) -> Result<()> {
    let reply = api
        .get_all(graph_id)
        .await
        .context("notification get all failed")?;
    emit_reply(
        out,
        reply.map(|notifications| NotificationList { notifications }),
        "notification get all",
    )
}

async fn update(
    args: &NotificationUpdateArgs,
    api: &dyn NotificationApi,
    out: &mut dyn Write,
) -> Result<()> {
    let result = api
        .update(&update_input(args))
        .await
        .context("notification update failed")?;
    emit_outcome(out, &result, "notification update")
}

async fn delete(
    graph_id: &str,
    id: &str,
    api: &dyn NotificationApi,
    out: &mut dyn Write,
) -> Result<()> {
    let result = api
        .delete(graph_id, id)
        .await
        .context("notification delete failed")?;
    emit_outcome(out, &result, "notification delete")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::NotificationFields;
    use crate::commands::testing::*;
    use crate::error::is_reported;
    use crate::pixela::Reply;

    #[test]
    fn create_input_maps_flags() {
        let args = NotificationCreateArgs {
            graph_id: "graph-id".into(),
            id: Some("notification-id".into()),
            fields: NotificationFields {
                name: Some("notification-name".into()),
                target: Some("quantity".into()),
                condition: Some(">".into()),
                threshold: Some("3".into()),
                remind_by: None,
                channel_id: Some("channel-id".into()),
            },
        };

        assert_eq!(
            serde_json::to_string(&create_input(&args)).unwrap(),
            r#"{"id":"notification-id","name":"notification-name","target":"quantity","condition":">","threshold":"3","channelID":"channel-id"}"#
        );
    }

    #[test]
    fn update_input_keeps_ids_for_the_path() {
        let input = update_input(&NotificationUpdateArgs {
            graph_id: "graph-id".into(),
            id: "notification-id".into(),
            fields: NotificationFields::default(),
        });

        assert_eq!(input.graph_id, "graph-id");
        assert_eq!(input.id, "notification-id");
        assert_eq!(serde_json::to_string(&input).unwrap(), "{}");
    }

    #[tokio::test]
    async fn get_all_prints_condition_raw() {
        let api = success();
        let mut out = Vec::new();

        get_all("graph-id", &api, &mut out).await.unwrap();

        assert_eq!(
            printed(out),
            concat!(
                r#"{"notifications":[{"id":"notification-id","name":"notification-name","#,
                r#""target":"quantity","condition":">","threshold":"1","remindBy":"23","#,
                r#""channelID":"channel-id"}]}"#,
                "\n"
            )
        );
    }

    #[tokio::test]
    async fn delete_failure_is_reported() {
        let api = failure();
        let mut out = Vec::new();

        let err = delete("graph-id", "notification-id", &api, &mut out)
            .await
            .unwrap_err();

        assert!(is_reported(&err));
        assert_eq!(printed(out), FAILURE_LINE);
    }

    #[tokio::test]
    async fn create_transport_error_has_prefix() {
        let api = transport();
        let mut out = Vec::new();

        let err = create(&NotificationCreateArgs::default(), &api, &mut out)
            .await
            .unwrap_err();

        assert!(message(&err).starts_with("notification create failed:"));
        assert!(out.is_empty());
    }

    #[test]
    fn listed_text_survives_a_round_trip() {
        let notifications = vec![NotificationDefinition {
            id: "notification-id".into(),
            name: r"a\u003cb".into(),
            condition: ">".into(),
            ..NotificationDefinition::default()
        }];
        let mut out = Vec::new();

        emit_reply(
            &mut out,
            Reply::Data(NotificationList { notifications }),
            "notification get all",
        )
        .unwrap();

        let line = printed(out);
        assert!(line.contains(r#""condition":">""#), "{}", line);

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["notifications"][0]["name"], r"a\u003cb");
        assert_eq!(parsed["notifications"][0]["condition"], ">");
    }

    #[tokio::test]
    async fn every_handler_prints_or_reports_each_outcome() {
        assert_outcomes!("notification create failed", Expected::envelope_fake, |api, out| {
            create(&NotificationCreateArgs::default(), &api, &mut out)
        });
        assert_outcomes!("notification get all failed", Expected::envelope_fake, |api, out| {
            get_all("graph-id", &api, &mut out)
        });
        assert_outcomes!("notification update failed", Expected::envelope_fake, |api, out| {
            update(&NotificationUpdateArgs::default(), &api, &mut out)
        });
        assert_outcomes!("notification delete failed", Expected::envelope_fake, |api, out| {
            delete("graph-id", "notification-id", &api, &mut out)
        });
    }
}

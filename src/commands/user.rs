// src/commands/user.rs

use super::confirmed;
use crate::api::{ClientFactory, UserApi};
use crate::cli::{UserCommand, UserCreateArgs, UserUpdateArgs};
use crate::pixela::{UserCreateInput, UserUpdateInput};
use crate::render::emit_outcome;
use crate::util::{bool_field, string_field};

use anyhow::{Context, Result};
use std::io::Write;

pub async fn run(cmd: UserCommand, factory: &ClientFactory, out: &mut dyn Write) -> Result<()> {
    match cmd {
        UserCommand::Create(args) => create(&args, factory.user()?.as_ref(), out).await,
        UserCommand::Update(args) => update(&args, factory.user()?.as_ref(), out).await,
        UserCommand::Delete(confirm) => {
            if !confirmed(&confirm, out)? {
                return Ok(());
            }
            delete(factory.user()?.as_ref(), out).await
        }
    }
}

pub fn create_input(args: &UserCreateArgs) -> UserCreateInput {
    UserCreateInput {
        agree_terms_of_service: bool_field(args.agree_terms_of_service),
        not_minor: bool_field(args.not_minor),
        thanks_code: string_field(&args.thanks_code),
    }
}

pub fn update_input(args: &UserUpdateArgs) -> UserUpdateInput {
    UserUpdateInput {
        new_token: string_field(&args.new_token),
        thanks_code: string_field(&args.thanks_code),
    }
}

async fn create(args: &UserCreateArgs, api: &dyn UserApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .create(&create_input(args))
        .await
        .context("user create failed")?;
    emit_outcome(out, &result, "user create")
}

async fn update(args: &UserUpdateArgs, api: &dyn UserApi, out: &mut dyn Write) -> Result<()> {
    let result = api
        .update(&update_input(args))
        .await
        .context("user update failed")?;
    emit_outcome(out, &result, "user update")
}

async fn delete(api: &dyn UserApi, out: &mut dyn Write) -> Result<()> {
    let result = api.delete().await.context("user delete failed")?;
    emit_outcome(out, &result, "user delete")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::DeleteArgs;
    use crate::commands::testing::*;
    use crate::error::is_reported;
    use std::sync::Arc;

    #[test]
    fn create_input_leaves_unset_flags_absent() {
        let input = create_input(&UserCreateArgs::default());
        assert_eq!(input, UserCreateInput::default());

        let input = create_input(&UserCreateArgs {
            agree_terms_of_service: true,
            not_minor: true,
            thanks_code: Some("ThisIsThanksCode".into()),
        });
        assert_eq!(input.agree_terms_of_service, Some(true));
        assert_eq!(input.not_minor, Some(true));
        assert_eq!(input.thanks_code.as_deref(), Some("ThisIsThanksCode"));
    }

    #[test]
    fn update_input_treats_empty_strings_as_unset() {
        let input = update_input(&UserUpdateArgs {
            new_token: Some(String::new()),
            thanks_code: None,
        });
        assert_eq!(input, UserUpdateInput::default());
    }

    #[tokio::test]
    async fn create_prints_envelope() {
        let api = success();
        let mut out = Vec::new();

        create(&UserCreateArgs::default(), &api, &mut out).await.unwrap();

        assert_eq!(printed(out), SUCCESS_LINE);
        assert_eq!(api.calls(), vec!["create {}".to_string()]);
    }

    #[tokio::test]
    async fn logical_failure_is_printed_and_reported() {
        let api = failure();
        let mut out = Vec::new();

        let err = update(&UserUpdateArgs::default(), &api, &mut out)
            .await
            .unwrap_err();

        assert!(is_reported(&err));
        assert_eq!(printed(out), FAILURE_LINE);
    }

    #[tokio::test]
    async fn transport_failure_carries_prefix_and_prints_nothing() {
        let api = transport();
        let mut out = Vec::new();

        let err = delete(&api, &mut out).await.unwrap_err();

        assert!(!is_reported(&err));
        assert!(message(&err).starts_with("user delete failed:"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn every_handler_prints_or_reports_each_outcome() {
        assert_outcomes!("user create failed", Expected::envelope_fake, |api, out| {
            create(&UserCreateArgs::default(), &api, &mut out)
        });
        assert_outcomes!("user update failed", Expected::envelope_fake, |api, out| {
            update(&UserUpdateArgs::default(), &api, &mut out)
        });
        assert_outcomes!("user delete failed", Expected::envelope_fake, |api, out| {
            delete(&api, &mut out)
        });
    }

    #[tokio::test]
    async fn confirmed_delete_goes_through_the_factory() {
        let api = Arc::new(success());
        let factory = ClientFactory::new(crate::api::fakes::settings()).with_user(api.clone());
        let mut out = Vec::new();

        run(
            UserCommand::Delete(DeleteArgs { delete_me: true }),
            &factory,
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(printed(out), SUCCESS_LINE);
        assert_eq!(api.calls(), vec!["delete".to_string()]);
    }
}

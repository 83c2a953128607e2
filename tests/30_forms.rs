mod common;

use anyhow::Result;
use std::time::Duration;

use livease_admin::api::endpoints;
use livease_admin::models::EntityKind;
use livease_admin::views::forms::{INVALID_EMAIL, TENANT_FORM};
use livease_admin::views::{FormModal, ListView, ModalState, SubmitError};

fn fill(modal: &mut FormModal, email: &str) {
    modal.set("name", "Asha Rao");
    modal.set("email", email);
    modal.set("number", "9845012345");
    modal.set("location", "Pune");
    modal.set("password", "hunter22");
}

#[tokio::test]
async fn created_tenant_appears_after_refresh() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let gw = backend.signed_in();
    let mut view = ListView::new(&gw, EntityKind::Tenant, 10);
    view.load(1).await;

    let mut modal = FormModal::new(&TENANT_FORM).with_success_delay(Duration::from_millis(20));
    modal.open();
    fill(&mut modal, "asha@mail.com");

    let list = &mut view;
    let response = modal
        .submit(
            |payload| endpoints::add_user(&gw, payload),
            move || async move {
                list.refresh().await;
            },
        )
        .await?;

    assert_eq!(response["user"]["account_type"], "Tenant");
    assert_eq!(modal.state(), ModalState::Closed);
    assert_eq!(view.rows()[0].display("email"), "asha@mail.com");
    assert_eq!(view.total_pages(), 3);
    Ok(())
}

#[tokio::test]
async fn duplicate_contact_keeps_modal_open() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let gw = backend.signed_in();

    let mut modal = FormModal::new(&TENANT_FORM).with_success_delay(Duration::ZERO);
    modal.open();
    fill(&mut modal, "tenant3@mail.com");

    let mut refreshed = false;
    let flag = &mut refreshed;
    let result = modal
        .submit(
            |payload| endpoints::add_user(&gw, payload),
            move || async move {
                *flag = true;
            },
        )
        .await;

    match result {
        Err(SubmitError::Rejected(message)) => assert_eq!(message, "This contact already exists"),
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(modal.state(), ModalState::Open);
    assert_eq!(modal.error(), Some("This contact already exists"));
    assert!(!refreshed);
    assert_eq!(modal.draft()["email"], "tenant3@mail.com");
    Ok(())
}

#[tokio::test]
async fn invalid_email_never_reaches_backend() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let gw = backend.signed_in();

    let mut modal = FormModal::new(&TENANT_FORM).with_success_delay(Duration::ZERO);
    modal.open();
    fill(&mut modal, "asha-at-mail");

    let result = modal
        .submit(|payload| endpoints::add_user(&gw, payload), || async {})
        .await;

    assert!(matches!(result, Err(SubmitError::Invalid(ref e)) if e.field == "email"));
    assert_eq!(modal.error(), Some(INVALID_EMAIL));
    assert_eq!(backend.state.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn missing_token_is_reported_by_backend() -> Result<()> {
    let backend = common::spawn_backend().await?;
    let gw = backend.anonymous();

    let mut modal = FormModal::new(&TENANT_FORM).with_success_delay(Duration::ZERO);
    modal.open();
    fill(&mut modal, "new@mail.com");

    let result = modal
        .submit(|payload| endpoints::add_user(&gw, payload), || async {})
        .await;

    assert!(matches!(result, Err(SubmitError::Rejected(ref m)) if m == "Unauthorized"));
    assert_eq!(backend.state.hits(), 1);
    Ok(())
}

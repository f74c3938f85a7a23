//! Updates routed through the full dptree schema

use std::ops::ControlFlow;
use serial_test::serial;
use teloxide::prelude::*;
use teloxide::types::Update;
use LessonRelay::handlers::schema;
use LessonRelay::middleware::LoggingMiddleware;
use LessonRelay::handlers::messages::LINK_ACCEPTED;
use LessonRelay::models::Field;
use LessonRelay::utils::errors::UNAUTHORIZED_REPLY;

use crate::helpers::*;

async fn dispatch(ctx: &TestContext, update: Update) {
    let deps = dptree::deps![
        ctx.bot.clone(),
        bot_me(),
        update,
        ctx.services.clone(),
        ctx.guard.clone(),
        LoggingMiddleware::default()
    ];

    let result = schema().dispatch(deps).await;
    assert!(matches!(result, ControlFlow::Break(Ok(()))), "update was not handled");
}

#[tokio::test]
#[serial]
async fn test_admin_button_press_reaches_router() {
    let ctx = TestContext::new().await;
    let link = ctx.services.links.extract(LESSON_LINK).expect("valid link");
    ctx.services.conversation.start(ADMIN_ID, &link).await;
    for value in ["A", "B", "C"] {
        ctx.services.conversation.handle_input(ADMIN_ID, value).await;
    }

    dispatch(&ctx, callback_update(ADMIN_ID, "send_to:Main")).await;

    assert_eq!(ctx.transport.deliveries().await.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_outsider_button_press_is_rejected() {
    let ctx = TestContext::new().await;

    dispatch(&ctx, callback_update(OUTSIDER_ID, "send_to:Main")).await;

    let answers = ctx.telegram_mock.requests_to("answerCallbackQuery").await;
    assert_eq!(answers[0]["text"], UNAUTHORIZED_REPLY);
    assert!(ctx.transport.deliveries().await.is_empty());
}

#[tokio::test]
#[serial]
async fn test_inline_share_is_public() {
    let ctx = TestContext::new().await;
    let share_query = ctx.settings.post.share.query.clone();

    dispatch(&ctx, inline_update(OUTSIDER_ID, &share_query)).await;

    ctx.telegram_mock.verify_endpoint_called("answerInlineQuery", 1).await;
}

#[tokio::test]
#[serial]
async fn test_admin_private_messages_fill_block() {
    let ctx = TestContext::new().await;

    dispatch(&ctx, private_text_update(ADMIN_ID, LESSON_LINK)).await;
    dispatch(&ctx, private_text_update(ADMIN_ID, "Algebra")).await;
    dispatch(&ctx, private_text_update(ADMIN_ID, "/empty")).await;
    dispatch(&ctx, private_text_update(ADMIN_ID, "https://notes.test/n")).await;

    let session = ctx.services.conversation.session(ADMIN_ID).await.expect("session");
    assert!(session.is_complete());
    assert_eq!(session.title(), "Algebra");
    assert_eq!(session.date(), "");
    assert_eq!(session.notes(), "https://notes.test/n");

    let texts = ctx.telegram_mock.sent_texts().await;
    assert!(texts[0].starts_with(LINK_ACCEPTED));
    assert_eq!(texts[1], Field::Date.prompt());
    assert_eq!(texts[2], Field::Notes.prompt());
    assert_eq!(ctx.transport.deliveries().await.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_outsider_link_is_rejected_without_session() {
    let ctx = TestContext::new().await;

    dispatch(&ctx, private_text_update(OUTSIDER_ID, LESSON_LINK)).await;

    assert!(ctx.services.conversation.session(OUTSIDER_ID).await.is_none());
    assert_eq!(ctx.telegram_mock.sent_texts().await, vec![UNAUTHORIZED_REPLY]);
}

#[tokio::test]
#[serial]
async fn test_outsider_command_is_rejected() {
    let ctx = TestContext::new().await;

    dispatch(&ctx, private_text_update(OUTSIDER_ID, "/save")).await;

    assert_eq!(ctx.telegram_mock.sent_texts().await, vec![UNAUTHORIZED_REPLY]);
}

#[tokio::test]
#[serial]
async fn test_outsider_chatter_is_ignored() {
    let ctx = TestContext::new().await;

    dispatch(&ctx, private_text_update(OUTSIDER_ID, "hello")).await;

    ctx.telegram_mock.verify_endpoint_called("sendMessage", 0).await;
}

#[tokio::test]
#[serial]
async fn test_admin_group_chatter_is_ignored() {
    let ctx = TestContext::new().await;
    let link = ctx.services.links.extract(LESSON_LINK).expect("valid link");
    ctx.services.conversation.start(ADMIN_ID, &link).await;

    dispatch(&ctx, group_text_update(ADMIN_ID, GROUP_CHAT_ID, "Algebra")).await;

    ctx.telegram_mock.verify_endpoint_called("sendMessage", 0).await;
    let session = ctx.services.conversation.session(ADMIN_ID).await.expect("session");
    assert_eq!(session.awaiting(), Some(Field::Title));
}

#[tokio::test]
#[serial]
async fn test_admin_group_command_is_handled() {
    let ctx = TestContext::new().await;

    dispatch(&ctx, group_text_update(ADMIN_ID, GROUP_CHAT_ID, "/chatinfo")).await;

    let sent = ctx.telegram_mock.requests_to("sendMessage").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["chat_id"], GROUP_CHAT_ID);
}

#[tokio::test]
#[serial]
async fn test_channel_chatinfo_is_answered() {
    let ctx = TestContext::new().await;

    dispatch(&ctx, channel_post_update("/chatinfo")).await;

    let sent = ctx.telegram_mock.requests_to("sendMessage").await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["chat_id"], CHANNEL_ID);
    assert!(sent[0]["text"].as_str().unwrap_or_default().contains("Type: channel"));
}

#[tokio::test]
#[serial]
async fn test_other_channel_commands_are_ignored() {
    let ctx = TestContext::new().await;

    dispatch(&ctx, channel_post_update("/post aB3dE9xZ")).await;
    dispatch(&ctx, channel_post_update("/save")).await;

    ctx.telegram_mock.verify_endpoint_called("sendMessage", 0).await;
}

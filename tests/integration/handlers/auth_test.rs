//! Integration tests for the rejection endpoint behind the admin guard

use serial_test::serial;
use teloxide::types::Update;
use LessonRelay::middleware::reject_unauthorized;
use LessonRelay::utils::errors::UNAUTHORIZED_REPLY;

use crate::helpers::*;

async fn reject(ctx: &TestContext, update: Update) {
    reject_unauthorized(ctx.bot.clone(), update, ctx.guard.clone(), ctx.services.clone())
        .await
        .expect("rejection handled");
}

#[tokio::test]
#[serial]
async fn test_outsider_command_is_rejected() {
    let ctx = TestContext::new().await;

    reject(&ctx, message_update(&private_text_message(OUTSIDER_ID, "/start"))).await;

    let replies = ctx.telegram_mock.requests_to("sendMessage").await;
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["chat_id"], OUTSIDER_ID);
    assert_eq!(replies[0]["text"], UNAUTHORIZED_REPLY);
}

#[tokio::test]
#[serial]
async fn test_outsider_lesson_link_is_rejected_without_session() {
    let ctx = TestContext::new().await;

    reject(&ctx, message_update(&private_text_message(OUTSIDER_ID, LESSON_LINK))).await;

    assert_eq!(ctx.telegram_mock.sent_texts().await, vec![UNAUTHORIZED_REPLY]);
    assert!(ctx.services.conversation.session(OUTSIDER_ID).await.is_none());
}

#[tokio::test]
#[serial]
async fn test_outsider_chat_text_is_ignored() {
    let ctx = TestContext::new().await;

    reject(&ctx, message_update(&private_text_message(OUTSIDER_ID, "hello bot"))).await;
    reject(&ctx, message_update(&group_text_message(OUTSIDER_ID, GROUP_CHAT_ID, "hi all", None))).await;

    ctx.telegram_mock.verify_endpoint_called("sendMessage", 0).await;
}

#[tokio::test]
#[serial]
async fn test_outsider_button_press_gets_alert() {
    let ctx = TestContext::new().await;

    reject(&ctx, callback_update(OUTSIDER_ID, "send_to:Main")).await;

    let answers = ctx.telegram_mock.requests_to("answerCallbackQuery").await;
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["text"], UNAUTHORIZED_REPLY);
    assert_eq!(answers[0]["show_alert"], true);
    assert!(ctx.transport.deliveries().await.is_empty());
}

#[tokio::test]
#[serial]
async fn test_admin_updates_falling_through_are_ignored() {
    let ctx = TestContext::new().await;

    reject(&ctx, message_update(&group_text_message(ADMIN_ID, GROUP_CHAT_ID, "/unknown", None))).await;

    ctx.telegram_mock.verify_endpoint_called("sendMessage", 0).await;
}

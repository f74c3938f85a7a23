//! Integration tests for destination picker callbacks

use serial_test::serial;
use LessonRelay::handlers::callbacks::handle_callback_query;

use crate::helpers::*;

async fn finish_block(ctx: &TestContext) {
    let link = ctx.services.links.extract(LESSON_LINK).expect("valid link");
    ctx.services.conversation.start(ADMIN_ID, &link).await;
    for value in ["Algebra", "Monday", "/empty"] {
        ctx.services.conversation.handle_input(ADMIN_ID, value).await;
    }
}

async fn press(ctx: &TestContext, data: &str) {
    handle_callback_query(ctx.bot.clone(), callback_query(ADMIN_ID, data), ctx.services.clone(), ctx.admin())
        .await
        .expect("callback handled");
}

#[tokio::test]
#[serial]
async fn test_send_to_delivers_and_clears_block() {
    let ctx = TestContext::new().await;
    finish_block(&ctx).await;

    press(&ctx, "send_to:Main").await;

    let deliveries = ctx.transport.deliveries().await;
    assert_eq!(deliveries.len(), 1);
    assert_eq!(deliveries[0].0.chat_id, MAIN_CHAT_ID);
    assert!(ctx.services.conversation.session(ADMIN_ID).await.is_none());

    let answers = ctx.telegram_mock.requests_to("answerCallbackQuery").await;
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["callback_query_id"], "cbq-1");
    assert_eq!(answers[0]["text"], "✅ Sent to Main");
    assert_eq!(ctx.telegram_mock.sent_texts().await, vec!["✅ Block sent to <b>Main</b>."]);
}

#[tokio::test]
#[serial]
async fn test_send_to_topic_uses_thread_and_anchor() {
    let ctx = TestContext::new().await;
    finish_block(&ctx).await;

    press(&ctx, "send_to:Topic").await;

    let (target, _) = ctx.transport.deliveries().await.remove(0);
    assert_eq!(target.chat_id, TOPIC_CHAT_ID);
    assert_eq!(target.thread_id, Some(TOPIC_THREAD_ID));
    assert_eq!(target.reply_to_message_id, Some(TOPIC_ANCHOR_ID));
}

#[tokio::test]
#[serial]
async fn test_unknown_destination_never_delivers() {
    let ctx = TestContext::new().await;
    finish_block(&ctx).await;

    press(&ctx, "send_to:Archive").await;

    assert!(ctx.transport.deliveries().await.is_empty());
    assert!(ctx.services.conversation.session(ADMIN_ID).await.is_some());
    let text = ctx.telegram_mock.sent_texts().await.remove(0);
    assert!(text.contains("\"Archive\" is not configured"));
}

#[tokio::test]
#[serial]
async fn test_failed_delivery_keeps_block_and_explains() {
    let ctx = TestContext::new().await;
    finish_block(&ctx).await;
    ctx.transport.fail_with("Bad Request: not enough rights to send text messages to the chat").await;

    press(&ctx, "send_to:Main").await;

    assert!(ctx.services.conversation.session(ADMIN_ID).await.is_some());
    let text = ctx.telegram_mock.sent_texts().await.remove(0);
    assert!(text.starts_with("❌ Could not send to Main"));
    assert!(text.contains("Your block is kept"));

    ctx.transport.recover().await;
    press(&ctx, "send_to:Main").await;
    assert_eq!(ctx.transport.deliveries().await.len(), 1);
    assert!(ctx.services.conversation.session(ADMIN_ID).await.is_none());
}

#[tokio::test]
#[serial]
async fn test_send_to_without_block() {
    let ctx = TestContext::new().await;

    press(&ctx, "send_to:Main").await;

    assert!(ctx.transport.deliveries().await.is_empty());
    assert_eq!(
        ctx.telegram_mock.sent_texts().await,
        vec!["ℹ️ No finished block. Send a lesson link first."]
    );
}

#[tokio::test]
#[serial]
async fn test_unrelated_payload_is_only_acknowledged() {
    let ctx = TestContext::new().await;
    finish_block(&ctx).await;

    press(&ctx, "lang:en").await;

    ctx.telegram_mock.verify_endpoint_called("answerCallbackQuery", 1).await;
    ctx.telegram_mock.verify_endpoint_called("sendMessage", 0).await;
    assert!(ctx.transport.deliveries().await.is_empty());
}

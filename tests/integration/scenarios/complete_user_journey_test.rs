//! Complete admin journeys: link to delivered post, and link to archived
//! block reposted on demand

use serial_test::serial;
use LessonRelay::handlers::{callbacks::handle_callback_query, commands::block, messages::handle_message};
use LessonRelay::models::ButtonAction;

use crate::helpers::*;

async fn say(ctx: &TestContext, text: &str) {
    handle_message(ctx.bot.clone(), private_text_message(ADMIN_ID, text), ctx.services.clone(), ctx.admin())
        .await
        .expect("message handled");
}

async fn skip(ctx: &TestContext) {
    block::handle_empty(
        ctx.bot.clone(),
        private_text_message(ADMIN_ID, "/empty"),
        ctx.services.clone(),
        ctx.admin(),
    )
    .await
    .expect("skip handled");
}

#[tokio::test]
#[serial]
async fn test_link_to_topic_delivery() {
    let ctx = TestContext::new().await;

    say(&ctx, LESSON_LINK).await;
    say(&ctx, "Algebra").await;
    skip(&ctx).await;
    say(&ctx, "https://notes.test/n").await;

    handle_callback_query(
        ctx.bot.clone(),
        callback_query(ADMIN_ID, "send_to:Topic"),
        ctx.services.clone(),
        ctx.admin(),
    )
    .await
    .expect("callback handled");

    let deliveries = ctx.transport.deliveries().await;
    assert_eq!(deliveries.len(), 2, "preview plus delivery");

    let (preview_target, preview) = &deliveries[0];
    let (target, post) = &deliveries[1];
    assert_eq!(preview_target.chat_id, ADMIN_ID);
    assert_eq!(preview, post);

    assert_eq!(target.chat_id, TOPIC_CHAT_ID);
    assert_eq!(target.thread_id, Some(TOPIC_THREAD_ID));
    assert_eq!(target.reply_to_message_id, Some(TOPIC_ANCHOR_ID));

    assert!(post.text.contains("<b>📌 Algebra</b>"));
    assert!(!post.text.contains("🗓️"));
    assert_eq!(post.button_labels(), vec!["▶️ Watch Lecture", "📝 View Notes", "🔗 Share"]);
    assert_eq!(post.buttons[0].action, ButtonAction::Url(PLAYER_LINK.to_string()));
    assert_eq!(post.buttons[1].action, ButtonAction::Url("https://notes.test/n".to_string()));

    assert!(ctx.services.conversation.session(ADMIN_ID).await.is_none());
}

#[tokio::test]
#[serial]
async fn test_link_to_archive_and_repeated_posts() {
    let ctx = TestContext::new().await;

    say(&ctx, LESSON_LINK).await;
    say(&ctx, "Geometry").await;
    say(&ctx, "Friday").await;
    skip(&ctx).await;

    block::handle_save(
        ctx.bot.clone(),
        private_text_message(ADMIN_ID, "/save"),
        ctx.services.clone(),
        ctx.admin(),
    )
    .await
    .expect("save handled");

    assert!(ctx.services.conversation.session(ADMIN_ID).await.is_none());
    let saved_reply = ctx.telegram_mock.sent_texts().await.pop().expect("save reply");
    let block_id = saved_reply
        .split("<code>")
        .nth(1)
        .and_then(|rest| rest.split("</code>").next())
        .expect("block id")
        .to_string();

    // A new block may be started while the archived one stays available
    say(&ctx, LESSON_LINK).await;

    for thread in [None, Some(4), None] {
        let msg = group_text_message(ADMIN_ID, GROUP_CHAT_ID, &format!("/post {}", block_id), thread);
        block::handle_post(ctx.bot.clone(), msg, ctx.services.clone(), ctx.admin(), block_id.clone())
            .await
            .expect("post handled");
    }

    let deliveries = ctx.transport.deliveries().await;
    // Preview of the first block, then three reposts
    assert_eq!(deliveries.len(), 4);
    let reposts = &deliveries[1..];
    assert!(reposts.iter().all(|(_, post)| post == &deliveries[0].1));
    assert_eq!(reposts[1].0.thread_id, Some(4));
    assert_eq!(reposts[0].0.thread_id, None);

    let post = &reposts[0].1;
    assert!(post.text.contains("<b>📌 Geometry</b>"));
    assert!(post.text.contains("🗓️ Friday"));
    assert_eq!(post.button_labels(), vec!["▶️ Watch Lecture", "🔗 Share"]);
}

use std::time::Duration;

use ocean_assist_responder::{GREETING, KeywordResponder};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{sleep, timeout};

use super::state::{Command, ControllerState};
use crate::conversation::Sender;
use crate::{ControllerBuilder, ReplyDelay};

fn test_builder() -> ControllerBuilder {
    ControllerBuilder::with_responder(KeywordResponder)
        .with_reply_delay(ReplyDelay::fixed(Duration::from_millis(100)))
}

#[tokio::test(start_paused = true)]
async fn test_end_to_end_flow() {
    let (idle_tx, mut idle_rx) = watch::channel::<bool>(false);
    let controller = test_builder()
        .on_idle(move || {
            idle_tx.send(true).ok();
        })
        .build();

    // Seeded with the greeting only.
    let transcript = controller.transcript().await.unwrap();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].sender, Sender::Assistant);
    assert_eq!(transcript[0].content, GREETING);

    controller.submit("What are ARGO floats?").unwrap();

    // The user message lands immediately, before the reply delay.
    let transcript = controller.transcript().await.unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].sender, Sender::User);
    assert_eq!(transcript[1].content, "What are ARGO floats?");

    idle_rx.wait_for(|v| *v).await.unwrap();

    let transcript = controller.transcript().await.unwrap();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[2].sender, Sender::Assistant);
    assert!(transcript[2].content.contains("autonomous oceanographic"));
}

#[tokio::test(start_paused = true)]
async fn test_salinity_reply_mentions_psu() {
    let controller = test_builder().build();
    controller.submit("salinity").unwrap();

    sleep(Duration::from_secs(10)).await;

    let transcript = controller.transcript().await.unwrap();
    assert_eq!(transcript.len(), 3);
    assert!(transcript[2].content.contains("PSU"));
}

#[tokio::test(start_paused = true)]
async fn test_blank_submission_is_a_no_op() {
    let controller = test_builder().build();
    controller.submit("   ").unwrap();

    assert_eq!(controller.transcript().await.unwrap().len(), 1);

    // Still idle: a real submission goes straight through.
    controller.submit("argo").unwrap();
    assert_eq!(controller.transcript().await.unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_submission_while_busy_is_rejected() {
    let controller = test_builder().build();
    controller.submit("what are argo floats?").unwrap();
    controller.submit("salinity").unwrap();

    // The second submission is dropped, not queued.
    assert_eq!(controller.transcript().await.unwrap().len(), 2);

    sleep(Duration::from_secs(10)).await;

    let transcript = controller.transcript().await.unwrap();
    assert_eq!(transcript.len(), 3);
    assert!(transcript[2].content.contains("autonomous oceanographic"));

    // No second reply ever shows up.
    sleep(Duration::from_secs(10)).await;
    assert_eq!(controller.transcript().await.unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_reset_cancels_pending_reply() {
    let controller = test_builder().build();
    controller.submit("tell me about temperature").unwrap();
    controller.reset().unwrap();

    // Long after the reply would have fired, the transcript is still
    // just the reseeded greeting.
    sleep(Duration::from_secs(10)).await;

    let transcript = controller.transcript().await.unwrap();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].sender, Sender::Assistant);
    assert_eq!(transcript[0].content, GREETING);
}

#[tokio::test]
async fn test_delivery_racing_a_reset_is_dropped() {
    // The reply timer can fire concurrently with a queued reset: the
    // timer task has already sent its delivery command when the reset
    // aborts it, so the controller handles the reset first and then
    // sees the delivery on an idle, reseeded state. Drive that exact
    // command ordering through the state directly.
    let (cmd_tx, _cmd_rx) = mpsc::unbounded_channel();
    let mut state =
        ControllerState::from_builder(test_builder(), cmd_tx.downgrade());

    state.handle(Command::Submit("tell me about temperature".to_owned()));
    state.handle(Command::Reset);
    state.handle(Command::DeliverReply(
        "tell me about temperature".to_owned(),
    ));

    let (tx, mut rx) = oneshot::channel();
    state.handle(Command::Snapshot(tx));
    let transcript = rx.try_recv().unwrap();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].sender, Sender::Assistant);
    assert_eq!(transcript[0].content, GREETING);
}

#[tokio::test(start_paused = true)]
async fn test_clear_phrase_resets_transcript() {
    let controller = test_builder().build();
    controller.submit("hello there").unwrap();
    sleep(Duration::from_secs(10)).await;
    assert_eq!(controller.transcript().await.unwrap().len(), 3);

    controller.submit("please clear chat").unwrap();

    let transcript = controller.transcript().await.unwrap();
    assert_eq!(transcript.len(), 1);
    assert_eq!(transcript[0].content, GREETING);

    // The controller is idle again after the reset.
    controller.submit("argo").unwrap();
    assert_eq!(controller.transcript().await.unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_on_message_reports_both_sides() {
    let (msg_tx, mut msg_rx) =
        tokio::sync::mpsc::unbounded_channel::<(Sender, String)>();
    let controller = test_builder()
        .on_message(move |msg| {
            msg_tx.send((msg.sender, msg.content.clone())).ok();
        })
        .build();

    controller.submit("explain salinity").unwrap();
    sleep(Duration::from_secs(10)).await;

    let (sender, content) = msg_rx.recv().await.unwrap();
    assert_eq!(sender, Sender::User);
    assert_eq!(content, "explain salinity");

    let (sender, content) = msg_rx.recv().await.unwrap();
    assert_eq!(sender, Sender::Assistant);
    assert!(content.contains("PSU"));
}

#[tokio::test(start_paused = true)]
async fn test_close_stops_the_controller() {
    let controller = test_builder().build();
    controller.close();

    let closed = timeout(Duration::from_secs(1), async {
        while controller.transcript().await.is_ok() {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await;
    assert!(closed.is_ok());
}

mod common;

use std::sync::{Arc, Mutex};

use codebrew_core::errors::BotError;
use codebrew_core::models::application::{ApplicationRecord, ReviewDecision};
use codebrew_discord_bot::mock::MockPlatform;
use codebrew_discord_bot::workflow::{
    review_reply, ApplicationEngine, ComponentAction, Resolution, Stage, AGE_PROMPT,
    EXPERIENCE_PROMPT, IGN_PROMPT, REVIEW_TITLE, SUBMITTED, SUBMIT_FAILED,
};
use common::{recording_platform, Recorder, REVIEW_CHANNEL, REVIEW_MESSAGE};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serenity::model::id::{ChannelId, MessageId, UserId};
use uuid::Uuid;

const APPLICANT: u64 = 1001;
const ACCEPTED: &str = "✅ Your application has been accepted!";
const DENIED: &str = "❌ Your application has been denied.";

fn engine(open_dms: &[u64]) -> (ApplicationEngine, Recorder) {
    let (platform, recorder) = recording_platform(open_dms);
    (
        ApplicationEngine::new(Arc::new(platform), ChannelId(REVIEW_CHANNEL)),
        recorder,
    )
}

async fn submit(engine: &ApplicationEngine, applicant: UserId) -> Uuid {
    let id = engine.start(applicant).await.unwrap();
    for answer in ["Steve", "17", "Two years of Rust"] {
        assert!(engine.handle_dm(applicant, answer).await.unwrap());
    }
    id
}

#[test_log::test(tokio::test)]
async fn test_accept_posts_once_and_notifies_once() {
    let (engine, recorder) = engine(&[APPLICANT]);
    let applicant = UserId(APPLICANT);

    let id = submit(&engine, applicant).await;

    let posts = recorder.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, ChannelId(REVIEW_CHANNEL));
    let embed = posts[0].1.embed.clone().unwrap();
    assert_eq!(embed.title.as_deref(), Some(REVIEW_TITLE));
    assert_eq!(embed.field_value("IGN"), Some("Steve"));
    assert_eq!(embed.field_value("Age"), Some("17"));
    assert_eq!(embed.field_value("Experience"), Some("Two years of Rust"));

    let resolution = engine.resolve(id, ReviewDecision::Accept).await.unwrap();
    assert_eq!(
        resolution,
        Resolution::Resolved {
            applicant,
            decision: ReviewDecision::Accept,
            notified: true,
        }
    );

    assert_eq!(
        recorder.dm_texts(),
        vec![IGN_PROMPT, AGE_PROMPT, EXPERIENCE_PROMPT, SUBMITTED, ACCEPTED]
    );
    assert_eq!(
        recorder.deletes(),
        vec![(ChannelId(REVIEW_CHANNEL), MessageId(REVIEW_MESSAGE))]
    );
    assert!(engine.get(id).await.is_none());
}

#[tokio::test]
async fn test_review_post_failure_is_not_confirmed() {
    let dms = Arc::new(Mutex::new(Vec::new()));
    let mut platform = MockPlatform::new();
    let sent = dms.clone();
    platform.expect_send_dm().returning(move |_, content| {
        sent.lock().unwrap().push(content.to_string());
        Ok(())
    });
    platform
        .expect_post()
        .times(1)
        .returning(|_, _| Err(BotError::Permission("Missing Access".to_string())));
    let engine = ApplicationEngine::new(Arc::new(platform), ChannelId(REVIEW_CHANNEL));
    let applicant = UserId(APPLICANT);

    let id = engine.start(applicant).await.unwrap();
    assert!(engine.handle_dm(applicant, "Steve").await.unwrap());
    assert!(engine.handle_dm(applicant, "17").await.unwrap());
    let result = engine.handle_dm(applicant, "Two years of Rust").await;

    assert!(matches!(result, Err(BotError::Permission(_))));
    assert_eq!(
        *dms.lock().unwrap(),
        vec![IGN_PROMPT, AGE_PROMPT, EXPERIENCE_PROMPT, SUBMIT_FAILED]
    );
    assert!(engine.get(id).await.is_none());
    assert_eq!(engine.collecting_stage(applicant).await, None);
    assert!(!engine.handle_dm(applicant, "hello?").await.unwrap());
}

#[tokio::test]
async fn test_deny_sends_denial_and_no_acceptance() {
    let (engine, recorder) = engine(&[APPLICANT]);

    let id = submit(&engine, UserId(APPLICANT)).await;
    engine.resolve(id, ReviewDecision::Deny).await.unwrap();

    let dms = recorder.dm_texts();
    assert_eq!(dms.iter().filter(|t| *t == DENIED).count(), 1);
    assert!(!dms.iter().any(|t| t == ACCEPTED));
    assert_eq!(recorder.posts().len(), 1);
    assert_eq!(recorder.deletes().len(), 1);
}

#[tokio::test]
async fn test_second_decision_is_ignored() {
    let (engine, recorder) = engine(&[APPLICANT]);

    let id = submit(&engine, UserId(APPLICANT)).await;
    engine.resolve(id, ReviewDecision::Accept).await.unwrap();
    let again = engine.resolve(id, ReviewDecision::Deny).await.unwrap();

    assert_eq!(again, Resolution::NotPending);
    assert_eq!(recorder.deletes().len(), 1);
    assert!(!recorder.dm_texts().iter().any(|t| t == DENIED));
}

#[tokio::test]
async fn test_resolving_unknown_or_collecting_instance_is_not_pending() {
    let (engine, recorder) = engine(&[APPLICANT]);

    assert_eq!(
        engine.resolve(Uuid::new_v4(), ReviewDecision::Accept).await.unwrap(),
        Resolution::NotPending
    );

    let id = engine.start(UserId(APPLICANT)).await.unwrap();
    assert_eq!(
        engine.resolve(id, ReviewDecision::Accept).await.unwrap(),
        Resolution::NotPending
    );
    assert_eq!(
        engine.collecting_stage(UserId(APPLICANT)).await,
        Some(Stage::AwaitingIgn)
    );
    assert!(recorder.deletes().is_empty());
}

#[tokio::test]
async fn test_dm_from_stranger_is_not_consumed() {
    let (engine, recorder) = engine(&[APPLICANT]);

    assert!(!engine.handle_dm(UserId(7), "hello").await.unwrap());
    assert!(recorder.dms().is_empty());
}

#[tokio::test]
async fn test_start_fails_when_dms_are_closed() {
    let (engine, recorder) = engine(&[]);

    let result = engine.start(UserId(APPLICANT)).await;

    assert!(result.unwrap_err().is_delivery());
    assert_eq!(engine.collecting_stage(UserId(APPLICANT)).await, None);
    assert!(!engine.handle_dm(UserId(APPLICANT), "Steve").await.unwrap());
    assert!(recorder.posts().is_empty());
}

#[tokio::test]
async fn test_restart_discards_unfinished_answers() {
    let (engine, _recorder) = engine(&[APPLICANT]);
    let applicant = UserId(APPLICANT);

    let first = engine.start(applicant).await.unwrap();
    engine.handle_dm(applicant, "Steve").await.unwrap();
    let second = engine.start(applicant).await.unwrap();

    assert_ne!(first, second);
    assert!(engine.get(first).await.is_none());
    assert_eq!(engine.collecting_stage(applicant).await, Some(Stage::AwaitingIgn));
}

#[tokio::test]
async fn test_pending_reviews_survive_a_new_application() {
    let (engine, recorder) = engine(&[APPLICANT]);
    let applicant = UserId(APPLICANT);

    let first = submit(&engine, applicant).await;
    let second = submit(&engine, applicant).await;

    assert_eq!(recorder.posts().len(), 2);
    assert!(matches!(
        engine.get(first).await.map(|i| i.stage),
        Some(Stage::PendingReview { .. })
    ));
    assert!(matches!(
        engine.get(second).await.map(|i| i.stage),
        Some(Stage::PendingReview { .. })
    ));
}

#[tokio::test]
async fn test_concurrent_applicants_do_not_share_answers() {
    let (engine, recorder) = engine(&[1, 2]);

    engine.start(UserId(1)).await.unwrap();
    engine.start(UserId(2)).await.unwrap();
    engine.handle_dm(UserId(1), "Alex").await.unwrap();
    engine.handle_dm(UserId(2), "Sam").await.unwrap();

    assert_eq!(
        engine.collecting_stage(UserId(1)).await,
        Some(Stage::AwaitingAge { ign: "Alex".to_string() })
    );
    assert_eq!(
        engine.collecting_stage(UserId(2)).await,
        Some(Stage::AwaitingAge { ign: "Sam".to_string() })
    );
    assert!(recorder.posts().is_empty());
}

#[test]
fn test_blank_answers_are_shown_as_blank() {
    let record = ApplicationRecord {
        applicant: APPLICANT,
        ign: "Steve".to_string(),
        age: String::new(),
        experience: String::new(),
    };

    let reply = review_reply(Uuid::nil(), &record);
    let embed = reply.embed.unwrap();

    assert_eq!(embed.field_value("Age"), Some("(blank)"));
    assert_eq!(embed.field_value("Experience"), Some("(blank)"));
    assert_eq!(reply.buttons.len(), 2);
}

#[rstest]
#[case("application:apply", Some(ComponentAction::Apply))]
#[case(
    "application:accept:00000000-0000-0000-0000-000000000000",
    Some(ComponentAction::Review { id: Uuid::nil(), decision: ReviewDecision::Accept })
)]
#[case(
    "application:deny:00000000-0000-0000-0000-000000000000",
    Some(ComponentAction::Review { id: Uuid::nil(), decision: ReviewDecision::Deny })
)]
#[case("application:maybe:00000000-0000-0000-0000-000000000000", None)]
#[case("application:accept:not-a-uuid", None)]
#[case("poll:yes", None)]
fn test_component_action_parse(#[case] custom_id: &str, #[case] expected: Option<ComponentAction>) {
    assert_eq!(ComponentAction::parse(custom_id), expected);
}

#[test]
fn test_review_buttons_round_trip_to_actions() {
    let record = ApplicationRecord {
        applicant: APPLICANT,
        ign: "Steve".to_string(),
        age: "17".to_string(),
        experience: "some".to_string(),
    };
    let id = Uuid::new_v4();

    let actions: Vec<_> = review_reply(id, &record)
        .buttons
        .iter()
        .map(|b| ComponentAction::parse(&b.custom_id))
        .collect();

    assert_eq!(
        actions,
        vec![
            Some(ComponentAction::Review { id, decision: ReviewDecision::Accept }),
            Some(ComponentAction::Review { id, decision: ReviewDecision::Deny }),
        ]
    );
}

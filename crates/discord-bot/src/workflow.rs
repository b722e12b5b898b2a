//! Direct-message application workflow.
//!
//! An applicant clicks Apply, answers three questions in their DMs, and the
//! answers are posted to the review channel with Accept/Deny buttons. Each
//! run is a [`WorkflowInstance`] keyed by its own id, so concurrent
//! applicants never share state.

use std::collections::HashMap;
use std::sync::Arc;

use serenity::model::id::{ChannelId, MessageId, UserId};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use codebrew_core::errors::BotResult;
use codebrew_core::models::application::{ApplicationRecord, ReviewDecision};

use crate::platform::Platform;
use crate::reply::{Button, ButtonStyle, Embed, Reply};

pub const IGN_PROMPT: &str = "Let's get started! What's your IGN?";
pub const AGE_PROMPT: &str = "How old are you?";
pub const EXPERIENCE_PROMPT: &str = "Tell me about your experience in coding:";
pub const SUBMITTED: &str = "Thank you for your answers, we will get back to you shortly!";
/// Sent when the review channel refuses the application.
pub const SUBMIT_FAILED: &str =
    "⚠️ We couldn't submit your application right now. Please click Apply again later.";

pub const REVIEW_TITLE: &str = "New Application";
pub const REVIEW_COLOR: u32 = 0x3498db;

/// Custom id of the button that starts an application
pub const APPLY_BUTTON_ID: &str = "application:apply";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    AwaitingIgn,
    AwaitingAge { ign: String },
    AwaitingExperience { ign: String, age: String },
    PendingReview { record: ApplicationRecord, message: MessageId },
}

impl Stage {
    fn is_collecting(&self) -> bool {
        !matches!(self, Stage::PendingReview { .. })
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowInstance {
    pub id: Uuid,
    pub applicant: UserId,
    pub stage: Stage,
}

/// What happened when a reviewer clicked a decision button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved {
        applicant: UserId,
        decision: ReviewDecision,
        /// Whether the applicant received the decision DM
        notified: bool,
    },
    /// Unknown id, or a decision was already made
    NotPending,
}

/// Button presses the workflow reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentAction {
    Apply,
    Review { id: Uuid, decision: ReviewDecision },
}

impl ComponentAction {
    /// Parse a button custom id, `None` for ids this workflow does not own.
    pub fn parse(custom_id: &str) -> Option<Self> {
        if custom_id == APPLY_BUTTON_ID {
            return Some(ComponentAction::Apply);
        }

        let rest = custom_id.strip_prefix("application:")?;
        let (decision, id) = rest.split_once(':')?;
        Some(ComponentAction::Review {
            id: Uuid::parse_str(id).ok()?,
            decision: ReviewDecision::parse(decision)?,
        })
    }
}

pub fn review_button_id(decision: ReviewDecision, id: Uuid) -> String {
    format!("application:{}:{}", decision.as_str(), id)
}

/// The Apply button posted by `setapply`
pub fn apply_button() -> Button {
    Button::new(APPLY_BUTTON_ID, "Apply", ButtonStyle::Success)
}

enum Step {
    Prompt(Uuid, &'static str),
    Complete(Uuid, ApplicationRecord),
}

pub struct ApplicationEngine {
    platform: Arc<dyn Platform>,
    review_channel: ChannelId,
    instances: RwLock<HashMap<Uuid, WorkflowInstance>>,
}

impl ApplicationEngine {
    pub fn new(platform: Arc<dyn Platform>, review_channel: ChannelId) -> Self {
        Self {
            platform,
            review_channel,
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Begin a new application for `applicant`.
    ///
    /// An application the applicant was still answering is discarded; ones
    /// already waiting for review are kept.
    pub async fn start(&self, applicant: UserId) -> BotResult<Uuid> {
        let id = Uuid::new_v4();
        {
            let mut instances = self.instances.write().await;
            instances.retain(|_, i| !(i.applicant == applicant && i.stage.is_collecting()));
            instances.insert(
                id,
                WorkflowInstance {
                    id,
                    applicant,
                    stage: Stage::AwaitingIgn,
                },
            );
        }

        if let Err(e) = self.platform.send_dm(applicant, IGN_PROMPT).await {
            self.instances.write().await.remove(&id);
            return Err(e);
        }

        info!("Application {} started for {}", id, applicant);
        Ok(id)
    }

    /// Feed a direct message into the applicant's workflow.
    ///
    /// Returns `false` when the author has no application in progress, in
    /// which case the message is left for normal command handling.
    pub async fn handle_dm(&self, author: UserId, content: &str) -> BotResult<bool> {
        let answer = content.trim().to_string();

        let step = {
            let mut instances = self.instances.write().await;
            let Some(instance) = instances
                .values_mut()
                .find(|i| i.applicant == author && i.stage.is_collecting())
            else {
                return Ok(false);
            };

            match instance.stage.clone() {
                Stage::AwaitingIgn => {
                    instance.stage = Stage::AwaitingAge { ign: answer };
                    Step::Prompt(instance.id, AGE_PROMPT)
                }
                Stage::AwaitingAge { ign } => {
                    instance.stage = Stage::AwaitingExperience { ign, age: answer };
                    Step::Prompt(instance.id, EXPERIENCE_PROMPT)
                }
                Stage::AwaitingExperience { ign, age } => {
                    let id = instance.id;
                    // Re-inserted as PendingReview once the review post exists
                    instances.remove(&id);
                    Step::Complete(
                        id,
                        ApplicationRecord {
                            applicant: author.0,
                            ign,
                            age,
                            experience: answer,
                        },
                    )
                }
                Stage::PendingReview { .. } => return Ok(false),
            }
        };

        match step {
            Step::Prompt(id, prompt) => {
                debug!("Application {} advanced", id);
                if let Err(e) = self.platform.send_dm(author, prompt).await {
                    warn!("Could not send application prompt to {}: {}", author, e);
                }
            }
            Step::Complete(id, record) => self.submit(id, author, record).await?,
        }

        Ok(true)
    }

    async fn submit(&self, id: Uuid, applicant: UserId, record: ApplicationRecord) -> BotResult<()> {
        let message = match self
            .platform
            .post(self.review_channel, &review_reply(id, &record))
            .await
        {
            Ok(message) => message,
            Err(e) => {
                warn!("Could not post application {} for review: {}", id, e);
                if let Err(e) = self.platform.send_dm(applicant, SUBMIT_FAILED).await {
                    warn!("Could not tell {} that application {} failed: {}", applicant, id, e);
                }
                return Err(e);
            }
        };

        self.instances.write().await.insert(
            id,
            WorkflowInstance {
                id,
                applicant,
                stage: Stage::PendingReview { record, message },
            },
        );

        if let Err(e) = self.platform.send_dm(applicant, SUBMITTED).await {
            warn!("Could not confirm application {} to {}: {}", id, applicant, e);
        }
        info!("Application {} submitted for review", id);
        Ok(())
    }

    /// Apply a reviewer's decision. Only the first decision on an application counts.
    pub async fn resolve(&self, id: Uuid, decision: ReviewDecision) -> BotResult<Resolution> {
        let instance = {
            let mut instances = self.instances.write().await;
            let pending = matches!(
                instances.get(&id),
                Some(WorkflowInstance {
                    stage: Stage::PendingReview { .. },
                    ..
                })
            );
            if pending { instances.remove(&id) } else { None }
        };

        let Some(WorkflowInstance {
            applicant,
            stage: Stage::PendingReview { message, .. },
            ..
        }) = instance
        else {
            return Ok(Resolution::NotPending);
        };

        let notified = match self
            .platform
            .send_dm(applicant, decision.applicant_message())
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!("Could not notify {} about application {}: {}", applicant, id, e);
                false
            }
        };

        if let Err(e) = self.platform.delete_message(self.review_channel, message).await {
            warn!("Could not remove review message for {}: {}", id, e);
        }

        info!("Application {} resolved: {}", id, decision.as_str());
        Ok(Resolution::Resolved {
            applicant,
            decision,
            notified,
        })
    }

    pub async fn get(&self, id: Uuid) -> Option<WorkflowInstance> {
        self.instances.read().await.get(&id).cloned()
    }

    /// Stage of the application the user is currently answering
    pub async fn collecting_stage(&self, applicant: UserId) -> Option<Stage> {
        self.instances
            .read()
            .await
            .values()
            .find(|i| i.applicant == applicant && i.stage.is_collecting())
            .map(|i| i.stage.clone())
    }
}

/// Review post for a completed application.
pub fn review_reply(id: Uuid, record: &ApplicationRecord) -> Reply {
    let mut embed = Embed::new(REVIEW_COLOR)
        .title(REVIEW_TITLE)
        .description(format!("Applicant: <@{}>", record.applicant));

    for (name, value) in record.fields() {
        let value = if value.is_empty() { "(blank)" } else { value };
        embed = embed.field(name, value, false);
    }

    Reply::embed(embed)
        .with_button(Button::new(
            review_button_id(ReviewDecision::Accept, id),
            "Accept",
            ButtonStyle::Success,
        ))
        .with_button(Button::new(
            review_button_id(ReviewDecision::Deny, id),
            "Deny",
            ButtonStyle::Danger,
        ))
}

//! Buttons of the application workflow.

use eyre::Result;
use serenity::model::{id::UserId, Permissions};
use tracing::{info, warn};

use codebrew_core::models::application::ReviewDecision;

use crate::dispatch::{has_permission, permission_rejection};
use crate::handlers::HandlerContext;
use crate::reply::Reply;
use crate::workflow::{ComponentAction, Resolution};

pub const CHECK_DMS: &str = "📬 Check your DMs to continue your application!";
pub const DMS_CLOSED: &str = "❌ I couldn't DM you. Please enable DMs from server members and try again.";
pub const NO_LONGER_PENDING: &str = "⚠️ This application is no longer pending.";

/// Permission a reviewer needs to accept or deny applications
pub const REVIEWER_PERMISSION: Permissions = Permissions::MANAGE_MESSAGES;

/// Handle a button press. Returns the ephemeral reply for the presser, or
/// `None` when the button does not belong to the workflow.
pub async fn handle_component(
    ctx: &HandlerContext,
    custom_id: &str,
    user: UserId,
    permissions: Option<Permissions>,
) -> Result<Option<Reply>> {
    let Some(action) = ComponentAction::parse(custom_id) else {
        return Ok(None);
    };

    let reply = match action {
        ComponentAction::Apply => match ctx.applications.start(user).await {
            Ok(_) => Reply::text(CHECK_DMS),
            Err(e) if e.is_delivery() => {
                warn!("Could not start application for {}: {}", user, e);
                Reply::text(DMS_CLOSED)
            }
            Err(e) => return Err(e.into()),
        },
        ComponentAction::Review { id, decision } => {
            if !has_permission(permissions, REVIEWER_PERMISSION) {
                return Ok(Some(Reply::text(permission_rejection(REVIEWER_PERMISSION))));
            }

            match ctx.applications.resolve(id, decision).await? {
                Resolution::Resolved {
                    applicant,
                    decision,
                    notified,
                } => {
                    info!("{} resolved application {} ({})", user, id, decision.as_str());
                    let verb = match decision {
                        ReviewDecision::Accept => "accepted",
                        ReviewDecision::Deny => "denied",
                    };
                    let mut text = format!("Application from <@{}> {}.", applicant.0, verb);
                    if !notified {
                        text.push_str(" The applicant could not be notified by DM.");
                    }
                    Reply::text(text)
                }
                Resolution::NotPending => Reply::text(NO_LONGER_PENDING),
            }
        }
    };

    Ok(Some(reply))
}

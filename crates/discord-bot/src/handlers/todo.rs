//! Per-user to-do lists. Anyone may edit anyone's list.

use eyre::Result;
use serenity::model::id::UserId;
use tracing::debug;

use crate::args::{parse_user_mention, split_first};
use crate::commands::Command;
use crate::dispatch::{usage, Invocation};
use crate::handlers::HandlerContext;
use crate::reply::Reply;

pub const TASK_NOT_FOUND: &str = "⚠️ Task not found or invalid number.";

/// `todo <@user> add <task>`. Verbs other than `add` are ignored.
pub async fn todo(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let (user, rest) = split_first(&inv.args);
    let (verb, task) = split_first(rest);
    let (Some(user), Some(verb)) = (user.and_then(parse_user_mention), verb) else {
        return Ok(usage(ctx, Command::Todo.spec()));
    };

    if verb != "add" {
        debug!("Ignoring todo verb {}", verb);
        return Ok(Reply::empty());
    }
    if task.is_empty() {
        return Ok(usage(ctx, Command::Todo.spec()));
    }

    let mut list = ctx.todos.get(&user.0).await?.unwrap_or_default();
    list.add(task);
    ctx.todos.set(user.0, list).await?;

    let name = display_name(ctx, user).await;
    Ok(Reply::text(format!("✅ Task added for {}.", name)))
}

/// `tasks <@user>`
pub async fn tasks(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let Some(user) = split_first(&inv.args).0.and_then(parse_user_mention) else {
        return Ok(usage(ctx, Command::Tasks.spec()));
    };

    let list = ctx.todos.get(&user.0).await?.unwrap_or_default();
    let Some(rendered) = list.render() else {
        return Ok(Reply::text("No tasks found."));
    };

    let name = display_name(ctx, user).await;
    Ok(Reply::text(format!("Tasks for {}:\n{}", name, rendered)))
}

/// `done <@user> <number>`, numbered as `tasks` shows them.
pub async fn done(ctx: &HandlerContext, inv: &Invocation) -> Result<Reply> {
    let (user, rest) = split_first(&inv.args);
    let Some(user) = user.and_then(parse_user_mention) else {
        return Ok(usage(ctx, Command::Done.spec()));
    };
    let Some(number) = split_first(rest).0.and_then(|n| n.parse::<i64>().ok()) else {
        return Ok(Reply::text(TASK_NOT_FOUND));
    };

    let Some(mut list) = ctx.todos.get(&user.0).await? else {
        return Ok(Reply::text(TASK_NOT_FOUND));
    };

    match list.remove(number) {
        Ok(task) => {
            ctx.todos.set(user.0, list).await?;
            Ok(Reply::text(format!("✅ Removed task: {}", task)))
        }
        Err(_) => Ok(Reply::text(TASK_NOT_FOUND)),
    }
}

/// Name to show for a user, falling back to a mention when the lookup fails
async fn display_name(ctx: &HandlerContext, user: UserId) -> String {
    ctx.platform
        .user_name(user)
        .await
        .unwrap_or_else(|_| format!("<@{}>", user.0))
}

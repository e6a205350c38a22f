//! # Interaction Router
//!
//! Entry point for every interaction the gateway delivers. Commands are resolved against
//! the registry's current snapshot, gated by tier, and run under a deadline; button presses
//! go to the [`MessageComponentHandler`].
//!
//! Once an interaction is deferred, every path ends in exactly one reply edit. Handler
//! failures are logged and answered here, never propagated.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Fallback replies only when the handler hasn't replied; one-time startup gate
//! - 1.0.0: Initial implementation

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::core::embeds::Reply;
use crate::interactions::{CommandInvocation, ComponentAction, InteractionResponder};
use crate::message_components::MessageComponentHandler;

/// How an interaction was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Unknown command; nothing was sent
    Ignored,
    Denied,
    Completed,
    Failed,
    TimedOut,
}

pub fn no_permission_reply() -> Reply {
    Reply::error("No Permission", "You don't have permission to run this command")
}

pub fn generic_error_reply() -> Reply {
    Reply::error(
        "Error",
        "There was an error while trying to run this command. The error has been logged in the console",
    )
}

/// Wraps a handler's responder and remembers whether it has replied
///
/// The flag is set before the edit is sent, so an edit cut off by the deadline still counts.
struct TrackedResponder<'a> {
    inner: &'a dyn InteractionResponder,
    replied: AtomicBool,
}

impl<'a> TrackedResponder<'a> {
    fn new(inner: &'a dyn InteractionResponder) -> Self {
        Self {
            inner,
            replied: AtomicBool::new(false),
        }
    }

    fn replied(&self) -> bool {
        self.replied.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InteractionResponder for TrackedResponder<'_> {
    async fn defer(&self, ephemeral: bool) -> Result<()> {
        self.inner.defer(ephemeral).await
    }

    async fn edit(&self, reply: &Reply) -> Result<()> {
        self.replied.store(true, Ordering::SeqCst);
        self.inner.edit(reply).await
    }
}

pub struct InteractionRouter {
    context: Arc<CommandContext>,
    components: MessageComponentHandler,
    handler_timeout: Duration,
    started: AtomicBool,
}

impl InteractionRouter {
    pub fn new(context: Arc<CommandContext>, handler_timeout: Duration) -> Self {
        let components = MessageComponentHandler::new(
            context.designations.clone(),
            Arc::clone(&context.permissions),
        );
        Self {
            context,
            components,
            handler_timeout,
            started: AtomicBool::new(false),
        }
    }

    /// True for the first caller only; later gateway `Ready` events (reconnects) get false.
    pub fn claim_startup(&self) -> bool {
        !self.started.swap(true, Ordering::SeqCst)
    }

    pub fn context(&self) -> &Arc<CommandContext> {
        &self.context
    }

    /// Dispatch a slash command invocation
    ///
    /// Errors only when Discord rejects the defer or the reply edit.
    pub async fn route_command(
        &self,
        invocation: &CommandInvocation,
        responder: &dyn InteractionResponder,
    ) -> Result<RouteOutcome> {
        let Some(descriptor) = self.context.registry.get(&invocation.name) else {
            debug!("Ignoring unknown command /{}", invocation.name);
            return Ok(RouteOutcome::Ignored);
        };

        let request_id = Uuid::new_v4();
        info!(
            "[{request_id}] 📥 /{} from {} ({})",
            descriptor.name, invocation.invoker.name, invocation.invoker.id
        );

        responder.defer(descriptor.ephemeral).await?;
        let author = invocation.invoker.attribution();

        if !self
            .context
            .permissions
            .authorize(descriptor.tier, &invocation.invoker.roles)
        {
            warn!(
                "[{request_id}] 🚫 {} lacks the {} tier for /{}",
                invocation.invoker.name, descriptor.tier, descriptor.name
            );
            responder.edit(&no_permission_reply().with_author(author)).await?;
            return Ok(RouteOutcome::Denied);
        }

        let tracked = TrackedResponder::new(responder);
        let run = descriptor
            .handler
            .handle(Arc::clone(&self.context), invocation, &tracked);
        let result = tokio::time::timeout(self.handler_timeout, run).await;

        let (outcome, fallback) = match result {
            Ok(Ok(())) if tracked.replied() => {
                info!("[{request_id}] ✅ /{} completed", descriptor.name);
                return Ok(RouteOutcome::Completed);
            }
            Ok(Ok(())) => {
                error!(
                    "[{request_id}] ❌ /{} finished without replying",
                    descriptor.name
                );
                (RouteOutcome::Failed, generic_error_reply())
            }
            Ok(Err(e)) => {
                error!("[{request_id}] ❌ /{} failed: {e:?}", descriptor.name);
                (RouteOutcome::Failed, generic_error_reply())
            }
            Err(_) => {
                error!(
                    "[{request_id}] ⏰ /{} timed out after {:?}",
                    descriptor.name, self.handler_timeout
                );
                let reply = Reply::error(
                    "Timed Out",
                    "This command took too long to respond. Please try again later",
                );
                (RouteOutcome::TimedOut, reply)
            }
        };

        // The handler's own reply stands
        if !tracked.replied() {
            responder.edit(&fallback.with_author(author)).await?;
        }
        Ok(outcome)
    }

    /// Dispatch a button press
    pub async fn route_component(
        &self,
        action: &ComponentAction,
        responder: &dyn InteractionResponder,
    ) -> Result<RouteOutcome> {
        self.components
            .handle_component_interaction(action, responder)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use serenity::builder::CreateApplicationCommand;

    use crate::commands::handler::SlashCommandHandler;
    use crate::commands::handlers::create_all_handlers;
    use crate::core::embeds::EmbedKind;
    use crate::features::permissions::PermissionTier;
    use crate::interactions::CommandArgs;
    use crate::test_utils::{
        button_press, invocation, test_context, Recorded, RecordingResponder, ADMIN_ROLE,
        DESIGNATE_ROLE, FETCH_ROLE, OTHER_ROLE,
    };

    fn schema(name: &str) -> CreateApplicationCommand {
        let mut command = CreateApplicationCommand::default();
        command.name(name).description("test command");
        command
    }

    struct FailingHandler;

    #[async_trait]
    impl SlashCommandHandler for FailingHandler {
        fn command_name(&self) -> &'static str {
            "explode"
        }

        fn schema(&self) -> CreateApplicationCommand {
            schema("explode")
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _invocation: &CommandInvocation,
            _responder: &dyn InteractionResponder,
        ) -> Result<()> {
            Err(anyhow!("boom"))
        }
    }

    struct SlowHandler;

    #[async_trait]
    impl SlashCommandHandler for SlowHandler {
        fn command_name(&self) -> &'static str {
            "slow"
        }

        fn schema(&self) -> CreateApplicationCommand {
            schema("slow")
        }

        fn permission(&self) -> PermissionTier {
            PermissionTier::Fetch
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _invocation: &CommandInvocation,
            _responder: &dyn InteractionResponder,
        ) -> Result<()> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        }
    }

    /// Replies, then keeps running past any reasonable deadline
    struct LingeringHandler;

    #[async_trait]
    impl SlashCommandHandler for LingeringHandler {
        fn command_name(&self) -> &'static str {
            "linger"
        }

        fn schema(&self) -> CreateApplicationCommand {
            schema("linger")
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _invocation: &CommandInvocation,
            responder: &dyn InteractionResponder,
        ) -> Result<()> {
            responder.edit(&Reply::success("Done", "All finished")).await?;
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        }
    }

    /// Replies, then fails
    struct HalfwayHandler;

    #[async_trait]
    impl SlashCommandHandler for HalfwayHandler {
        fn command_name(&self) -> &'static str {
            "halfway"
        }

        fn schema(&self) -> CreateApplicationCommand {
            schema("halfway")
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _invocation: &CommandInvocation,
            responder: &dyn InteractionResponder,
        ) -> Result<()> {
            responder.edit(&Reply::info("Partial", "Half of the work")).await?;
            Err(anyhow!("cleanup failed"))
        }
    }

    /// Returns without ever replying
    struct SilentHandler;

    #[async_trait]
    impl SlashCommandHandler for SilentHandler {
        fn command_name(&self) -> &'static str {
            "silent"
        }

        fn schema(&self) -> CreateApplicationCommand {
            schema("silent")
        }

        async fn handle(
            &self,
            _ctx: Arc<CommandContext>,
            _invocation: &CommandInvocation,
            _responder: &dyn InteractionResponder,
        ) -> Result<()> {
            Ok(())
        }
    }

    fn misbehaving_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
        vec![
            Arc::new(FailingHandler),
            Arc::new(SlowHandler),
            Arc::new(LingeringHandler),
            Arc::new(HalfwayHandler),
            Arc::new(SilentHandler),
        ]
    }

    async fn misbehaving_router(timeout: Duration) -> InteractionRouter {
        InteractionRouter::new(test_context(misbehaving_handlers).await, timeout)
    }

    fn reply_titles(responder: &RecordingResponder) -> Vec<String> {
        responder.replies().into_iter().map(|r| r.title).collect()
    }

    async fn router() -> InteractionRouter {
        InteractionRouter::new(test_context(create_all_handlers).await, Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_unknown_command_sends_nothing() {
        let router = InteractionRouter::new(
            test_context(misbehaving_handlers).await,
            Duration::from_secs(5),
        );
        let responder = RecordingResponder::default();

        let outcome = router
            .route_command(&invocation("ping", &[ADMIN_ROLE], CommandArgs::default()), &responder)
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Ignored);
        assert!(responder.events().is_empty());
    }

    #[tokio::test]
    async fn test_ping_defers_then_replies() {
        let router = router().await;
        let responder = RecordingResponder::default();

        let outcome = router
            .route_command(&invocation("ping", &[], CommandArgs::default()), &responder)
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Completed);
        let events = responder.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], Recorded::Deferred { ephemeral: false });
        assert_eq!(responder.single_reply().title, "Pong!");
    }

    #[tokio::test]
    async fn test_dispatch_is_case_insensitive() {
        let router = router().await;
        let responder = RecordingResponder::default();

        let outcome = router
            .route_command(&invocation("PiNg", &[], CommandArgs::default()), &responder)
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Completed);
        assert_eq!(responder.single_reply().title, "Pong!");
    }

    #[tokio::test]
    async fn test_denied_without_tier_role() {
        let router = router().await;
        let responder = RecordingResponder::default();

        let outcome = router
            .route_command(
                &invocation("reload", &[FETCH_ROLE, OTHER_ROLE], CommandArgs::default()),
                &responder,
            )
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Denied);
        assert_eq!(responder.events()[0], Recorded::Deferred { ephemeral: true });
        let reply = responder.single_reply();
        assert_eq!(reply.title, "No Permission");
        assert_eq!(reply.description, "You don't have permission to run this command");
        assert_eq!(reply.kind, EmbedKind::Error);
    }

    #[tokio::test]
    async fn test_designate_role_does_not_grant_fetch() {
        let router = router().await;
        let responder = RecordingResponder::default();
        let args = CommandArgs::default().with("id", 156);

        let outcome = router
            .route_command(&invocation("designation", &[DESIGNATE_ROLE], args), &responder)
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Denied);
    }

    #[tokio::test]
    async fn test_handler_failure_gets_generic_reply() {
        let router = InteractionRouter::new(
            test_context(misbehaving_handlers).await,
            Duration::from_secs(5),
        );
        let responder = RecordingResponder::default();

        let outcome = router
            .route_command(&invocation("explode", &[], CommandArgs::default()), &responder)
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Failed);
        let reply = responder.single_reply();
        assert_eq!(reply.title, "Error");
        assert!(reply.description.starts_with("There was an error"));
    }

    #[tokio::test]
    async fn test_slow_handler_times_out() {
        let router = InteractionRouter::new(
            test_context(misbehaving_handlers).await,
            Duration::from_millis(20),
        );
        let responder = RecordingResponder::default();

        let outcome = router
            .route_command(&invocation("slow", &[FETCH_ROLE], CommandArgs::default()), &responder)
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::TimedOut);
        assert_eq!(responder.single_reply().title, "Timed Out");
    }

    #[tokio::test]
    async fn test_button_press_marks_record() {
        let router = router().await;
        let responder = RecordingResponder::default();

        let outcome = router
            .route_component(&button_press("designate:156", &[DESIGNATE_ROLE]), &responder)
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Completed);
        assert_eq!(responder.single_reply().title, "Designation Successful");
        assert!(router.context().designations.is_marked(156).await.unwrap());
    }

    #[tokio::test]
    async fn test_reply_before_timeout_is_kept() {
        let router = misbehaving_router(Duration::from_millis(20)).await;
        let responder = RecordingResponder::default();

        let outcome = router
            .route_command(&invocation("linger", &[], CommandArgs::default()), &responder)
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::TimedOut);
        assert_eq!(reply_titles(&responder), vec!["Done"]);
    }

    #[tokio::test]
    async fn test_reply_before_error_is_kept() {
        let router = misbehaving_router(Duration::from_secs(5)).await;
        let responder = RecordingResponder::default();

        let outcome = router
            .route_command(&invocation("halfway", &[], CommandArgs::default()), &responder)
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Failed);
        assert_eq!(reply_titles(&responder), vec!["Partial"]);
    }

    #[tokio::test]
    async fn test_handler_without_reply_gets_generic_reply() {
        let router = misbehaving_router(Duration::from_secs(5)).await;
        let responder = RecordingResponder::default();

        let outcome = router
            .route_command(&invocation("silent", &[], CommandArgs::default()), &responder)
            .await
            .unwrap();

        assert_eq!(outcome, RouteOutcome::Failed);
        assert_eq!(responder.single_reply().title, "Error");
    }

    #[tokio::test]
    async fn test_startup_is_claimed_once() {
        let router = router().await;
        assert!(router.claim_startup());
        assert!(!router.claim_startup());
        assert!(!router.claim_startup());
    }
}

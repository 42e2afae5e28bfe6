//! Composition root: wires the store, hook, dialog and survey post renderer
//! into the host registry and keeps the renderer registration in step with
//! the available width.

use crate::client::PluginClient;
use crate::config::PluginConfig;
use crate::confirm_modal::ConfirmFeedbackModal;
use crate::confirmation::ConfirmationCoordinator;
use crate::hooks::FeedbackHook;
use crate::host::{ComponentId, HostState, MenuAction, Registry, Router};
use crate::routing::navigate_to_channel;
use crate::store::{StateSubscriber, Store, SubscriptionId};
use crate::survey_post::SurveyPostView;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::{debug, info, warn};
use npscore::layout::LayoutSignals;
use npscore::net::HttpClient;
use npscore::state::StateSnapshot;
use npscore::types::{POST_NPS_SURVEY, Post};
use std::sync::{Arc, Mutex};

pub const GIVE_FEEDBACK_LABEL: &str = "Give feedback";

fn layout_signals(host: &dyn HostState, snapshot: &StateSnapshot) -> LayoutSignals {
    snapshot.layout_signals(
        host.display_setting(),
        host.is_sidebar_open(),
        host.team_count(),
    )
}

#[derive(Debug, Default)]
struct Registration {
    registered: bool,
    component_id: Option<ComponentId>,
}

/// Registers the survey post renderer while there is room for it and
/// unregisters it when there is not. Only transitions touch the registry.
pub struct SurveyPostRegistrar {
    registry: Arc<dyn Registry>,
    host: Arc<dyn HostState>,
    registration: Mutex<Registration>,
}

impl SurveyPostRegistrar {
    pub fn new(registry: Arc<dyn Registry>, host: Arc<dyn HostState>) -> Self {
        Self {
            registry,
            host,
            registration: Mutex::new(Registration::default()),
        }
    }

    pub fn is_registered(&self) -> bool {
        self.lock().registered
    }

    pub fn sync(&self, snapshot: &StateSnapshot) {
        let signals = layout_signals(self.host.as_ref(), snapshot);
        if signals.use_survey_post() {
            self.register(&signals);
        } else {
            self.unregister(&signals);
        }
    }

    fn register(&self, signals: &LayoutSignals) {
        {
            let mut registration = self.lock();
            if registration.registered {
                return;
            }
            // Flag first: the registry may notify the store, which lands back here.
            registration.registered = true;
        }

        info!(
            "Registering survey post renderer (window width {})",
            signals.window_width
        );
        let id = self.registry.register_post_type_component(POST_NPS_SURVEY);

        let stale = {
            let mut registration = self.lock();
            if registration.registered {
                registration.component_id = Some(id);
                None
            } else {
                Some(id)
            }
        };
        if let Some(id) = stale {
            self.registry.unregister_post_type_component(&id);
        }
    }

    fn unregister(&self, signals: &LayoutSignals) {
        let id = {
            let mut registration = self.lock();
            if !registration.registered {
                return;
            }
            registration.registered = false;
            registration.component_id.take()
        };

        info!(
            "Unregistering survey post renderer (window width {})",
            signals.window_width
        );
        if let Some(id) = id {
            self.registry.unregister_post_type_component(&id);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registration> {
        self.registration
            .lock()
            .expect("Mutex should not be poisoned")
    }
}

impl StateSubscriber for SurveyPostRegistrar {
    fn on_state_change(&self, snapshot: &StateSnapshot) {
        self.sync(snapshot);
    }
}

/// The "Give feedback" menu entry.
pub struct GiveFeedbackAction {
    client: Arc<PluginClient>,
    host: Arc<dyn HostState>,
    router: Arc<dyn Router>,
}

#[async_trait]
impl MenuAction for GiveFeedbackAction {
    async fn on_click(&self) {
        if self.host.current_user_id().is_none() {
            debug!("Ignoring give feedback request without a session");
            return;
        }

        let response = match self.client.user_wants_to_give_feedback().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to start feedback conversation: {e}");
                return;
            }
        };

        let Some(channel) = self.host.channel(&response.channel_id) else {
            warn!("Feedback channel {} not found", response.channel_id);
            return;
        };
        navigate_to_channel(
            self.router.as_ref(),
            &self.host.current_relative_team_url(),
            &channel.name,
        );
    }
}

pub struct Plugin {
    config: PluginConfig,
    registry: Arc<dyn Registry>,
    host: Arc<dyn HostState>,
    store: Arc<Store>,
    client: Arc<PluginClient>,
    confirmations: ConfirmationCoordinator,
    modal: Arc<ConfirmFeedbackModal>,
    registrar: Arc<SurveyPostRegistrar>,
    give_feedback: Arc<GiveFeedbackAction>,
    subscription: Mutex<Option<SubscriptionId>>,
}

impl Plugin {
    pub fn builder() -> PluginBuilder {
        PluginBuilder::new()
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<Store> {
        self.store.clone()
    }

    pub fn confirmations(&self) -> ConfirmationCoordinator {
        self.confirmations.clone()
    }

    pub fn modal(&self) -> Arc<ConfirmFeedbackModal> {
        self.modal.clone()
    }

    pub fn is_survey_post_registered(&self) -> bool {
        self.registrar.is_registered()
    }

    pub fn layout_signals(&self) -> LayoutSignals {
        layout_signals(self.host.as_ref(), &self.store.snapshot())
    }

    /// Registers everything with the host, applies the current window width
    /// and announces the session to the server.
    pub async fn initialize(&self, window_width: u32) {
        self.registry
            .register_state(&self.config.state_key(), self.store.clone());

        let hook = FeedbackHook::new(
            self.host.clone(),
            self.confirmations.clone(),
            self.config.feedback_bot_username.as_str(),
        );
        self.registry
            .register_message_will_be_posted_hook(Arc::new(hook));
        self.registry.register_root_component(self.modal.clone());
        self.registry.register_user_guide_dropdown_menu_action(
            GIVE_FEEDBACK_LABEL,
            self.give_feedback.clone(),
        );

        let id = self.store.subscribe(self.registrar.clone());
        if let Some(previous) = self
            .subscription
            .lock()
            .expect("Mutex should not be poisoned")
            .replace(id)
        {
            self.store.unsubscribe(previous);
        }

        self.on_window_resize(window_width);
        info!("Plugin {} initialized", self.config.plugin_id);

        self.send_connected().await;
    }

    pub fn on_window_resize(&self, window_width: u32) {
        self.store.window_resized(window_width);
    }

    /// Call when the display setting, sidebar state or team membership changes.
    pub fn on_host_state_change(&self) {
        self.registrar.sync(&self.store.snapshot());
    }

    pub async fn on_give_feedback_click(&self) {
        self.give_feedback.on_click().await;
    }

    pub fn survey_post_view(&self, post: Post, is_rhs: bool) -> SurveyPostView {
        SurveyPostView::for_context(
            post,
            &self.layout_signals(),
            is_rhs,
            self.config.side_panel_mode,
        )
    }

    pub fn uninitialize(&self) {
        if let Some(id) = self
            .subscription
            .lock()
            .expect("Mutex should not be poisoned")
            .take()
        {
            self.store.unsubscribe(id);
        }
        info!("Plugin {} uninitialized", self.config.plugin_id);
    }

    async fn send_connected(&self) {
        if self.host.current_user_id().is_none() {
            debug!("No session, skipping connected signal");
            return;
        }
        if let Err(e) = self.client.connected().await {
            warn!("Failed to send connected signal: {e}");
        }
    }
}

#[derive(Default)]
pub struct PluginBuilder {
    config: Option<PluginConfig>,
    registry: Option<Arc<dyn Registry>>,
    host: Option<Arc<dyn HostState>>,
    router: Option<Arc<dyn Router>>,
    http_client: Option<Arc<dyn HttpClient>>,
}

impl PluginBuilder {
    fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: PluginConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_registry(mut self, registry: Arc<dyn Registry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_host(mut self, host: Arc<dyn HostState>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_router(mut self, router: Arc<dyn Router>) -> Self {
        self.router = Some(router);
        self
    }

    pub fn with_http_client(mut self, http_client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn build(self) -> Result<Plugin> {
        let config = self.config.unwrap_or_default();
        let registry = self
            .registry
            .ok_or_else(|| anyhow!("Registry is required. Use with_registry()."))?;
        let host = self
            .host
            .ok_or_else(|| anyhow!("Host state is required. Use with_host()."))?;
        let router = self
            .router
            .ok_or_else(|| anyhow!("Router is required. Use with_router()."))?;
        let http_client = self
            .http_client
            .ok_or_else(|| anyhow!("HTTP client is required. Use with_http_client()."))?;

        let store = Arc::new(Store::new());
        let client = Arc::new(PluginClient::new(http_client, &config));
        let confirmations = ConfirmationCoordinator::new(store.clone());
        let modal = Arc::new(ConfirmFeedbackModal::new(confirmations.clone()));
        let registrar = Arc::new(SurveyPostRegistrar::new(registry.clone(), host.clone()));
        let give_feedback = Arc::new(GiveFeedbackAction {
            client: client.clone(),
            host: host.clone(),
            router,
        });

        Ok(Plugin {
            config,
            registry,
            host,
            store,
            client,
            confirmations,
            modal,
            registrar,
            give_feedback,
            subscription: Mutex::new(None),
        })
    }
}

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use nps_webapp::confirm_modal::ConfirmFeedbackModal;
use nps_webapp::hooks::MessageWillBePosted;
use nps_webapp::host::{ComponentId, HostState, MenuAction, Registry, Router};
use nps_webapp::net::{HttpClient, HttpRequest, HttpResponse};
use nps_webapp::store::Store;
use nps_webapp::types::{Channel, DM_CHANNEL, User};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const ME: &str = "user1";
pub const BOT: &str = "bot1";

pub struct FakeHost {
    pub current_user_id: Mutex<Option<String>>,
    pub channels: Mutex<HashMap<String, Channel>>,
    pub users: Mutex<HashMap<String, User>>,
    pub display: Mutex<String>,
    pub team_count: Mutex<usize>,
    pub sidebar_open: Mutex<bool>,
}

impl FakeHost {
    pub fn new() -> Self {
        let host = Self {
            current_user_id: Mutex::new(Some(ME.to_string())),
            channels: Mutex::new(HashMap::new()),
            users: Mutex::new(HashMap::new()),
            display: Mutex::new("clean".to_string()),
            team_count: Mutex::new(2),
            sidebar_open: Mutex::new(false),
        };
        host.add_user(ME, "user1");
        host.add_user(BOT, "feedbackbot");
        host.add_user("user2", "someone");
        host.add_channel(Channel {
            id: "town-square".to_string(),
            name: "town-square".to_string(),
            channel_type: "O".to_string(),
            teammate_id: None,
        });
        host.add_channel(direct_channel("bot-dm", ME, BOT));
        host.add_channel(direct_channel("user-dm", ME, "user2"));
        host
    }

    pub fn add_user(&self, id: &str, username: &str) {
        self.users.lock().unwrap().insert(
            id.to_string(),
            User {
                id: id.to_string(),
                username: username.to_string(),
            },
        );
    }

    pub fn add_channel(&self, channel: Channel) {
        self.channels
            .lock()
            .unwrap()
            .insert(channel.id.clone(), channel);
    }

    pub fn log_out(&self) {
        *self.current_user_id.lock().unwrap() = None;
    }
}

pub fn direct_channel(id: &str, a: &str, b: &str) -> Channel {
    Channel {
        id: id.to_string(),
        name: format!("{a}__{b}"),
        channel_type: DM_CHANNEL.to_string(),
        teammate_id: None,
    }
}

impl HostState for FakeHost {
    fn current_user_id(&self) -> Option<String> {
        self.current_user_id.lock().unwrap().clone()
    }

    fn channel(&self, channel_id: &str) -> Option<Channel> {
        self.channels.lock().unwrap().get(channel_id).cloned()
    }

    fn user(&self, user_id: &str) -> Option<User> {
        self.users.lock().unwrap().get(user_id).cloned()
    }

    fn message_display(&self) -> String {
        self.display.lock().unwrap().clone()
    }

    fn team_count(&self) -> usize {
        *self.team_count.lock().unwrap()
    }

    fn is_sidebar_open(&self) -> bool {
        *self.sidebar_open.lock().unwrap()
    }

    fn current_relative_team_url(&self) -> String {
        "/ad-1".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    RegisterPostType(String, ComponentId),
    UnregisterPostType(ComponentId),
    RootComponent,
    Hook,
    State(String),
    MenuAction(String),
}

#[derive(Default)]
pub struct FakeRegistry {
    pub calls: Mutex<Vec<RegistryCall>>,
    pub hook: Mutex<Option<Arc<dyn MessageWillBePosted>>>,
    pub menu_action: Mutex<Option<Arc<dyn MenuAction>>>,
    next_id: Mutex<u32>,
}

impl FakeRegistry {
    pub fn post_type_calls(&self) -> Vec<RegistryCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    RegistryCall::RegisterPostType(..) | RegistryCall::UnregisterPostType(_)
                )
            })
            .cloned()
            .collect()
    }

    pub fn hook(&self) -> Arc<dyn MessageWillBePosted> {
        self.hook.lock().unwrap().clone().expect("hook registered")
    }
}

impl Registry for FakeRegistry {
    fn register_post_type_component(&self, post_type: &str) -> ComponentId {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        let id = format!("component-{next}");
        self.calls
            .lock()
            .unwrap()
            .push(RegistryCall::RegisterPostType(post_type.to_string(), id.clone()));
        id
    }

    fn unregister_post_type_component(&self, component_id: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(RegistryCall::UnregisterPostType(component_id.to_string()));
    }

    fn register_root_component(&self, _modal: Arc<ConfirmFeedbackModal>) {
        self.calls.lock().unwrap().push(RegistryCall::RootComponent);
    }

    fn register_message_will_be_posted_hook(&self, hook: Arc<dyn MessageWillBePosted>) {
        *self.hook.lock().unwrap() = Some(hook);
        self.calls.lock().unwrap().push(RegistryCall::Hook);
    }

    fn register_state(&self, key: &str, _store: Arc<Store>) {
        self.calls
            .lock()
            .unwrap()
            .push(RegistryCall::State(key.to_string()));
    }

    fn register_user_guide_dropdown_menu_action(&self, label: &str, action: Arc<dyn MenuAction>) {
        *self.menu_action.lock().unwrap() = Some(action);
        self.calls
            .lock()
            .unwrap()
            .push(RegistryCall::MenuAction(label.to_string()));
    }
}

#[derive(Default)]
pub struct FakeRouter {
    pub paths: Mutex<Vec<String>>,
}

impl Router for FakeRouter {
    fn push(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// Answers requests from a table of `url -> (status, body)`; unknown URLs fail
/// at the transport level.
#[derive(Default)]
pub struct FakeHttp {
    pub requests: Mutex<Vec<HttpRequest>>,
    pub responses: Mutex<HashMap<String, (u16, String)>>,
}

impl FakeHttp {
    pub fn respond(&self, url: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), (status, body.to_string()));
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }
}

#[async_trait]
impl HttpClient for FakeHttp {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let response = self.responses.lock().unwrap().get(&request.url).cloned();
        match response {
            Some((status_code, body)) => Ok(HttpResponse {
                status_code,
                body: body.into_bytes(),
            }),
            None => Err(anyhow::anyhow!("connection refused")),
        }
    }
}

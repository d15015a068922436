use std::rc::Rc;

use dioxus::prelude::*;

use crate::hooks::api_client;
use crate::services::storage::SessionStore;
use crate::wizard::{
    ProfileEdit, WizardOutcome, WizardState, STATUS_PLANNING, STATUS_PREPARING, STATUS_WAITING,
};

const ERROR_NO_CLIENT: &str = "API 客户端未初始化";

/// Binds one wizard instance to the UI runtime. All transitions funnel
/// through here: the handle enforces the single-in-flight rule, paints the
/// loading state before suspending, and runs each step driver on a detached
/// copy of the state that is written back when the call settles. Tasks are
/// spawned in the panel's scope, so cancelling the wizard drops any
/// in-flight request with it.
#[derive(Clone, Copy)]
pub struct WizardHandle {
    pub state: Signal<WizardState>,
    on_complete: EventHandler<WizardOutcome>,
}

pub fn use_assessment_wizard(on_complete: EventHandler<WizardOutcome>) -> WizardHandle {
    let state = use_signal(WizardState::new);
    let handle = WizardHandle { state, on_complete };

    // Step 1 opens automatically with the synthesized greeting.
    use_future(move || async move {
        handle.run_start().await;
    });

    handle
}

impl WizardHandle {
    async fn run_start(self) {
        let mut sig = self.state;
        if !sig.peek().messages.is_empty() {
            return;
        }
        sig.write().begin(STATUS_PREPARING);

        let Some(client) = api_client() else {
            sig.write().fail(ERROR_NO_CLIENT);
            return;
        };
        let store = session_store();

        let mut state = sig.peek().clone();
        state.start(&client, store.as_ref()).await;
        sig.set(state);
    }

    pub fn send_message(&self, text: String) {
        let handle = *self;
        if handle.state.peek().is_loading {
            return;
        }
        spawn(async move {
            let mut sig = handle.state;
            {
                let mut state = sig.write();
                if !state.push_user_message(&text) {
                    return;
                }
                state.begin(STATUS_WAITING);
            }

            let Some(client) = api_client() else {
                sig.write().fail(ERROR_NO_CLIENT);
                return;
            };
            let store = session_store();

            let mut state = sig.peek().clone();
            state.exchange(&client, store.as_ref()).await;
            sig.set(state);
        });
    }

    /// Commits one profile edit; a committed edit triggers exactly one plan
    /// regeneration with the updated profile.
    pub fn edit_profile(&self, edit: ProfileEdit) {
        let handle = *self;
        if handle.state.peek().is_loading {
            return;
        }
        spawn(async move {
            let mut sig = handle.state;
            let store = session_store();

            if !sig.write().apply_profile_edit(edit, store.as_ref()) {
                return;
            }

            let Some(client) = api_client() else {
                sig.write().fail(ERROR_NO_CLIENT);
                return;
            };
            sig.write().begin(STATUS_PLANNING);

            let mut state = sig.peek().clone();
            state.regenerate_plan(&client, store.as_ref()).await;
            sig.set(state);
        });
    }

    /// "Generate Learning Plan": move on to topic selection.
    pub fn generate_plan(&self) {
        let handle = *self;
        if handle.state.peek().is_loading {
            return;
        }
        spawn(async move {
            let mut sig = handle.state;
            let Some(client) = api_client() else {
                sig.write().fail(ERROR_NO_CLIENT);
                return;
            };
            let store = session_store();
            sig.write().begin(STATUS_PLANNING);

            let mut state = sig.peek().clone();
            state.request_plan(&client, store.as_ref()).await;
            sig.set(state);
        });
    }

    pub fn select_topic(&self, day_number: u32) {
        let handle = *self;
        if handle.state.peek().is_loading {
            return;
        }
        spawn(async move {
            let mut sig = handle.state;
            let Some(client) = api_client() else {
                sig.write().fail(ERROR_NO_CLIENT);
                return;
            };
            let store = session_store();
            sig.write().begin_weekly_generation(day_number);

            let mut state = sig.peek().clone();
            let outcome = state.select_topic(day_number, &client, store.as_ref()).await;
            sig.set(state);

            if let Some(outcome) = outcome {
                handle.on_complete.call(outcome);
            }
        });
    }

    pub fn back_to_chat(&self) {
        let mut sig = self.state;
        sig.write().back_to_chat();
    }

    pub fn back_to_profile(&self) {
        let mut sig = self.state;
        sig.write().back_to_profile();
    }

    pub fn back_to_plan(&self) {
        let mut sig = self.state;
        sig.write().back_to_plan();
    }
}

#[cfg(target_arch = "wasm32")]
fn session_store() -> Rc<dyn SessionStore> {
    Rc::new(crate::services::storage::BrowserSessionStore)
}

// Native builds get an ephemeral store; only the browser build persists
// across reloads.
#[cfg(not(target_arch = "wasm32"))]
fn session_store() -> Rc<dyn SessionStore> {
    Rc::new(crate::services::storage::MemorySessionStore::default())
}

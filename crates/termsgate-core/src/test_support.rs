//! Mock host components shared by the unit tests in this crate.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use termsgate_contracts::{
    challenge::{ChallengeForm, FormSubmission},
    error::{GateError, GateResult},
    user::{UserId, ATTR_AGREED_PRIVACY, ATTR_AGREED_TOS},
};

use crate::traits::{HttpFetcher, RequiredActionContext, UserHandle};

/// A user whose every store operation is logged in order.
pub(crate) struct MockUser {
    id: UserId,
    username: String,
    pub(crate) attributes: Mutex<BTreeMap<String, String>>,
    pub(crate) required_actions: Mutex<Vec<String>>,
    pub(crate) ops: Mutex<Vec<String>>,
}

impl MockUser {
    pub(crate) fn new(username: &str) -> Self {
        Self {
            id: UserId::from(format!("id-{username}").as_str()),
            username: username.to_string(),
            attributes: Mutex::new(BTreeMap::new()),
            required_actions: Mutex::new(vec![]),
            ops: Mutex::new(vec![]),
        }
    }

    pub(crate) fn with_acceptance(self, tos: &str, privacy: &str) -> Self {
        {
            let mut attributes = self.attributes.lock().unwrap();
            attributes.insert(ATTR_AGREED_TOS.to_string(), tos.to_string());
            attributes.insert(ATTR_AGREED_PRIVACY.to_string(), privacy.to_string());
        }
        self
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.lock().unwrap().get(name).cloned()
    }

    pub(crate) fn actions(&self) -> Vec<String> {
        self.required_actions.lock().unwrap().clone()
    }

    pub(crate) fn op_log(&self) -> Vec<String> {
        self.ops.lock().unwrap().clone()
    }
}

impl UserHandle for MockUser {
    fn id(&self) -> &UserId {
        &self.id
    }

    fn username(&self) -> &str {
        &self.username
    }

    fn first_attribute(&self, name: &str) -> GateResult<Option<String>> {
        Ok(self.attribute(name))
    }

    fn set_single_attribute(&self, name: &str, value: &str) -> GateResult<()> {
        self.ops.lock().unwrap().push(format!("set {name}={value}"));
        self.attributes
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&self, name: &str) -> GateResult<()> {
        self.ops.lock().unwrap().push(format!("remove {name}"));
        self.attributes.lock().unwrap().remove(name);
        Ok(())
    }

    fn add_required_action(&self, action: &str) -> GateResult<()> {
        self.ops.lock().unwrap().push(format!("action {action}"));
        let mut actions = self.required_actions.lock().unwrap();
        if !actions.iter().any(|a| a == action) {
            actions.push(action.to_string());
        }
        Ok(())
    }
}

/// One request seen by `MockHttp`: url and headers.
pub(crate) type Request = (String, Vec<(String, String)>);

/// An HTTP fetcher whose reply can be swapped between calls. Every request
/// is recorded with its headers.
#[derive(Clone)]
pub(crate) struct MockHttp {
    pub(crate) reply: Arc<Mutex<Result<String, String>>>,
    pub(crate) requests: Arc<Mutex<Vec<Request>>>,
}

impl MockHttp {
    pub(crate) fn serving(tos: &str, privacy: &str) -> Self {
        Self::raw(&descriptor_json(tos, privacy))
    }

    /// Serve `body` exactly as given.
    pub(crate) fn raw(body: &str) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Ok(body.to_string()))),
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    pub(crate) fn unreachable() -> Self {
        Self {
            reply: Arc::new(Mutex::new(Err("connection refused".to_string()))),
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    pub(crate) fn publish(&self, tos: &str, privacy: &str) {
        *self.reply.lock().unwrap() = Ok(descriptor_json(tos, privacy));
    }

    pub(crate) fn go_down(&self) {
        *self.reply.lock().unwrap() = Err("connection refused".to_string());
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpFetcher for MockHttp {
    fn get(&self, url: &str, headers: &[(&str, &str)]) -> GateResult<Vec<u8>> {
        self.requests.lock().unwrap().push((
            url.to_string(),
            headers.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        ));
        match &*self.reply.lock().unwrap() {
            Ok(body) => Ok(body.as_bytes().to_vec()),
            Err(reason) => Err(GateError::Fetch {
                reason: reason.clone(),
            }),
        }
    }
}

fn descriptor_json(tos: &str, privacy: &str) -> String {
    serde_json::json!({ "tos": tos, "privacy": privacy }).to_string()
}

/// What the provider told the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Signal {
    Challenge(ChallengeForm),
    Success,
    Failure,
}

/// One interaction against a `MockUser`.
pub(crate) struct MockContext<'u> {
    pub(crate) user: &'u MockUser,
    pub(crate) form: FormSubmission,
    pub(crate) notes: BTreeMap<String, String>,
    pub(crate) signals: Vec<Signal>,
}

impl<'u> MockContext<'u> {
    pub(crate) fn new(user: &'u MockUser) -> Self {
        Self {
            user,
            form: FormSubmission::new(),
            notes: BTreeMap::new(),
            signals: vec![],
        }
    }

    pub(crate) fn last_form(&self) -> Option<&ChallengeForm> {
        self.signals.iter().rev().find_map(|s| match s {
            Signal::Challenge(form) => Some(form),
            _ => None,
        })
    }
}

impl RequiredActionContext for MockContext<'_> {
    fn user(&self) -> &dyn UserHandle {
        self.user
    }

    fn form_parameters(&self) -> FormSubmission {
        self.form.clone()
    }

    fn note(&self, key: &str) -> Option<String> {
        self.notes.get(key).cloned()
    }

    fn set_note(&mut self, key: &str, value: String) {
        self.notes.insert(key.to_string(), value);
    }

    fn remove_note(&mut self, key: &str) {
        self.notes.remove(key);
    }

    fn challenge(&mut self, form: ChallengeForm) {
        self.signals.push(Signal::Challenge(form));
    }

    fn success(&mut self) {
        self.signals.push(Signal::Success);
    }

    fn failure(&mut self) {
        self.signals.push(Signal::Failure);
    }
}

//! Scripted `TextGenerator` for tests. Responses are queued per system prompt,
//! so concurrently running steps never steal each other's replies.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{LlmError, TextGenerator};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail,
    /// Never resolves. Used to exercise deadlines and cancellation.
    Hang,
}

impl Reply {
    pub fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }
}

#[derive(Default)]
struct Script {
    queued: VecDeque<Reply>,
    /// Served once the queue is drained. `None` means fail.
    repeat: Option<Reply>,
}

#[derive(Default)]
pub struct ScriptedGenerator {
    scripts: Mutex<HashMap<String, Script>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues replies for calls made with `system`, served in order.
    pub fn script(self, system: &str, replies: Vec<Reply>) -> Self {
        self.with_script(system, |s| s.queued.extend(replies))
    }

    /// Serves `reply` for every call with `system` once the queue is drained.
    pub fn always(self, system: &str, reply: Reply) -> Self {
        self.with_script(system, |s| s.repeat = Some(reply))
    }

    fn with_script(self, system: &str, f: impl FnOnce(&mut Script)) -> Self {
        {
            let mut scripts = self.scripts.lock().unwrap();
            f(scripts.entry(system.to_string()).or_default());
        }
        self
    }

    /// Number of calls made with `system`.
    pub fn calls_for(&self, system: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| s == system)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// User prompts sent with `system`, in call order.
    pub fn user_prompts_for(&self, system: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| s == system)
            .map(|(_, u)| u.clone())
            .collect()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        system: &str,
        user: &str,
        _temperature: f32,
        _max_output_tokens: u32,
    ) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system.to_string(), user.to_string()));

        let reply = {
            let mut scripts = self.scripts.lock().unwrap();
            scripts
                .get_mut(system)
                .and_then(|s| s.queued.pop_front().or_else(|| s.repeat.clone()))
        };

        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Hang) => std::future::pending().await,
            Some(Reply::Fail) | None => Err(LlmError::Api {
                status: 529,
                message: "scripted failure".to_string(),
            }),
        }
    }
}

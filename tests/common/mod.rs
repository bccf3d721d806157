use async_trait::async_trait;
use schema_inputs_cli::{CollectError, Prompt, PromptEngine};
use serde_json::Value;
use std::collections::VecDeque;

/// What the scripted user does at the next prompt
pub enum Reply {
    Answer(Value),
    Cancel,
}

/// Prompt engine that replays canned replies and records every prompt it sees
#[derive(Default)]
pub struct ScriptedEngine {
    replies: VecDeque<Reply>,
    pub asked: Vec<Prompt>,
    pub shown: Vec<(String, String)>,
}

impl ScriptedEngine {
    pub fn new(replies: Vec<Reply>) -> Self {
        ScriptedEngine {
            replies: replies.into(),
            ..Default::default()
        }
    }

    pub fn answers(values: Vec<Value>) -> Self {
        Self::new(values.into_iter().map(Reply::Answer).collect())
    }

    pub fn messages(&self) -> Vec<&str> {
        self.asked.iter().map(|p| p.message.as_str()).collect()
    }
}

#[async_trait]
impl PromptEngine for ScriptedEngine {
    async fn ask(&mut self, prompt: &Prompt) -> Result<Value, CollectError> {
        self.asked.push(prompt.clone());
        match self.replies.pop_front() {
            Some(Reply::Answer(value)) => Ok(value),
            Some(Reply::Cancel) | None => Err(CollectError::Cancelled),
        }
    }

    fn show(&mut self, label: &str, value: &str) -> Result<(), CollectError> {
        self.shown.push((label.to_string(), value.to_string()));
        Ok(())
    }
}

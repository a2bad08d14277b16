use anyhow::Result;
use async_trait::async_trait;
use std::any::Any;

#[async_trait]
pub trait CompletionProvider: Any + Send + Sync {
    async fn new(api_key: String, system_message: String) -> Result<Self>
    where
        Self: Sized;

    /// Free-form text completion.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Completion with the endpoint's JSON response mode enabled. The
    /// returned text is still raw and may carry a markdown fence.
    async fn complete_json(&self, prompt: &str) -> Result<String>;

    async fn get_model_info(&self) -> Result<String>;

    fn get_system_message(&self) -> String;

    fn get_api_key(&self) -> &String;

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync>;
}

impl Clone for Box<dyn CompletionProvider + Send + Sync> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

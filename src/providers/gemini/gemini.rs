use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::env;

use crate::config::ProviderConfig;
use crate::providers::traits::CompletionProvider;

#[derive(Clone)]
pub struct GeminiProvider {
    api_key: String,
    system_message: String,
    client: Client,
    api_url: String,
    model: String,
    temperature: f32,
}

impl GeminiProvider {
    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.api_url, self.model)
    }

    async fn generate(&self, prompt: &str, generation_config: Option<Value>) -> Result<String> {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{
                    "text": format!("{}\n{}", self.system_message, prompt)
                }]
            }]
        });

        let mut config = json!({ "temperature": self.temperature });
        if let Some(extra) = generation_config {
            if let (Some(config_map), Some(extra_map)) = (config.as_object_mut(), extra.as_object())
            {
                config_map.extend(extra_map.clone());
            }
        }
        body["generationConfig"] = config;

        log::debug!("Sending generateContent request to model {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Gemini API request failed with status: {}",
                response.status()
            ));
        }

        let response_json: Value = response.json().await?;

        response_json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("Invalid response format"))
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn new(api_key: String, system_message: String) -> Result<Self> {
        let config = ProviderConfig::from_env("gemini");
        let model =
            env::var("GEMINI_MODEL").unwrap_or_else(|_| config.default_model().to_string());

        Ok(Self {
            api_key,
            system_message,
            client: Client::new(),
            api_url: config.api_url,
            model,
            temperature: config.temperature,
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate(prompt, None).await
    }

    async fn complete_json(&self, prompt: &str) -> Result<String> {
        self.generate(prompt, Some(json!({ "responseMimeType": "application/json" })))
            .await
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok(self.model.clone())
    }

    fn get_system_message(&self) -> String {
        self.system_message.clone()
    }

    fn get_api_key(&self) -> &String {
        &self.api_key
    }

    fn clone_box(&self) -> Box<dyn CompletionProvider + Send + Sync> {
        Box::new(self.clone())
    }
}

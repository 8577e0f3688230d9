use std::env;

use crate::prompt;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub db_path: String,
    pub api_hostname: String,
    pub primary_model: String,
    pub fallback_model: String,
    pub max_output_tokens: u32,
    pub persona: String,
    pub summary_persona: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let storage_path = env::var("DAVINCI_STORAGE_PATH").unwrap_or("./".to_string());
        let db_path = format!("{}/db", storage_path);
        let api_hostname = env::var("DAVINCI_API_HOSTNAME")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string());
        let primary_model =
            env::var("DAVINCI_PRIMARY_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string());
        let fallback_model =
            env::var("DAVINCI_FALLBACK_MODEL").unwrap_or_else(|_| "gemini-2.5-pro".to_string());
        let persona =
            env::var("DAVINCI_PERSONA").unwrap_or_else(|_| prompt::DAVINCI_PERSONA.to_string());

        Self {
            storage_path,
            db_path,
            api_hostname,
            primary_model,
            fallback_model,
            max_output_tokens: 1000,
            persona,
            summary_persona: prompt::SUMMARY_PERSONA.to_string(),
        }
    }
}

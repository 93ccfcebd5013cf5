use anyhow::Result;
use dialoguer::{Input, Password};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read input: {}", e))
}

/// Prompt for a password (masked input)
pub fn prompt_password(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read password: {}", e))
}

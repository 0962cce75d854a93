use anyhow::{Result, bail};
use std::path::Path;

use crate::Context;
use crate::cli::ConfigCommand;
use crate::config::{Config, TOKEN_ENV, config_path};
use crate::ui;

pub fn run(ctx: &Context, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Init {
            url,
            token_env,
            force,
        } => init(&config_path()?, url, token_env, force),
    }
}

fn show(ctx: &Context) -> Result<()> {
    ui::header("Configuration");

    let path = config_path()?;
    println!();
    if path.exists() {
        ui::kv("Config file", &path.display().to_string());
    } else {
        ui::kv("Config file", &format!("{} (not found)", path.display()));
    }

    let config = &ctx.config;
    ui::kv(
        "Environment URL",
        config.environment_url.as_deref().unwrap_or("(not set)"),
    );
    ui::kv("API token", &mask(config.api_token.as_deref()));
    ui::kv(
        "Token variable",
        config.api_token_env.as_deref().unwrap_or(TOKEN_ENV),
    );
    ui::kv(
        "Timeout",
        &config
            .timeout_secs
            .map_or_else(|| "none".to_string(), |secs| format!("{secs}s")),
    );
    ui::kv(
        "Creation polling",
        &format!(
            "{} attempts, {}s apart",
            config.poll.attempts, config.poll.delay_secs
        ),
    );
    Ok(())
}

fn init(path: &Path, url: String, token_env: String, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite it",
            path.display()
        );
    }
    let config = Config {
        environment_url: Some(url),
        api_token_env: Some(token_env),
        ..Config::default()
    };
    config.save_to(path)?;
    ui::success(&format!("Wrote {}", path.display()));
    Ok(())
}

/// Show only the token's prefix.
fn mask(token: Option<&str>) -> String {
    match token {
        None => "(not set)".to_string(),
        Some(token) if token.chars().count() <= 8 => "********".to_string(),
        Some(token) => {
            let visible = token.find('.').unwrap_or(4).min(8);
            let prefix: String = token.chars().take(visible).collect();
            format!("{prefix}********")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mask_hides_secret() {
        assert_eq!(mask(None), "(not set)");
        assert_eq!(mask(Some("short")), "********");
        assert_eq!(mask(Some("dt0c01.ABCDEFGH.SECRET")), "dt0c01********");
        assert_eq!(mask(Some("abcdefghijkl")), "abcd********");
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        init(&path, "https://a".to_string(), TOKEN_ENV.to_string(), false).unwrap();
        assert!(init(&path, "https://b".to_string(), TOKEN_ENV.to_string(), false).is_err());

        init(&path, "https://b".to_string(), "OTHER".to_string(), true).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.environment_url.as_deref(), Some("https://b"));
        assert_eq!(config.api_token_env.as_deref(), Some("OTHER"));
    }
}

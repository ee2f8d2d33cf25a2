//! CLI subcommand handlers
//!
//! One-shot versions of the workflow steps, for scripting.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use models::{BrandData, GenerateLogoRequest, GeneratedLogo, Tone, download_filename};
use uuid::Uuid;

use crate::{api::ApiClient, config::Config, output::OutputHandler, session::normalize_color};

/// Brand fields accepted by `brandmark concepts`.
pub struct BrandArgs {
    pub name: String,
    pub description: String,
    pub colors: Vec<String>,
    pub tone: Option<String>,
    pub industry: Option<String>,
    pub audience: Option<String>,
}

impl BrandArgs {
    pub fn into_brand(self) -> Result<BrandData> {
        let mut colors: Vec<String> = Vec::new();
        for color in &self.colors {
            let color = normalize_color(color)?;
            if !colors.contains(&color) {
                colors.push(color);
            }
        }
        let tone = match self.tone {
            Some(tone) => tone.parse::<Tone>()?,
            None => Tone::Unset,
        };
        Ok(BrandData {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            colors,
            tone,
            industry: self.industry.unwrap_or_default(),
            target_audience: self.audience.unwrap_or_default(),
        })
    }
}

/// Writes downloaded bytes under `dir`, creating it if needed.
pub fn save_download(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(filename);
    std::fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

pub async fn health(api: &ApiClient) -> Result<()> {
    let output = OutputHandler::default();
    output.print_header("Brandmark Status");

    match api.health().await {
        Ok(health) => output.print_success(&format!(
            "Server: {} ({}, v{})",
            api.base_url(),
            health.status,
            health.version
        )),
        Err(e) => output.print_error(&format!("Server: {} ({})", api.base_url(), e)),
    }

    println!();
    println!("  {} {}", "Version:".dimmed(), env!("CARGO_PKG_VERSION"));
    println!("  {} {}", "Config:".dimmed(), Config::config_path().display());
    Ok(())
}

pub async fn concepts(api: &ApiClient, args: BrandArgs) -> Result<()> {
    let brand = args.into_brand()?;
    if !brand.has_basic_info() {
        anyhow::bail!("Brand name and description are required");
    }

    let output = OutputHandler::default();
    output.print_preview(&brand);

    let prompts = api.generate_prompts(&brand).await?;
    output.print_header("Logo Concepts");
    for (i, prompt) in prompts.iter().enumerate() {
        println!("  {} {}", format!("{}.", i + 1).bright_cyan(), prompt);
    }
    Ok(())
}

pub async fn logo(
    api: &ApiClient,
    config: &Config,
    prompt: String,
    brand_name: Option<String>,
    download: bool,
) -> Result<()> {
    if prompt.trim().is_empty() {
        anyhow::bail!("Prompt is required");
    }
    let output = OutputHandler::default();
    output.print_info("Generating logo...");

    let request = GenerateLogoRequest { prompt, brand_name };
    let response = api
        .generate_logo(&request)
        .await
        .map_err(|e| anyhow::anyhow!(e.logo_message()))?;
    let logo = GeneratedLogo::from(response);

    output.print_success(&format!("Logo {} created", &logo.id[..8]));
    println!("  {} {}", "url:".dimmed(), logo.image_url);

    if download {
        let bytes = api.download_logo(&logo).await?;
        let path = save_download(&config.download_dir(), &logo.download_filename(), &bytes)?;
        output.print_success(&format!("Saved {}", path.display()));
    } else {
        println!(
            "  {} {}",
            "download:".dimmed(),
            api.download_url(&logo.image_url, &logo.download_filename())
        );
    }
    Ok(())
}

/// Downloads an already generated image through the server proxy.
pub async fn download(
    api: &ApiClient,
    config: &Config,
    image_url: String,
    filename: Option<String>,
    brand_name: Option<String>,
) -> Result<()> {
    let filename = filename.unwrap_or_else(|| {
        download_filename(brand_name.as_deref().unwrap_or("Brand"), &url_id(&image_url))
    });

    let bytes = api.download(&image_url, &filename).await?;
    let path = save_download(&config.download_dir(), &filename, &bytes)?;
    OutputHandler::default().print_success(&format!(
        "Saved {} ({} bytes)",
        path.display(),
        bytes.len()
    ));
    Ok(())
}

/// Name-based (v5) UUID of an image URL, so repeat downloads reuse a filename.
fn url_id(url: &str) -> String {
    let id = Uuid::new_v5(&Uuid::NAMESPACE_URL, url.as_bytes()).simple().to_string();
    id[..8].to_string()
}

pub fn show_config(config: &Config) -> Result<()> {
    let output = OutputHandler::default();
    output.print_header("Configuration");
    println!("  {} {}", "File:".dimmed(), Config::config_path().display());
    println!();
    for key in Config::keys() {
        println!(
            "  {:<22} {}",
            key.bright_white(),
            config.get(key).unwrap_or_default()
        );
    }
    Ok(())
}

pub fn set_config(config: &mut Config, kv: &str) -> Result<()> {
    let (key, value) = kv
        .split_once('=')
        .context("Expected key=value, e.g. server.url=http://localhost:3002")?;
    config.set(key.trim(), value)?;
    config.save()?;
    OutputHandler::default().print_success(&format!("Set {}", key.trim()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> BrandArgs {
        BrandArgs {
            name: " Acme ".into(),
            description: "Rockets".into(),
            colors: vec!["#3b82f6".into(), "3B82F6".into(), "#fff".into()],
            tone: Some("Bold".into()),
            industry: None,
            audience: Some("Hobbyists".into()),
        }
    }

    #[test]
    fn test_brand_args_normalize() {
        let brand = args().into_brand().unwrap();
        assert_eq!(brand.name, "Acme");
        assert_eq!(brand.colors, vec!["#3B82F6", "#FFF"]);
        assert_eq!(brand.tone, Tone::Bold);
        assert_eq!(brand.industry, "");
        assert_eq!(brand.target_audience, "Hobbyists");
    }

    #[test]
    fn test_brand_args_reject_bad_input() {
        let mut bad_color = args();
        bad_color.colors = vec!["blue".into()];
        assert!(bad_color.into_brand().is_err());

        let mut bad_tone = args();
        bad_tone.tone = Some("grunge".into());
        assert!(bad_tone.into_brand().is_err());
    }

    #[test]
    fn test_save_download_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("logos");
        let path = save_download(&target, "acme-logo-1.png", b"png").unwrap();

        assert_eq!(path, target.join("acme-logo-1.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"png");
    }

    #[test]
    fn test_url_id_is_stable() {
        let a = url_id("https://oaidalleapiprodscus.blob.core.windows.net/a.png");
        assert_eq!(a.len(), 8);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        let full = Uuid::new_v5(
            &Uuid::NAMESPACE_URL,
            b"https://oaidalleapiprodscus.blob.core.windows.net/a.png",
        );
        assert_eq!(full.get_version_num(), 5);
        assert!(full.simple().to_string().starts_with(&a));
        assert_eq!(a, url_id("https://oaidalleapiprodscus.blob.core.windows.net/a.png"));
        assert_ne!(a, url_id("https://oaidalleapiprodscus.blob.core.windows.net/b.png"));
    }
}

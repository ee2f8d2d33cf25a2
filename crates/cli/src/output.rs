//! Output formatting and terminal rendering
//!
//! Brand preview card, progress steps, concept and logo listings.

use colored::{ColoredString, Colorize};
use models::{BrandData, PREDEFINED_COLORS, Tone};

use crate::{progress::ProgressStep, session::BrandSession};

const DEFAULT_PRIMARY: &str = "#3B82F6";
const DEFAULT_SECONDARY: &str = "#6B7280";

/// `#RGB` or `#RRGGBB` to an RGB triple.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Everything the preview card shows, derived from the brand form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCard {
    pub monogram: char,
    pub title: String,
    pub tone_badge: Option<&'static str>,
    pub description: Option<String>,
    pub industry: Option<String>,
    pub audience: Option<String>,
    pub primary: String,
    pub secondary: String,
    pub palette: Vec<String>,
    pub basic_info: &'static str,
    pub colors_status: String,
    pub tone_status: String,
}

impl PreviewCard {
    /// `None` while name, description and colours are all empty.
    pub fn from_brand(brand: &BrandData) -> Option<Self> {
        if brand.name.is_empty() && brand.description.is_empty() && brand.colors.is_empty() {
            return None;
        }
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

        Some(Self {
            monogram: brand
                .name
                .chars()
                .next()
                .and_then(|c| c.to_uppercase().next())
                .unwrap_or('?'),
            title: non_empty(&brand.name).unwrap_or_else(|| "Brand Name".to_string()),
            tone_badge: brand.tone.is_set().then(|| brand.tone.label()),
            description: non_empty(&brand.description),
            industry: non_empty(&brand.industry),
            audience: non_empty(&brand.target_audience),
            primary: brand
                .colors
                .first()
                .cloned()
                .unwrap_or_else(|| DEFAULT_PRIMARY.to_string()),
            secondary: brand
                .colors
                .get(1)
                .cloned()
                .unwrap_or_else(|| DEFAULT_SECONDARY.to_string()),
            palette: brand.colors.clone(),
            basic_info: if brand.has_basic_info() {
                "Complete"
            } else {
                "Partial"
            },
            colors_status: if brand.colors.is_empty() {
                "None".to_string()
            } else {
                format!("{} selected", brand.colors.len())
            },
            tone_status: if brand.tone.is_set() {
                brand.tone.as_str().to_string()
            } else {
                "Not selected".to_string()
            },
        })
    }
}

/// Output handler for terminal display
pub struct OutputHandler {
    /// Paint colour swatches with 24-bit backgrounds.
    pub swatches: bool,
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new(true)
    }
}

impl OutputHandler {
    pub fn new(swatches: bool) -> Self {
        Self { swatches }
    }

    fn swatch(&self, hex: &str, text: &str) -> ColoredString {
        match hex_to_rgb(hex) {
            Some((r, g, b)) if self.swatches => text.on_truecolor(r, g, b).white().bold(),
            _ => text.normal(),
        }
    }

    pub fn print_banner(&self, server_url: &str) {
        println!();
        println!("{}", "╔══════════════════════════════════════════════╗".bright_cyan());
        println!("{}", "║          Brandmark: logo workshop            ║".bright_cyan());
        println!("{}", "╚══════════════════════════════════════════════╝".bright_cyan());
        println!("  {} {}", "Server:".dimmed(), server_url);
        println!("  {}", "Type 'help' for commands, 'quit' to exit.".dimmed());
        println!();
    }

    /// Print a section header
    pub fn print_header(&self, text: &str) {
        println!();
        println!("{}", format!("▶ {}", text).bright_yellow().bold());
        println!("{}", "─".repeat(60).dimmed());
    }

    pub fn print_success(&self, text: &str) {
        println!("{} {}", "✓".bright_green(), text.bright_white());
    }

    pub fn print_error(&self, text: &str) {
        println!("{} {}", "✗".bright_red(), text.bright_red());
    }

    pub fn print_warning(&self, text: &str) {
        println!("{} {}", "⚠".bright_yellow(), text.yellow());
    }

    pub fn print_info(&self, text: &str) {
        println!("{} {}", "ℹ".bright_blue(), text);
    }

    pub fn print_preview(&self, brand: &BrandData) {
        self.print_header("Brand Preview");
        let Some(card) = PreviewCard::from_brand(brand) else {
            println!("  {}", "Fill out the form to see your brand preview".dimmed());
            return;
        };

        let monogram = format!(" {} ", card.monogram);
        match card.tone_badge {
            Some(tone) => println!(
                "  {}  {}  {}",
                self.swatch(&card.primary, &monogram),
                card.title.bright_white().bold(),
                self.swatch(&card.secondary, &format!(" {} ", tone))
            ),
            None => println!(
                "  {}  {}",
                self.swatch(&card.primary, &monogram),
                card.title.bright_white().bold()
            ),
        }

        if let Some(description) = &card.description {
            println!("  {}", description);
        }
        if let Some(industry) = &card.industry {
            println!("  {} {}", "Industry:".dimmed(), industry);
        }
        if let Some(audience) = &card.audience {
            println!("  {} {}", "Target:".dimmed(), audience);
        }

        if !card.palette.is_empty() {
            println!();
            println!("  {}", "Color Palette".bright_white());
            let row: Vec<String> = card
                .palette
                .iter()
                .map(|c| format!("{} {}", self.swatch(c, "   "), c))
                .collect();
            println!("  {}", row.join("  "));
        }

        println!();
        println!("  {:<14} {}", "Basic Info".dimmed(), status(card.basic_info == "Complete", card.basic_info));
        println!(
            "  {:<14} {}",
            "Brand Colors".dimmed(),
            status(!brand.colors.is_empty(), &card.colors_status)
        );
        println!(
            "  {:<14} {}",
            "Brand Tone".dimmed(),
            status(brand.tone.is_set(), &card.tone_status)
        );
    }

    pub fn print_progress(&self, steps: &[ProgressStep]) {
        self.print_header("Progress");
        for (i, step) in steps.iter().enumerate() {
            let marker = if step.completed {
                "✓".bright_green()
            } else if step.current {
                "●".bright_cyan()
            } else {
                "○".dimmed()
            };
            let title = if step.current {
                step.title.bright_cyan().bold()
            } else if step.completed {
                step.title.bright_green()
            } else {
                step.title.dimmed()
            };
            println!("  {} {}. {}  {}", marker, i + 1, title, step.description.dimmed());
        }
    }

    pub fn print_palette_options(&self, brand: &BrandData) {
        self.print_header("Colors");
        for (i, color) in PREDEFINED_COLORS.iter().enumerate() {
            let mark = if brand.has_color(color) { "✓" } else { " " };
            print!("{} {} {}   ", mark.bright_green(), self.swatch(color, "  "), color);
            if i % 5 == 4 {
                println!();
            }
        }
        let custom: Vec<&String> = brand
            .colors
            .iter()
            .filter(|c| !PREDEFINED_COLORS.contains(&c.as_str()))
            .collect();
        if !custom.is_empty() {
            println!();
            for color in custom {
                println!("{} {} {} {}", "✓".bright_green(), self.swatch(color, "  "), color, "(custom)".dimmed());
            }
        }
    }

    pub fn print_tone_options(&self, current: Tone) {
        self.print_header("Tones");
        for tone in Tone::ALL {
            let mark = if tone == current { "●".bright_cyan() } else { "○".dimmed() };
            println!("  {} {:<13} {}", mark, tone.label(), tone.description().dimmed());
        }
    }

    pub fn print_prompts(&self, session: &BrandSession) {
        self.print_header("Logo Concepts");
        if session.generating_prompts {
            self.print_info("Generating concepts...");
        }
        if let Some(error) = &session.prompt_error {
            self.print_error(error);
        }
        if session.prompts.is_empty() {
            if session.can_generate_prompts() {
                println!("  {}", "No concepts yet. Run 'generate'.".dimmed());
            } else if !session.generating_prompts {
                println!("  {}", "Set a name and description first.".dimmed());
            }
            return;
        }
        for (i, prompt) in session.prompts.iter().enumerate() {
            let busy = if session.is_generating_logo(prompt) {
                " (generating logo...)".bright_yellow()
            } else {
                "".normal()
            };
            println!("  {} {}{}", format!("{}.", i + 1).bright_cyan(), prompt, busy);
        }
    }

    pub fn print_logos(&self, session: &BrandSession) {
        self.print_header(&format!("Generated Logos ({})", session.logos.len()));
        if !session.generating_logos.is_empty() {
            self.print_info(&format!(
                "{} logo(s) in progress",
                session.generating_logos.len()
            ));
        }
        if let Some(error) = &session.logo_error {
            self.print_error(error);
        }
        for logo in &session.logos {
            let short_id = &logo.id[..8.min(logo.id.len())];
            println!("  {} {}", short_id.bright_cyan(), logo.original_prompt.bright_white());
            println!("      {} {}", "file:".dimmed(), logo.download_filename().dimmed());
            println!("      {} {}", "url:".dimmed(), logo.image_url.dimmed());
        }
    }

    pub fn print_help(&self) {
        self.print_header("Commands");
        let rows = [
            ("name <text>", "Set the brand name"),
            ("description <text>", "Set the brand description"),
            ("industry <text>", "Set the industry"),
            ("audience <text>", "Set the target audience"),
            ("tone [name|none]", "Show or set the brand tone"),
            ("palette", "Show the predefined colors"),
            ("color <#hex>", "Toggle a color (custom colors are added)"),
            ("uncolor <#hex>", "Remove a color"),
            ("preview", "Show the brand preview card"),
            ("progress", "Show workflow progress"),
            ("generate", "Generate logo concepts"),
            ("prompts", "List logo concepts"),
            ("logo <n>", "Create a logo from concept n"),
            ("logos", "List generated logos"),
            ("download <id>", "Save a logo to the download directory"),
            ("remove <id>", "Remove a logo"),
            ("wait", "Wait for running requests to finish"),
            ("state", "Print the session as JSON"),
            ("reset", "Start over"),
            ("quit", "Exit"),
        ];
        for (command, help) in rows {
            println!("  {:<22} {}", command.bright_white(), help.dimmed());
        }
    }
}

fn status(ok: bool, text: &str) -> ColoredString {
    if ok { text.bright_green() } else { text.yellow() }
}

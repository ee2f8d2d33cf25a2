//! Interactive REPL for the brand workflow
//!
//! Reads commands and prints results. Session state and background requests
//! live in [`Workflow`], which is drained before every prompt.

use anyhow::Result;
use colored::Colorize;
use rustyline::{error::ReadlineError, history::DefaultHistory, Editor};

use crate::{
    api::ApiClient,
    commands::save_download,
    config::Config,
    output::OutputHandler,
    progress::progress_steps,
    session::{Applied, BrandField, ColorChange},
    workflow::Workflow,
};

pub struct BrandRepl {
    workflow: Workflow,
    config: Config,
    output: OutputHandler,
    editor: Editor<(), DefaultHistory>,
}

impl BrandRepl {
    pub fn new(api: ApiClient, config: Config) -> Result<Self> {
        Ok(Self {
            workflow: Workflow::new(api),
            config,
            output: OutputHandler::default(),
            editor: Editor::new()?,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.output.print_banner(self.workflow.api().base_url());
        if let Err(e) = self.workflow.api().health().await {
            self.output
                .print_warning(&format!("Server not reachable yet: {}", e));
        }

        loop {
            self.drain_events();
            let prompt = self.build_prompt();

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(input);

                    match self.handle_command(input).await {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(e) => self.output.print_error(&e.to_string()),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!();
                    self.output.print_info("Use 'quit' to exit.");
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(e) => {
                    self.output.print_error(&format!("Input error: {}", e));
                    break;
                }
            }
        }

        if self.workflow.session().is_busy() {
            self.output
                .print_warning("Leaving with requests still running; their results are discarded.");
        }
        Ok(())
    }

    fn build_prompt(&self) -> String {
        let session = self.workflow.session();
        let name = if session.brand.name.is_empty() {
            "brandmark".to_string()
        } else {
            session.brand.name.clone()
        };
        let busy = if session.is_busy() { "*" } else { "" };
        format!("{}{}> ", name.bright_cyan(), busy.bright_yellow())
    }

    /// Returns `true` when the REPL should exit.
    async fn handle_command(&mut self, input: &str) -> Result<bool> {
        let (command, rest) = input
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((input, ""));

        match command.to_lowercase().as_str() {
            "quit" | "exit" | "q" => return Ok(true),
            "help" | "?" => self.output.print_help(),
            "name" | "description" | "desc" | "industry" | "audience" => {
                let field: BrandField = command.parse()?;
                self.workflow.session_mut().set_field(field, rest);
                self.output
                    .print_success(&format!("{}: {}", field, display_or_cleared(rest)));
            }
            "tone" => {
                if rest.is_empty() {
                    self.output.print_tone_options(self.workflow.session().brand.tone);
                } else {
                    let tone = self.workflow.session_mut().set_tone(rest)?;
                    let label = if tone.is_set() { tone.label() } else { "cleared" };
                    self.output.print_success(&format!("Tone: {}", label));
                }
            }
            "palette" | "colors" => self
                .output
                .print_palette_options(&self.workflow.session().brand),
            "color" => self.handle_color(rest)?,
            "uncolor" => {
                if self.workflow.session_mut().remove_color(rest) {
                    self.output.print_success(&format!("Removed {}", rest));
                } else {
                    self.output.print_warning(&format!("{} is not selected", rest));
                }
            }
            "preview" => self.output.print_preview(&self.workflow.session().brand),
            "progress" => self.print_progress(),
            "generate" => self.start_prompt_generation()?,
            "prompts" | "concepts" => self.output.print_prompts(self.workflow.session()),
            "logo" => self.start_logo_generation(rest)?,
            "logos" => self.output.print_logos(self.workflow.session()),
            "download" => self.download(rest).await?,
            "remove" => {
                let logo = self.workflow.session_mut().remove_logo(rest)?;
                self.output
                    .print_success(&format!("Removed logo {}", short_id(&logo.id)));
            }
            "wait" => self.wait_for_requests().await,
            "state" => println!(
                "{}",
                serde_json::to_string_pretty(self.workflow.session())?
            ),
            "reset" => {
                self.workflow.session_mut().reset();
                self.output.print_success("Started over.");
            }
            other => {
                self.output
                    .print_warning(&format!("Unknown command: {} (try 'help')", other));
            }
        }
        Ok(false)
    }

    fn handle_color(&mut self, color: &str) -> Result<()> {
        if color.is_empty() {
            self.output
                .print_palette_options(&self.workflow.session().brand);
            return Ok(());
        }
        let message = match self.workflow.session_mut().select_color(color)? {
            ColorChange::Added(c) => format!("Added {}", c),
            ColorChange::AddedCustom(c) => format!("Added custom {}", c),
            ColorChange::Removed(c) => format!("Removed {}", c),
        };
        self.output.print_success(&message);
        Ok(())
    }

    fn print_progress(&self) {
        let session = self.workflow.session();
        let steps = progress_steps(&session.brand, &session.prompts);
        self.output.print_progress(&steps);
    }

    fn start_prompt_generation(&mut self) -> Result<()> {
        self.workflow.start_prompt_generation()?;
        self.output
            .print_info("Generating logo concepts... ('wait' to block until done)");
        Ok(())
    }

    fn start_logo_generation(&mut self, arg: &str) -> Result<()> {
        let number: usize = arg
            .parse()
            .map_err(|_| anyhow::anyhow!("Usage: logo <concept number>"))?;
        self.workflow.start_logo_generation(number)?;
        self.output
            .print_info(&format!("Generating logo for concept {}...", number));
        Ok(())
    }

    async fn download(&mut self, id: &str) -> Result<()> {
        let logo = self.workflow.session().find_logo(id)?.clone();
        let bytes = self.workflow.api().download_logo(&logo).await?;
        let path = save_download(
            &self.config.download_dir(),
            &logo.download_filename(),
            &bytes,
        )?;
        self.output
            .print_success(&format!("Saved {}", path.display()));
        Ok(())
    }

    fn drain_events(&mut self) {
        for applied in self.workflow.drain() {
            self.report(applied);
        }
    }

    async fn wait_for_requests(&mut self) {
        if !self.workflow.session().is_busy() {
            self.output.print_info("Nothing running.");
            return;
        }
        for applied in self.workflow.wait().await {
            self.report(applied);
        }
    }

    fn report(&self, applied: Applied) {
        match applied {
            Applied::Prompts(count) => {
                self.output
                    .print_success(&format!("{} logo concepts ready", count));
                self.output.print_prompts(self.workflow.session());
            }
            Applied::PromptsFailed(error) => self.output.print_error(&error),
            Applied::Logo(logo) => self.output.print_success(&format!(
                "Logo {} ready: {}",
                short_id(&logo.id),
                logo.original_prompt
            )),
            Applied::LogoFailed(error) => self.output.print_error(&error),
            Applied::Stale => {}
        }
    }
}

fn short_id(id: &str) -> &str {
    &id[..8.min(id.len())]
}

fn display_or_cleared(value: &str) -> &str {
    if value.is_empty() {
        "(cleared)"
    } else {
        value
    }
}

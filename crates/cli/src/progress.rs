//! Four-step progress indicator, derived from session data on every render.

use models::BrandData;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressStep {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub completed: bool,
    pub current: bool,
}

pub fn progress_steps(brand: &BrandData, prompts: &[String]) -> Vec<ProgressStep> {
    let has_prompts = !prompts.is_empty();

    vec![
        ProgressStep {
            id: "brand-info",
            title: "Brand Information",
            description: "Name, description, colors and tone",
            completed: brand.is_complete(),
            current: !brand.has_basic_info(),
        },
        ProgressStep {
            id: "generate-concepts",
            title: "Generate Concepts",
            description: "AI-written logo concept prompts",
            completed: has_prompts,
            current: brand.has_basic_info() && !has_prompts,
        },
        ProgressStep {
            id: "create-logos",
            title: "Create Logos",
            description: "Turn concepts into logo images",
            // Never marked completed: there is no agreed "done" condition yet.
            completed: false,
            current: has_prompts,
        },
        ProgressStep {
            id: "export",
            title: "Export & Use",
            description: "Download your logos as PNG files",
            completed: false,
            current: false,
        },
    ]
}

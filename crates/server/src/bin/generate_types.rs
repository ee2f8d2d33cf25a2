//! Writes TypeScript declarations for every API payload to `shared/types.ts`.

use std::{fs, path::PathBuf};

use models::{
    BrandData, DownloadLogoQuery, ErrorResponse, GenerateLogoRequest, GenerateLogoResponse,
    GeneratePromptsResponse, GeneratedLogo, HealthResponse, Tone,
};
use ts_rs::TS;

fn main() -> anyhow::Result<()> {
    let declarations = [
        Tone::decl(),
        BrandData::decl(),
        GeneratePromptsResponse::decl(),
        GenerateLogoRequest::decl(),
        GenerateLogoResponse::decl(),
        GeneratedLogo::decl(),
        DownloadLogoQuery::decl(),
        ErrorResponse::decl(),
        HealthResponse::decl(),
    ];

    let mut output = String::from(
        "// This file was generated by `cargo run --bin generate_types`. Do not edit.\n\n",
    );
    for decl in declarations {
        output.push_str("export ");
        output.push_str(&decl);
        output.push_str("\n\n");
    }

    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../shared/types.ts");
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, output)?;
    println!("Wrote {}", path.display());
    Ok(())
}

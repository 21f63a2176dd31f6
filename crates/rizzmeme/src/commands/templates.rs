use super::{GlobalArgs, Session};
use clap::Parser;
use rizzmeme::templates::CanvasSize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "List the template catalog and which images are present")]
pub struct TemplatesArgs {
    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct TemplateListing {
    id: &'static str,
    name: &'static str,
    image_path: &'static str,
    #[serde(flatten)]
    canvas_size: CanvasSize,
    overlays: usize,
    available: bool,
    resolved_path: Option<PathBuf>,
}

pub fn run(args: TemplatesArgs, global: &GlobalArgs) -> bool {
    match run_impl(args, global) {
        Ok(()) => true,
        Err(e) => {
            log::error!("[templates] {e:#}");
            false
        }
    }
}

fn run_impl(args: TemplatesArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let session = Session::open(global)?;
    let registry = session.registry();

    let listings: Vec<TemplateListing> = registry
        .catalog()
        .iter()
        .map(|t| {
            let resolved_path = registry.locator().locate(t.image_path);
            TemplateListing {
                id: t.id,
                name: t.name,
                image_path: t.image_path,
                canvas_size: t.canvas_size,
                overlays: t.overlays.len(),
                available: resolved_path.is_some(),
                resolved_path,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listings)?);
        return Ok(());
    }

    for listing in &listings {
        let status = match &listing.resolved_path {
            Some(path) => format!("✅ {}", path.display()),
            None => format!("❌ missing {}", listing.image_path),
        };
        println!(
            "{:<20} {:<22} {}x{}  {} overlays  {}",
            listing.id,
            listing.name,
            listing.canvas_size.width,
            listing.canvas_size.height,
            listing.overlays,
            status
        );
    }
    Ok(())
}

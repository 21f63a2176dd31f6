use super::{GlobalArgs, Session, write_output};
use anyhow::Context;
use clap::Parser;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use rizzmeme::templates::TemplateDescriptor;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Render templates for several scores at once")]
pub struct BatchArgs {
    /// Comma-separated scores to render
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "0,50,100",
        value_parser = clap::value_parser!(i32).range(0..=100)
    )]
    pub scores: Vec<i32>,

    /// Template id to render, repeatable [default: the whole catalog]
    #[arg(long = "template")]
    pub templates: Vec<String>,

    /// Directory to write `<template>_<score>.png` files into
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

pub fn run(args: BatchArgs, global: &GlobalArgs, multi_progress: MultiProgress) -> bool {
    match run_impl(args, global, multi_progress) {
        Ok(()) => true,
        Err(e) => {
            log::error!("[batch] {e:#}");
            false
        }
    }
}

fn run_impl(
    args: BatchArgs,
    global: &GlobalArgs,
    multi_progress: MultiProgress,
) -> anyhow::Result<()> {
    let session = Session::open(global)?;
    let registry = session.registry();

    // Explicit ids must exist; no random substitution in batch mode.
    let templates: Vec<&TemplateDescriptor> = if args.templates.is_empty() {
        registry.catalog().iter().collect()
    } else {
        args.templates
            .iter()
            .map(|id| {
                registry
                    .find(id)
                    .with_context(|| format!("Unknown template '{id}'"))
            })
            .collect::<anyhow::Result<_>>()?
    };

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| session.output_dir().to_path_buf());
    let compositor = session.compositor();

    let total = (templates.len() * args.scores.len()) as u64;
    let progress = multi_progress.add(ProgressBar::new(total));
    progress.set_style(ProgressStyle::with_template(
        "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )?);

    for template in &templates {
        for &score in &args.scores {
            progress.set_message(format!("{} @ {score}", template.id));
            let bytes = compositor
                .render(score, template)
                .with_context(|| format!("Failed to render '{}' at {score}", template.id))?;

            let path = output_dir.join(format!("{}_{score}.png", template.id));
            write_output(&path, &bytes)?;
            log::info!("Wrote {}", path.display());
            progress.inc(1);
        }
    }
    progress.finish_and_clear();

    println!(
        "[batch] ✅ Rendered {total} memes into {}",
        output_dir.display()
    );
    Ok(())
}

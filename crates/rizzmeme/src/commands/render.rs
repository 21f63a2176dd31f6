use super::{GlobalArgs, Session, write_output};
use anyhow::Context;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rizzmeme::RenderRequest;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about = "Render one meme for a rizz score")]
pub struct RenderArgs {
    /// Score printed on the meme
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..=100))]
    pub score: i32,

    /// Template id; unknown ids fall back to a random template
    #[arg(long)]
    pub template: Option<String>,

    /// Output PNG path [default: <output dir>/<template>_<score>.png]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seed for random template selection
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: RenderArgs, global: &GlobalArgs) -> bool {
    match run_impl(args, global) {
        Ok(()) => true,
        Err(e) => {
            log::error!("[render] {e:#}");
            false
        }
    }
}

fn run_impl(args: RenderArgs, global: &GlobalArgs) -> anyhow::Result<()> {
    let session = Session::open(global)?;
    let generator = session.generator();
    let request = RenderRequest::new(args.score, args.template);

    let rendered = match args.seed {
        Some(seed) => generator.generate_with(&request, &mut StdRng::seed_from_u64(seed)),
        None => generator.generate(&request),
    }
    .context("Meme generation failed")?;

    let output = args.output.unwrap_or_else(|| {
        session
            .output_dir()
            .join(format!("{}_{}.png", rendered.template_id, args.score))
    });
    write_output(&output, &rendered.bytes)?;

    println!(
        "[render] ✅ Wrote {} ({})",
        output.display(),
        rendered.template_id
    );
    Ok(())
}

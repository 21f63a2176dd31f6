pub mod batch;
pub mod render;
pub mod templates;

use anyhow::Context;
use rizzmeme::MemeGenerator;
use rizzmeme::image::{Compositor, FontResolver};
use rizzmeme::templates::{AssetLocator, TemplateRegistry};
use rizzmeme_config::MemeConfig;
use std::cell::OnceCell;
use std::path::{Path, PathBuf};

/// Options shared by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Path to the config file
    #[arg(long, global = true, default_value = rizzmeme_config::FILE_NAME)]
    pub config: PathBuf,

    /// Directory that template image paths are resolved against
    #[arg(long, global = true)]
    pub assets_dir: Option<PathBuf>,

    /// Skip font discovery and use the builtin bitmap font
    #[arg(long, global = true)]
    pub builtin_font: bool,
}

/// Config merged with command-line overrides.
pub struct Session {
    config: MemeConfig,
    locator: AssetLocator,
    builtin_font: bool,
    fonts: OnceCell<FontResolver>,
}

impl Session {
    pub fn open(global: &GlobalArgs) -> anyhow::Result<Self> {
        let config = MemeConfig::read_or_default(&global.config)?;

        let locator = match global.assets_dir.as_ref().or(config.assets.dir.as_ref()) {
            Some(dir) => AssetLocator::new(dir.clone()),
            None => AssetLocator::beside_executable()
                .context("Failed to locate the executable directory")?,
        };
        log::debug!(
            "Resolving template images against {}",
            locator.base_dir().display()
        );

        let builtin_font = global.builtin_font || config.fonts.builtin_only;
        Ok(Self {
            config,
            locator,
            builtin_font,
            fonts: OnceCell::new(),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output.dir
    }

    pub fn registry(&self) -> TemplateRegistry<'static> {
        TemplateRegistry::builtin(self.locator.clone())
    }

    /// Discovered on first use, then shared by every later render.
    pub fn fonts(&self) -> FontResolver {
        let fonts = self.fonts.get_or_init(|| {
            if self.builtin_font {
                FontResolver::builtin()
            } else {
                FontResolver::discover(&self.config.fonts.candidates)
            }
        });
        fonts.clone()
    }

    pub fn generator(&self) -> MemeGenerator<'static> {
        MemeGenerator::new(self.registry(), self.fonts())
    }

    pub fn compositor(&self) -> Compositor {
        Compositor::new(self.locator.clone(), self.fonts())
    }
}

/// Write `bytes`, creating parent directories as needed.
pub fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(path, bytes)?;
    Ok(())
}

//! Sprite build orchestration.
//!
//! One build runs collect → classify → probe → lay out → composite →
//! stylesheet. The per-build state lives in a [`BuildContext`] owned by
//! [`SpriteBuilder::build`] and dropped when it returns.
//!
//! The layout is computed in full before the image backend sees a single
//! tile, and both composites are then fed from that one ordered list, so
//! the offsets in the stylesheet always match where the tiles were drawn.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::clock::Clock;
use crate::config::BuildSettings;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::discovery::{classify, collect, icon_name, RETINA_MARKER};
use crate::error::{Result, SpriteError};
use crate::layout::{compute_layout, retina_border, IconSpec, Layout, RetinaSpec, Size};
use crate::paths::{file_name, is_versioned_name, relative_path, url_path, with_stem_suffix};
use crate::render::{Canvas, CompositeOptions, ImageBackend};
use crate::stylesheet::{class_name, render, write_stylesheet, SheetImage, StyleOptions};

/// Diagnostic code for a base icon whose class name was already taken.
pub const DUPLICATE_ICON: &str = "less_sprites::duplicate";

/// Diagnostic code for a retina file without a base icon.
pub const ORPHAN_RETINA: &str = "less_sprites::retina::orphan";

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub sprite_path: PathBuf,
    pub sprite_size: Size,
    /// Set only when at least one retina icon survived validation.
    pub retina_path: Option<PathBuf>,
    pub retina_size: Option<Size>,
    pub less_path: PathBuf,
    pub icon_count: usize,
    pub retina_count: usize,
    pub diagnostics: Diagnostics,
}

/// Mutable state of one build.
struct BuildContext<'a> {
    settings: &'a BuildSettings,
    token: String,
    sprite_path: PathBuf,
    retina_path: PathBuf,
    base_files: Vec<String>,
    retina_files: Vec<String>,
    icons: Vec<IconSpec>,
    retinas: Vec<RetinaSpec>,
    layout: Layout,
    diagnostics: Diagnostics,
}

impl<'a> BuildContext<'a> {
    fn new(settings: &'a BuildSettings, token: String) -> Self {
        let sprite_path = if settings.versioning {
            let versioned = with_stem_suffix(&settings.sprite_path, &format!("-{}", token));
            match &settings.output_dir {
                Some(dir) => dir.join(file_name(&versioned)),
                None => versioned,
            }
        } else {
            settings.sprite_path.clone()
        };
        let retina_path = with_stem_suffix(&sprite_path, RETINA_MARKER);

        Self {
            settings,
            token,
            sprite_path,
            retina_path,
            base_files: Vec::new(),
            retina_files: Vec::new(),
            icons: Vec::new(),
            retinas: Vec::new(),
            layout: Layout::default(),
            diagnostics: Diagnostics::new(),
        }
    }

    fn source_path(&self, file: &str) -> PathBuf {
        self.settings.source_dir.join(file)
    }

    /// URL of a composite as seen from the stylesheet.
    fn image_url(&self, image: &Path) -> String {
        format!(
            "{}{}",
            self.settings.base_url,
            url_path(&relative_path(&self.settings.source_dir, image))
        )
    }
}

/// Builds sprites against an image backend and a clock.
pub struct SpriteBuilder<B, C> {
    backend: B,
    clock: C,
}

impl<B: ImageBackend, C: Clock> SpriteBuilder<B, C> {
    pub fn new(backend: B, clock: C) -> Self {
        Self { backend, clock }
    }

    /// Run one complete build.
    ///
    /// Fails before writing anything when the source set is invalid. A
    /// failure after compositing has started may leave partial output.
    pub fn build(&self, settings: &BuildSettings) -> Result<BuildReport> {
        let mut ctx = BuildContext::new(settings, self.clock.token());

        self.collect_files(&mut ctx)?;
        self.probe_icons(&mut ctx)?;
        self.lay_out(&mut ctx);

        let sprite_size = self.write_sprite(&ctx)?;
        let retina_size = self.write_retina_sprite(&ctx)?;
        self.write_styles(&ctx, sprite_size, retina_size)?;

        let retina_count = ctx.layout.retina_entries().count();
        Ok(BuildReport {
            sprite_path: ctx.sprite_path.clone(),
            sprite_size,
            retina_path: retina_size.map(|_| ctx.retina_path.clone()),
            retina_size,
            less_path: settings.less_path.clone(),
            icon_count: ctx.layout.entries.len(),
            retina_count,
            diagnostics: ctx.diagnostics,
        })
    }

    fn collect_files(&self, ctx: &mut BuildContext) -> Result<()> {
        let sprite_name = file_name(&ctx.sprite_path);
        let retina_name = file_name(&ctx.retina_path);
        let settings = ctx.settings;
        let files = collect(&settings.source_dir, &settings.files, |name| {
            name == sprite_name
                || name == retina_name
                || (settings.versioning && is_versioned_name(name, &settings.sprite_path))
        })?;

        let (base, retina) = classify(&files);
        if base.is_empty() {
            return Err(SpriteError::config_with_help(
                "No base icons were found",
                "Every @2x icon needs a matching standard icon",
            ));
        }

        ctx.base_files = base;
        ctx.retina_files = retina;
        Ok(())
    }

    /// Read the size of every icon, in discovery order.
    fn probe_icons(&self, ctx: &mut BuildContext) -> Result<()> {
        let mut seen = HashSet::new();
        for file in &ctx.base_files {
            let name = icon_name(file);
            if !seen.insert(class_name(&ctx.settings.prefix, name)) {
                ctx.diagnostics.push(
                    Diagnostic::new(
                        DUPLICATE_ICON,
                        format!("{} maps to an icon name that is already used", file),
                    )
                    .with_help("Icon names are case-insensitive; rename one of the files"),
                );
                continue;
            }
            let spec = self.probe(ctx, file, name)?;
            ctx.icons.push(spec);
        }

        for file in &ctx.retina_files {
            let name = icon_name(file);
            if !ctx.icons.iter().any(|icon| icon.name == name) {
                ctx.diagnostics.push(Diagnostic::new(
                    ORPHAN_RETINA,
                    format!("{} has no matching base icon", file),
                ));
                continue;
            }
            if ctx.retinas.iter().any(|r| r.name == name) {
                ctx.diagnostics.push(
                    Diagnostic::new(
                        DUPLICATE_ICON,
                        format!("{} is a second retina variant of {}", file, name),
                    )
                    .with_help("Keep a single @2x file per icon"),
                );
                continue;
            }
            let spec = self.probe(ctx, file, name)?;
            ctx.retinas.push(spec);
        }

        Ok(())
    }

    fn probe(&self, ctx: &BuildContext, file: &str, name: &str) -> Result<IconSpec> {
        let path = ctx.source_path(file);
        if !path.is_file() {
            return Err(SpriteError::SourceFile {
                path,
                help: Some("The file was listed but is missing".to_string()),
            });
        }
        let size = self.backend.probe_size(&path)?;
        Ok(IconSpec::new(name, size, path))
    }

    fn lay_out(&self, ctx: &mut BuildContext) {
        let (layout, diagnostics) = compute_layout(
            &ctx.icons,
            &ctx.retinas,
            ctx.settings.direction,
            ctx.settings.border,
        );
        ctx.layout = layout;
        ctx.diagnostics.merge(diagnostics);
    }

    fn write_sprite(&self, ctx: &BuildContext) -> Result<Size> {
        let mut canvas = self.backend.canvas(ctx.layout.direction);
        for entry in &ctx.layout.entries {
            canvas.append_tile(&entry.icon.source_path)?;
        }

        ensure_parent(&ctx.sprite_path)?;
        let size = canvas.write(
            &ctx.sprite_path,
            CompositeOptions {
                background_transparent: true,
                border: ctx.layout.border,
            },
        )?;
        check_extent(&ctx.sprite_path, ctx.layout.extent(), size)?;
        Ok(size)
    }

    /// Write the retina composite when any retina icon survived validation.
    fn write_retina_sprite(&self, ctx: &BuildContext) -> Result<Option<Size>> {
        if !ctx.layout.has_retina() {
            return Ok(None);
        }

        let mut canvas = self.backend.canvas(ctx.layout.direction);
        for (_, retina) in ctx.layout.retina_entries() {
            canvas.append_tile(&retina.source_path)?;
        }

        let size = canvas.write(
            &ctx.retina_path,
            CompositeOptions {
                background_transparent: true,
                border: retina_border(ctx.layout.border),
            },
        )?;
        if let Some(expected) = ctx.layout.retina_extent() {
            check_extent(&ctx.retina_path, expected, size)?;
        }
        Ok(Some(size))
    }

    fn write_styles(
        &self,
        ctx: &BuildContext,
        sprite_size: Size,
        retina_size: Option<Size>,
    ) -> Result<()> {
        let sprite = SheetImage {
            url: ctx.image_url(&ctx.sprite_path),
            size: sprite_size,
        };
        let retina = retina_size.map(|size| SheetImage {
            url: ctx.image_url(&ctx.retina_path),
            size,
        });
        let options = StyleOptions {
            prefix: ctx.settings.prefix.clone(),
            cache_token: ctx.settings.nocache.then(|| ctx.token.clone()),
        };

        let content = render(&ctx.layout.entries, &sprite, retina.as_ref(), &options);
        ensure_parent(&ctx.settings.less_path)?;
        write_stylesheet(&ctx.settings.less_path, &content)
    }
}

/// The stylesheet offsets are only valid if the backend drew the composite
/// at the size the layout predicts.
fn check_extent(path: &Path, expected: Size, written: Size) -> Result<()> {
    if expected == written {
        return Ok(());
    }
    Err(SpriteError::Backend {
        path: path.to_path_buf(),
        message: format!(
            "Composite is {}x{} but the layout expects {}x{}",
            written.width, written.height, expected.width, expected.height
        ),
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| SpriteError::Write {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })
        }
        _ => Ok(()),
    }
}

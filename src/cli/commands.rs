//! Command implementations

use anyhow::{bail, Context, Result};
use serde::Serialize;
use tracing::info;

use crate::adapters::toml_config::AppConfig;
use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::cli::args::{ConvertArgs, ProfilesArgs};
use crate::domain::model::*;
use crate::domain::rules::ProfileResolver;
use crate::error::Vid2GifError;
use crate::utils::discovery::discover_inputs;

const REPORT_HEADERS: [&str; 3] = ["File", "GIF size (MB)", "Status"];

/// Execute the convert command
pub async fn convert(args: &ConvertArgs, config: &AppConfig) -> Result<()> {
    let container =
        DefaultAppContainer::new(config).context("Failed to set up the conversion pipeline")?;

    let inputs = if args.inputs.is_empty() {
        discover_inputs(&args.input_dir, &config.discovery.extensions)?
    } else {
        args.inputs.clone()
    };

    if inputs.is_empty() {
        bail!(
            "No supported videos found in {} (looking for {})",
            args.input_dir.display(),
            config.discovery.extensions.join(", ")
        );
    }

    let template = container.request_template();
    info!(
        "Converting {} video(s): width {}, mode {}, limit {:.2} MB",
        inputs.len(),
        template.target_width,
        template.profile.mode,
        template.size_threshold_mb
    );

    let interactor = container.batch_interactor();
    interactor
        .prepare_output_directory()
        .await
        .map_err(|e| Vid2GifError::OutputDirectory {
            path: interactor.output_dir().to_path_buf(),
            message: e.diagnostic(),
        })?;

    let report = interactor.execute(template, &inputs).await;

    if args.json {
        let json = serde_json::to_string_pretty(&report.rows())
            .context("Failed to serialize batch report to JSON")?;
        println!("{}", json);
    } else {
        print!("{}", render_report_table(&report.rows()));
    }

    let output_dir = interactor.output_dir();
    let shown = output_dir
        .canonicalize()
        .unwrap_or_else(|_| output_dir.to_path_buf());
    info!("GIFs saved to {}", shown.display());

    if report.has_failures() {
        bail!(
            "{} of {} conversions failed",
            report.failed_count(),
            report.len()
        );
    }
    Ok(())
}

/// Execute the profiles command
pub fn profiles(args: &ProfilesArgs, config: &AppConfig) -> Result<()> {
    let container =
        DefaultAppContainer::new(config).context("Failed to resolve quality profiles")?;
    let views = profile_views(&container.profile_resolver(), config.conversion.width);

    if args.json {
        let json = serde_json::to_string_pretty(&views)
            .context("Failed to serialize profiles to JSON")?;
        println!("{}", json);
    } else {
        display_profiles(&views, config.conversion.width);
    }
    Ok(())
}

/// Resolved profile as shown by `vid2gif profiles`
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub mode: QualityMode,
    pub fps: u32,
    pub scale: String,
    pub dither: String,
    pub palette_filter: String,
    pub paletteuse_filter: String,
}

pub fn profile_views(resolver: &ProfileResolver, width: u32) -> Vec<ProfileView> {
    QualityMode::ALL
        .iter()
        .map(|mode| {
            let profile = resolver.resolve(*mode);
            ProfileView {
                mode: *mode,
                fps: profile.frame_rate,
                scale: profile.scale_filter.flag().to_string(),
                dither: profile.dither.to_string(),
                palette_filter: profile.palette_filter(width),
                paletteuse_filter: profile.paletteuse_filter(width),
            }
        })
        .collect()
}

fn display_profiles(views: &[ProfileView], width: u32) {
    println!("Quality Profiles (width {})", width);
    println!("==========================");
    for view in views {
        println!("{}:", view.mode);
        println!("  Frame rate: {} fps", view.fps);
        println!("  Scaler: {}", view.scale);
        println!("  Dither: {}", view.dither);
        println!("  Palette pass: {}", view.palette_filter);
        println!("  Encode pass: {}", view.paletteuse_filter);
    }
}

/// Render report rows as a GitHub-style markdown table
pub fn render_report_table(rows: &[ReportRow]) -> String {
    let cells: Vec<[&str; 3]> = rows
        .iter()
        .map(|row| [row.source_name.as_str(), row.size_mb.as_str(), row.status.as_str()])
        .collect();

    let mut widths = REPORT_HEADERS.map(|header| header.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render_line = |values: [&str; 3]| -> String {
        let padded: Vec<String> = values
            .iter()
            .zip(widths.iter())
            .map(|(value, width)| format!(" {:<width$} ", value, width = *width))
            .collect();
        format!("|{}|\n", padded.join("|"))
    };

    let mut table = render_line(REPORT_HEADERS);
    let separator: Vec<String> = widths.iter().map(|width| "-".repeat(width + 2)).collect();
    table.push_str(&format!("|{}|\n", separator.join("|")));
    for row in cells {
        table.push_str(&render_line(row));
    }
    table
}

//! Result slip rendering
//!
//! [`SlipRenderer`] turns a [`StudentRecord`] into a printable PDF:
//! optional logo, title block, identity block, `Unit | Marks` table and a
//! summary with total, average and grade.

pub mod layout;
pub mod metrics;
pub mod pdf;

use crate::config::SlipConfig;
use crate::errors::{Result, SlipError};
use crate::model::StudentRecord;
use layout::{layout_slip, LogoSize, SlipContent};
use printpdf::image_crate::{self, DynamicImage};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name suffix for generated slips
pub const SLIP_SUFFIX: &str = "_ResultSlip.pdf";

/// What happened to the configured logo during a render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoStatus {
    Embedded(PathBuf),
    /// No `logo_path` configured
    NotConfigured,
    /// `logo_path` configured but the file does not exist
    Missing(PathBuf),
}

/// Outcome of a successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    /// File written, `None` when rendering to a caller-supplied writer
    pub destination: Option<PathBuf>,
    pub logo: LogoStatus,
    pub page_count: usize,
    pub bytes_written: usize,
}

/// Renders result slips according to a [`SlipConfig`]
#[derive(Debug, Clone)]
pub struct SlipRenderer {
    config: SlipConfig,
}

impl SlipRenderer {
    pub fn new(config: SlipConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SlipConfig {
        &self.config
    }

    /// Default destination for a student's slip inside `output_dir`
    pub fn slip_path(&self, student_id: &str) -> PathBuf {
        self.config.output_dir.join(slip_file_name(student_id))
    }

    /// Render `record` to the file at `destination`
    ///
    /// Missing parent directories are created. The document is built in
    /// memory first, so a build failure never leaves a file behind.
    ///
    /// # Errors
    /// * `Render` - logo unreadable, PDF assembly failed, or the destination
    ///   could not be created or written
    pub fn render(&self, record: &StudentRecord, destination: &Path) -> Result<RenderReport> {
        let (bytes, logo, page_count) = self.build(record)?;

        let destination_error = |e: std::io::Error| SlipError::Destination {
            path: destination.display().to_string(),
            message: e.to_string(),
        };
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(destination_error)?;
        }
        std::fs::write(destination, &bytes).map_err(destination_error)?;

        tracing::debug!(
            student_id = %record.student_id,
            path = %destination.display(),
            page_count,
            "slip written"
        );

        Ok(RenderReport {
            destination: Some(destination.to_path_buf()),
            logo,
            page_count,
            bytes_written: bytes.len(),
        })
    }

    /// Render `record` into any writer (stdout, a buffer, a socket)
    pub fn render_to_writer<W: Write>(
        &self,
        record: &StudentRecord,
        out: &mut W,
    ) -> Result<RenderReport> {
        let (bytes, logo, page_count) = self.build(record)?;
        out.write_all(&bytes)
            .and_then(|_| out.flush())
            .map_err(|e| SlipError::Destination {
                path: "<writer>".to_string(),
                message: e.to_string(),
            })?;

        Ok(RenderReport {
            destination: None,
            logo,
            page_count,
            bytes_written: bytes.len(),
        })
    }

    fn build(&self, record: &StudentRecord) -> Result<(Vec<u8>, LogoStatus, usize)> {
        let (image, logo_status) = self.load_logo()?;
        let logo_size = image.as_ref().map(|img| LogoSize {
            width_px: img.width(),
            height_px: img.height(),
        });

        let content = self.content(record);
        let layout = layout_slip(&content, logo_size);
        let title = format!("{} {}", record.student_id, self.config.title);
        let bytes = pdf::write_pdf(&layout, image.as_ref(), &title)?;

        Ok((bytes, logo_status, layout.page_count()))
    }

    /// Format the record for printing
    pub fn content(&self, record: &StudentRecord) -> SlipContent {
        SlipContent {
            title_lines: vec![self.config.institution.clone(), self.config.title.clone()],
            student_id: record.student_id.clone(),
            name: record.name.clone(),
            rows: record
                .marks
                .iter()
                .map(|(unit, score)| (unit.clone(), score.to_string()))
                .collect(),
            total: record.total().to_string(),
            average: format!("{:.2}", record.average()),
            grade: record.grade().to_string(),
        }
    }

    fn load_logo(&self) -> Result<(Option<DynamicImage>, LogoStatus)> {
        let Some(path) = &self.config.logo_path else {
            return Ok((None, LogoStatus::NotConfigured));
        };
        if !path.is_file() {
            tracing::warn!(path = %path.display(), "logo file not found, rendering without it");
            return Ok((None, LogoStatus::Missing(path.clone())));
        }
        let image = image_crate::open(path).map_err(|e| SlipError::LogoUnreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok((Some(image), LogoStatus::Embedded(path.clone())))
    }
}

/// `<id>_ResultSlip.pdf` with characters outside `[A-Za-z0-9._-]` replaced
///
/// Keeps ids such as `CS/2024/001` from escaping the output directory.
pub fn slip_file_name(student_id: &str) -> String {
    let safe: String = student_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let safe = if safe.is_empty() || safe.chars().all(|c| c == '.') {
        "student".to_string()
    } else {
        safe
    };
    format!("{}{}", safe, SLIP_SUFFIX)
}

//! Chain of adjustment stages with per-stage caching.
//!
//! A [`Pipeline`] runs an input buffer through an ordered list of stages.
//! Each stage remembers its last output and recomputes only when it has
//! to:
//!
//! ```text
//! input ──► [lightness] ──► [pixelate] ──► [saturation] ──► output
//!              cache           cache           cache
//! ```
//!
//! Per stage, with `changed` carried from upstream:
//!
//! - hidden: the image passes through untouched
//! - clean, nothing upstream changed, cache present: cached image is reused
//! - otherwise the stage recomputes; on failure it logs, passes its input
//!   through and caches that instead
//!
//! Editing a stage's parameters or visibility marks it dirty. Removing a
//! stage marks the one after it dirty, or flags the next run as changed
//! when no stage follows.
//!
//! Pipelines can be described in YAML:
//!
//! ```yaml
//! stages:
//!   - lightness: 20
//!   - pixelate: { width: 4, height: 4 }
//!   - saturation: -10
//!     visible: false
//! ```

use crate::adjust::adjusted;
use crate::pixelate::{pixelated, BlockSize};
use crate::{OpsError, OpsResult};
use pixkit_color::{Adjustment, HslChannel};
use pixkit_core::PixelBuffer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, trace, warn};

// ============================================================================
// Stage
// ============================================================================

/// Identifier of a stage within one [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StageId(u64);

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a stage does, with its parameters.
///
/// Color values are in slider units, see [`pixkit_color::SLIDER_SCALE`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "StageOp", into = "StageOp")]
pub enum StageKind {
    /// Lightness shift.
    Lightness {
        /// Slider value
        value: f64,
    },
    /// Saturation shift.
    Saturation {
        /// Slider value
        value: f64,
    },
    /// Block mosaic.
    Pixelate {
        /// Block width in pixels
        width: f64,
        /// Block height in pixels
        height: f64,
    },
}

impl StageKind {
    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lightness { .. } => "lightness",
            Self::Saturation { .. } => "saturation",
            Self::Pixelate { .. } => "pixelate",
        }
    }

    /// Rejects non-finite parameters.
    pub fn validate(&self) -> OpsResult<()> {
        let finite = match *self {
            Self::Lightness { value } | Self::Saturation { value } => value.is_finite(),
            Self::Pixelate { width, height } => width.is_finite() && height.is_finite(),
        };
        if finite {
            Ok(())
        } else {
            Err(OpsError::InvalidParameter(format!(
                "{} parameters must be finite: {:?}",
                self.name(),
                self
            )))
        }
    }

    fn apply(&self, input: &PixelBuffer) -> OpsResult<PixelBuffer> {
        self.validate()?;
        match *self {
            Self::Lightness { value } => adjusted(
                input.clone(),
                Adjustment::from_slider(HslChannel::Lightness, value),
            ),
            Self::Saturation { value } => adjusted(
                input.clone(),
                Adjustment::from_slider(HslChannel::Saturation, value),
            ),
            Self::Pixelate { width, height } => {
                pixelated(input.clone(), BlockSize::new(width, height))
            }
        }
    }
}

/// One step of a [`Pipeline`].
#[derive(Debug, Clone)]
pub struct Stage {
    id: StageId,
    kind: StageKind,
    visible: bool,
    dirty: bool,
    cache: Option<PixelBuffer>,
}

impl Stage {
    fn new(id: StageId, kind: StageKind) -> Self {
        Self {
            id,
            kind,
            visible: true,
            dirty: true,
            cache: None,
        }
    }

    /// Stage id.
    pub fn id(&self) -> StageId {
        self.id
    }

    /// Operation and parameters.
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// Whether the stage takes part in [`Pipeline::run`].
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the next run must recompute this stage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Output of the last computation, if any.
    pub fn cached(&self) -> Option<&PixelBuffer> {
        self.cache.as_ref()
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Result of [`Pipeline::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Final image
    pub buffer: PixelBuffer,
    /// `false` if every stage reused its cache
    pub changed: bool,
}

/// Ordered, cached chain of stages.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
    next_id: u64,
    source: Option<PixelBuffer>,
    /// Set when a removal changed the output without dirtying a stage
    force_changed: bool,
}

impl Pipeline {
    /// Empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage and returns its id.
    pub fn push(&mut self, kind: StageKind) -> StageId {
        self.push_stage(kind, true)
    }

    fn push_stage(&mut self, kind: StageKind, visible: bool) -> StageId {
        let id = StageId(self.next_id);
        self.next_id += 1;
        let mut stage = Stage::new(id, kind);
        stage.visible = visible;
        self.stages.push(stage);
        trace!(stage = %id, kind = kind.name(), visible, "Stage added");
        id
    }

    /// Removes a stage. The stage after it recomputes on the next run; if
    /// it was the last visible step, the next run reports a change.
    pub fn remove(&mut self, id: StageId) -> OpsResult<()> {
        let pos = self.position(id)?;
        let removed = self.stages.remove(pos);
        if let Some(next) = self.stages.get_mut(pos) {
            next.dirty = true;
        } else if removed.visible {
            self.force_changed = true;
        }
        trace!(stage = %id, "Stage removed");
        Ok(())
    }

    /// Replaces a stage's operation and parameters.
    pub fn set_params(&mut self, id: StageId, kind: StageKind) -> OpsResult<()> {
        let stage = self.stage_mut(id)?;
        if stage.kind != kind {
            stage.kind = kind;
            stage.dirty = true;
        }
        Ok(())
    }

    /// Shows or hides a stage.
    pub fn set_visible(&mut self, id: StageId, visible: bool) -> OpsResult<()> {
        let stage = self.stage_mut(id)?;
        if stage.visible != visible {
            stage.visible = visible;
            stage.dirty = true;
        }
        Ok(())
    }

    /// Stage by id.
    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }

    /// Stages in execution order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Number of stages, hidden ones included.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if there are no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Runs `input` through every visible stage.
    ///
    /// A stage that fails passes its input on unchanged, so `run` always
    /// produces an image.
    pub fn run(&mut self, input: &PixelBuffer) -> PipelineOutput {
        let mut changed = self.source.as_ref() != Some(input) || self.force_changed;
        self.force_changed = false;
        if changed {
            self.source = Some(input.clone());
        }
        trace!(stages = self.stages.len(), input_changed = changed, "pipeline run");

        let mut image = input.clone();
        for stage in &mut self.stages {
            if !stage.visible {
                // hiding a stage changes what downstream sees
                if stage.dirty {
                    stage.dirty = false;
                    stage.cache = None;
                    changed = true;
                }
                continue;
            }

            if !stage.dirty && !changed {
                if let Some(cached) = &stage.cache {
                    image = cached.clone();
                    continue;
                }
            }

            match stage.kind.apply(&image) {
                Ok(out) => {
                    debug!(stage = %stage.id, kind = stage.kind.name(), "Stage computed");
                    stage.cache = Some(out.clone());
                    image = out;
                }
                Err(e) => {
                    warn!(stage = %stage.id, kind = stage.kind.name(), error = %e, "Stage failed, passing input through");
                    stage.cache = Some(image.clone());
                }
            }
            stage.dirty = false;
            changed = true;
        }

        PipelineOutput {
            buffer: image,
            changed,
        }
    }

    /// Describes the current stages as a config.
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig {
            stages: self
                .stages
                .iter()
                .map(|s| StageConfig {
                    kind: s.kind,
                    visible: s.visible,
                })
                .collect(),
        }
    }

    fn position(&self, id: StageId) -> OpsResult<usize> {
        self.stages
            .iter()
            .position(|s| s.id == id)
            .ok_or(OpsError::UnknownStage(id))
    }

    fn stage_mut(&mut self, id: StageId) -> OpsResult<&mut Stage> {
        let pos = self.position(id)?;
        Ok(&mut self.stages[pos])
    }
}

// ============================================================================
// Config
// ============================================================================

/// Serializable pipeline description.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Stages in execution order
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

/// One entry of [`PipelineConfig::stages`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    /// Operation and parameters
    #[serde(flatten)]
    pub kind: StageKind,
    /// Defaults to `true`
    #[serde(default = "visible_default", skip_serializing_if = "is_true")]
    pub visible: bool,
}

fn visible_default() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

impl PipelineConfig {
    /// Parses a YAML description.
    ///
    /// # Errors
    ///
    /// [`OpsError::Yaml`] on malformed YAML or an unknown stage,
    /// [`OpsError::Config`] on non-finite parameters.
    pub fn from_yaml_str(yaml: &str) -> OpsResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        for (i, stage) in config.stages.iter().enumerate() {
            stage
                .kind
                .validate()
                .map_err(|e| OpsError::Config(format!("stage {}: {}", i, e)))?;
        }
        Ok(config)
    }

    /// Reads and parses a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> OpsResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading pipeline config");
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Serializes to YAML.
    pub fn to_yaml_string(&self) -> OpsResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Builds a fresh pipeline with every stage dirty.
    pub fn build(&self) -> Pipeline {
        let mut pipeline = Pipeline::new();
        for stage in &self.stages {
            pipeline.push_stage(stage.kind, stage.visible);
        }
        pipeline
    }
}

/// On-disk shape of [`StageKind`]: `lightness: 20`,
/// `pixelate: { width: 4, height: 4 }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum StageOp {
    Lightness(f64),
    Saturation(f64),
    Pixelate(PixelateParams),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PixelateParams {
    width: f64,
    /// Defaults to `width`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<f64>,
}

impl From<StageOp> for StageKind {
    fn from(op: StageOp) -> Self {
        match op {
            StageOp::Lightness(value) => Self::Lightness { value },
            StageOp::Saturation(value) => Self::Saturation { value },
            StageOp::Pixelate(p) => Self::Pixelate {
                width: p.width,
                height: p.height.unwrap_or(p.width),
            },
        }
    }
}

impl From<StageKind> for StageOp {
    fn from(kind: StageKind) -> Self {
        match kind {
            StageKind::Lightness { value } => Self::Lightness(value),
            StageKind::Saturation { value } => Self::Saturation(value),
            StageKind::Pixelate { width, height } => Self::Pixelate(PixelateParams {
                width,
                height: Some(height),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixkit_core::{Point, Rgba};

    fn source() -> PixelBuffer {
        let mut buf = PixelBuffer::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                let px = Rgba::new((x * 60) as u8, (y * 50) as u8, 120, 255);
                buf.set_rgba(Point::new(x, y), px).unwrap();
            }
        }
        buf
    }

    const LIGHTEN: StageKind = StageKind::Lightness { value: 40.0 };
    const MOSAIC: StageKind = StageKind::Pixelate {
        width: 2.0,
        height: 2.0,
    };

    #[test]
    fn test_empty_pipeline_is_identity() {
        let mut p = Pipeline::new();
        let out = p.run(&source());
        assert_eq!(out.buffer, source());
        assert!(out.changed);
        assert!(!p.run(&source()).changed);
    }

    #[test]
    fn test_stages_apply_in_order() {
        let mut p = Pipeline::new();
        p.push(LIGHTEN);
        p.push(MOSAIC);

        let expected = pixelated(
            adjusted(source(), Adjustment::from_slider(HslChannel::Lightness, 40.0)).unwrap(),
            BlockSize::square(2.0),
        )
        .unwrap();
        assert_eq!(p.run(&source()).buffer, expected);
    }

    #[test]
    fn test_second_run_uses_cache() {
        let mut p = Pipeline::new();
        let a = p.push(LIGHTEN);
        p.push(MOSAIC);

        let first = p.run(&source());
        assert!(first.changed);
        assert!(p.stages().iter().all(|s| !s.is_dirty()));
        assert!(p.stage(a).unwrap().cached().is_some());

        let second = p.run(&source());
        assert!(!second.changed);
        assert_eq!(first.buffer, second.buffer);
    }

    #[test]
    fn test_new_input_recomputes() {
        let mut p = Pipeline::new();
        p.push(LIGHTEN);
        p.run(&source());

        let other = PixelBuffer::filled(4, 4, Rgba::new(10, 10, 10, 255));
        let out = p.run(&other);
        assert!(out.changed);
        assert_eq!(
            out.buffer,
            adjusted(other, Adjustment::from_slider(HslChannel::Lightness, 40.0)).unwrap()
        );
    }

    #[test]
    fn test_param_change_only_dirties_that_stage() {
        let mut p = Pipeline::new();
        let a = p.push(LIGHTEN);
        let b = p.push(MOSAIC);
        p.run(&source());

        p.set_params(b, StageKind::Pixelate { width: 4.0, height: 4.0 })
            .unwrap();
        assert!(!p.stage(a).unwrap().is_dirty());
        assert!(p.stage(b).unwrap().is_dirty());

        let out = p.run(&source());
        assert!(out.changed);
        // one 4x4 block: every pixel equal
        let first = out.buffer.rgba_at(Point::new(0, 0)).unwrap();
        assert!(out.buffer.pixels().all(|px| px == first));
    }

    #[test]
    fn test_same_params_keep_stage_clean() {
        let mut p = Pipeline::new();
        let a = p.push(LIGHTEN);
        p.run(&source());
        p.set_params(a, LIGHTEN).unwrap();
        assert!(!p.run(&source()).changed);
    }

    #[test]
    fn test_hidden_stage_passes_through() {
        let mut p = Pipeline::new();
        let a = p.push(LIGHTEN);
        p.run(&source());

        p.set_visible(a, false).unwrap();
        let out = p.run(&source());
        assert!(out.changed);
        assert_eq!(out.buffer, source());
        assert!(!p.run(&source()).changed);

        p.set_visible(a, true).unwrap();
        let out = p.run(&source());
        assert!(out.changed);
        assert_ne!(out.buffer, source());
    }

    #[test]
    fn test_remove_dirties_next_stage() {
        let mut p = Pipeline::new();
        let a = p.push(LIGHTEN);
        let b = p.push(MOSAIC);
        p.run(&source());

        p.remove(a).unwrap();
        assert_eq!(p.len(), 1);
        assert!(p.stage(b).unwrap().is_dirty());

        let out = p.run(&source());
        assert!(out.changed);
        assert_eq!(out.buffer, pixelated(source(), BlockSize::square(2.0)).unwrap());
    }

    #[test]
    fn test_remove_last_stage_reports_change() {
        let mut p = Pipeline::new();
        let a = p.push(LIGHTEN);
        let b = p.push(StageKind::Lightness { value: 80.0 });
        let both = p.run(&source()).buffer;

        p.remove(b).unwrap();
        let out = p.run(&source());
        assert!(out.changed);
        assert_ne!(out.buffer, both);
        assert_eq!(
            out.buffer,
            adjusted(source(), Adjustment::from_slider(HslChannel::Lightness, 40.0)).unwrap()
        );
        assert!(!p.run(&source()).changed);

        p.remove(a).unwrap();
        let out = p.run(&source());
        assert!(out.changed);
        assert_eq!(out.buffer, source());
        assert!(!p.run(&source()).changed);
    }

    #[test]
    fn test_remove_hidden_last_stage_keeps_output() {
        let mut p = Pipeline::new();
        p.push(LIGHTEN);
        let b = p.push(MOSAIC);
        p.set_visible(b, false).unwrap();
        let first = p.run(&source()).buffer;

        p.remove(b).unwrap();
        let out = p.run(&source());
        assert!(!out.changed);
        assert_eq!(out.buffer, first);
    }

    #[test]
    fn test_build_keeps_hidden_stages_hidden() {
        let config = PipelineConfig::from_yaml_str(
            "stages:\n  - lightness: 400\n    visible: false\n",
        )
        .unwrap();
        let mut p = config.build();
        assert!(!p.stages()[0].is_visible());
        assert_eq!(p.run(&source()).buffer, source());
    }

    #[test]
    fn test_unknown_stage() {
        let mut p = Pipeline::new();
        let a = p.push(LIGHTEN);
        p.remove(a).unwrap();
        assert!(matches!(p.remove(a), Err(OpsError::UnknownStage(id)) if id == a));
        assert!(p.set_visible(a, false).is_err());
        assert!(p.set_params(a, MOSAIC).is_err());
        assert!(p.is_empty());
    }

    #[test]
    fn test_failing_stage_passes_input_through() {
        let mut p = Pipeline::new();
        p.push(StageKind::Lightness { value: f64::NAN });
        p.push(MOSAIC);

        let out = p.run(&source());
        assert_eq!(out.buffer, pixelated(source(), BlockSize::square(2.0)).unwrap());
        assert_eq!(p.stages()[0].cached(), Some(&source()));
    }

    #[test]
    fn test_yaml_config() {
        let yaml = r#"
stages:
  - lightness: 20
  - pixelate: { width: 4, height: 2 }
  - saturation: -10
    visible: false
  - pixelate: { width: 3 }
"#;
        let config = PipelineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.stages.len(), 4);
        assert_eq!(config.stages[0].kind, StageKind::Lightness { value: 20.0 });
        assert_eq!(
            config.stages[1].kind,
            StageKind::Pixelate { width: 4.0, height: 2.0 }
        );
        assert!(!config.stages[2].visible);
        assert_eq!(
            config.stages[3].kind,
            StageKind::Pixelate { width: 3.0, height: 3.0 }
        );

        let p = config.build();
        assert_eq!(p.len(), 4);
        assert!(!p.stages()[2].is_visible());
        assert_eq!(p.to_config(), config);
    }

    #[test]
    fn test_yaml_unknown_stage() {
        let err = PipelineConfig::from_yaml_str("stages:\n  - blur: 3\n").unwrap_err();
        assert!(matches!(err, OpsError::Yaml(_)));
    }

    #[test]
    fn test_yaml_non_finite_rejected() {
        let err = PipelineConfig::from_yaml_str("stages:\n  - lightness: .nan\n").unwrap_err();
        assert!(matches!(err, OpsError::Config(_)));
    }

    #[test]
    fn test_config_file_round_trip() {
        let mut p = Pipeline::new();
        p.push(MOSAIC);
        let id = p.push(StageKind::Saturation { value: -30.0 });
        p.set_visible(id, false).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stages.yaml");
        std::fs::write(&path, p.to_config().to_yaml_string().unwrap()).unwrap();

        let loaded = PipelineConfig::from_file(&path).unwrap();
        assert_eq!(loaded, p.to_config());
    }

    #[test]
    fn test_missing_config_file() {
        let err = PipelineConfig::from_file("/nonexistent/stages.yaml").unwrap_err();
        assert!(matches!(err, OpsError::Io(_)));
    }
}

use crate::variant::Variant;
use lanes_check::{FailurePolicy, FailureReporter};
use lanes_codegen::{FixtureWriter, Position, fixture_digest};
use lanes_kind::{Lane, NumericKind};
use lanes_random::RandomSource;
use serde::Serialize;

/// Shape of one generated fixture group.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureShape {
    pub kind: NumericKind,
    /// Vectors in the group, e.g. two inputs and one expected output.
    pub vectors: usize,
    /// Lanes per vector.
    pub lanes: usize,
    pub indent: usize,
    /// Float range; ignored for integer kinds, which take raw bit patterns.
    pub min: f64,
    pub max: f64,
}

impl FixtureShape {
    #[must_use]
    pub fn new(kind: NumericKind, vectors: usize, lanes: usize) -> Self {
        Self {
            kind,
            vectors,
            lanes,
            indent: 2,
            min: -1000.0,
            max: 1000.0,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.vectors < 2 {
            return Err(format!(
                "a fixture group needs at least 2 vectors to open and close, got {}",
                self.vectors
            ));
        }
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(format!(
                "float range must be finite with min < max, got [{}, {})",
                self.min, self.max
            ));
        }
        // Draws divide by the span in the lane's own width.
        let limit = if self.kind == NumericKind::F32 {
            f64::from(f32::MAX)
        } else {
            f64::MAX
        };
        let span = self.max - self.min;
        if self.min < -limit || self.max > limit || !span.is_finite() || span > limit {
            return Err(format!(
                "float range [{}, {}) does not fit {} lanes",
                self.min,
                self.max,
                self.kind.name()
            ));
        }
        Ok(())
    }
}

/// Summary of a generated fixture, enough to replay and pin it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureRecord {
    pub kind: &'static str,
    pub vectors: usize,
    pub lanes: usize,
    pub seed: u64,
    pub variant: String,
    pub sha256: String,
    pub capacity_notes: Vec<String>,
}

/// Renders one random fixture group drawn from `source`.
pub fn generate_fixture(
    shape: &FixtureShape,
    source: &mut RandomSource,
    variant: Variant,
) -> Result<(String, FixtureRecord), String> {
    shape.validate()?;
    let seed = source.seed();
    let (min, max) = (shape.min, shape.max);
    let (text, capacity_notes) = match shape.kind {
        NumericKind::F32 => render_group::<f32>(shape, |values| {
            source.fill_f32(values, min as f32, max as f32);
        }),
        NumericKind::F64 => render_group::<f64>(shape, |values| source.fill_f64(values, min, max)),
        NumericKind::I8 => render_group::<i8>(shape, |values| source.fill_lanes(values)),
        NumericKind::I16 => render_group::<i16>(shape, |values| source.fill_lanes(values)),
        NumericKind::I32 => render_group::<i32>(shape, |values| source.fill_lanes(values)),
        NumericKind::I64 => render_group::<i64>(shape, |values| source.fill_lanes(values)),
        NumericKind::U8 => render_group::<u8>(shape, |values| source.fill_lanes(values)),
        NumericKind::U16 => render_group::<u16>(shape, |values| source.fill_lanes(values)),
        NumericKind::U32 => render_group::<u32>(shape, |values| source.fill_lanes(values)),
        NumericKind::U64 => render_group::<u64>(shape, |values| source.fill_lanes(values)),
    }?;

    let record = FixtureRecord {
        kind: shape.kind.name(),
        vectors: shape.vectors,
        lanes: shape.lanes,
        seed,
        variant: variant.tag(),
        sha256: fixture_digest(&text),
        capacity_notes,
    };
    Ok((text, record))
}

fn render_group<T: Lane + Default>(
    shape: &FixtureShape,
    mut fill: impl FnMut(&mut [T]),
) -> Result<(String, Vec<String>), String> {
    let reporter = FailureReporter::new(FailurePolicy::NonFatal);
    let mut writer = FixtureWriter::new(Vec::new(), reporter);
    let mut values = vec![T::default(); shape.lanes];
    for i in 0..shape.vectors {
        fill(&mut values);
        writer
            .write_vector(shape.indent, &values, Position::for_index(i, shape.vectors))
            .map_err(|err| format!("failed writing fixture vector {i}: {err}"))?;
    }
    let (out, reporter) = writer.into_parts();
    let text = String::from_utf8(out)
        .map_err(|err| format!("fixture text is not valid UTF-8: {err}"))?;
    Ok((text, reporter.notes().to_vec()))
}

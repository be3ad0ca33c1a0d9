use crate::{
    config::AxisRange,
    error::{Result, SynthError},
};

/*
Partitions and Target Tables
============================

The mapper turns a continuous coordinate into one of N discrete musical
choices. Each axis gets a partition, N ascending boundaries splitting a span
into equal bins, and a parallel table of N targets:

    vertical span 50..400 mm, 16 bins, width 21.875 mm

    boundary   50.0   71.9   93.8  ...  378.1
    bin           0      1      2  ...     15
    pitch       440  493.9  523.3  ...  1975.5

A coordinate belongs to bin i when boundary[i] <= v < boundary[i+1]. The last
bin has no upper boundary, so anything at or above boundary[N-1] lands there
(clamp high). Anything below boundary[0] matches nothing.

A separate gate decides whether the coordinate is considered at all. The gate
is usually wider than the partition: a hand 450 mm up is still "playing" and
clamps to the top note, a hand 600 mm up has left the instrument.


Equal Temperament
-----------------

Each semitone multiplies frequency by 2^(1/12) ≈ 1.0595. A scale is a
repeating pattern of semitone steps. The instrument ships with

    2 1 2 2 1 2 2      (a diatonic pattern; from A it spells A B C D E F G)

Running sums give offsets from the base pitch, 0 2 3 5 7 8 10 12 14 15 ...,
and

    f_i = base × 2^(offset_i / 12)

so offset 12 is exactly one octave up.
*/

/// `count` frequencies on an equal-tempered scale above `base_frequency`.
///
/// `scale_steps` is cycled: after the last step the pattern starts again from
/// the first.
pub fn build_pitch_table(
    base_frequency: f32,
    scale_steps: &[u32],
    count: usize,
) -> Result<Vec<f32>> {
    if !base_frequency.is_finite() || base_frequency <= 0.0 {
        return Err(SynthError::invalid("base_frequency", base_frequency));
    }
    if scale_steps.is_empty() {
        return Err(SynthError::InvalidTable("scale has no steps".into()));
    }

    // the first entry sits on the base itself
    let steps = std::iter::once(&0).chain(scale_steps.iter().cycle());

    let mut offset = 0u32;
    let mut table = Vec::with_capacity(count);
    for &step in steps.take(count) {
        offset = offset
            .checked_add(step)
            .ok_or_else(|| SynthError::InvalidTable("scale offset overflows".into()))?;
        let frequency = base_frequency * 2.0f32.powf(offset as f32 / 12.0);
        if !frequency.is_finite() {
            return Err(SynthError::InvalidTable(format!(
                "pitch {} semitones above {base_frequency} Hz is out of range",
                offset
            )));
        }
        table.push(frequency);
    }
    Ok(table)
}

/// `count` equally spaced values starting at `min`, covering `[min, max)`.
pub fn build_linear_table(min: f32, max: f32, count: usize) -> Result<Vec<f32>> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(SynthError::InvalidTable(format!(
            "range [{min}, {max}) is empty or not finite"
        )));
    }
    if count == 0 {
        return Err(SynthError::InvalidTable("table needs at least one entry".into()));
    }

    let step = (max - min) / count as f32;
    Ok((0..count).map(|i| min + step * i as f32).collect())
}

/// Index of the bin containing `value`, or `None` when the value is outside
/// `valid` or below the first boundary.
///
/// `boundaries` must be ascending. Values at or past the last boundary
/// resolve to the last bin.
pub fn map_axis_to_index(value: f32, boundaries: &[f32], valid: &AxisRange) -> Option<usize> {
    if !valid.contains(value) {
        return None;
    }
    // number of boundaries <= value
    let count = boundaries.partition_point(|&b| b <= value);
    count.checked_sub(1)
}

/// An immutable partition of one axis, paired 1:1 with target values.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionTable {
    boundaries: Vec<f32>,
    targets: Vec<f32>,
}

impl PartitionTable {
    pub fn new(boundaries: Vec<f32>, targets: Vec<f32>) -> Result<Self> {
        if boundaries.is_empty() {
            return Err(SynthError::InvalidTable("partition is empty".into()));
        }
        if boundaries.len() != targets.len() {
            return Err(SynthError::InvalidTable(format!(
                "{} boundaries but {} targets",
                boundaries.len(),
                targets.len()
            )));
        }
        if boundaries.iter().chain(&targets).any(|v| !v.is_finite()) {
            return Err(SynthError::InvalidTable("non-finite entry".into()));
        }
        if boundaries.windows(2).any(|w| w[0] >= w[1]) {
            return Err(SynthError::InvalidTable(
                "boundaries must be strictly increasing".into(),
            ));
        }
        Ok(Self { boundaries, targets })
    }

    /// Split `[min, max)` into one equal bin per target.
    pub fn linear(span: (f32, f32), targets: Vec<f32>) -> Result<Self> {
        let boundaries = build_linear_table(span.0, span.1, targets.len())?;
        Self::new(boundaries, targets)
    }

    pub fn boundaries(&self) -> &[f32] {
        &self.boundaries
    }

    pub fn targets(&self) -> &[f32] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Bin and target for `value`, gated by `valid`.
    pub fn lookup(&self, value: f32, valid: &AxisRange) -> Option<(usize, f32)> {
        map_axis_to_index(value, &self.boundaries, valid).map(|i| (i, self.targets[i]))
    }
}

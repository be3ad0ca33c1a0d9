use crate::{
    config::{AxisRange, MapperConfig},
    error::{Result, SynthError},
    io::control::ControlFrame,
    mapping::table::{build_linear_table, build_pitch_table, PartitionTable},
    synth::{control::OscillatorControl, params::validate_fraction},
};

/// Which bins a control update selected. `None` means that parameter was not
/// touched this update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub pitch_bin: Option<usize>,
    pub index_bin: Option<usize>,
    pub ratio_bin: Option<usize>,
}

impl UpdateOutcome {
    /// Nothing qualified; the oscillator keeps its last values.
    pub fn is_idle(&self) -> bool {
        self.pitch_bin.is_none() && self.index_bin.is_none() && self.ratio_bin.is_none()
    }
}

/// Turns hand positions into interpolation requests against an oscillator.
///
/// Holds the oscillator's control surface, never its state. Apart from the
/// fixed tables it keeps nothing between updates: each call depends only on
/// the frame it is given.
pub struct ParameterMapper<C: OscillatorControl> {
    control: C,
    pitches: PartitionTable,
    indices: PartitionTable,
    ratios: PartitionTable,
    vertical_gate: AxisRange,
    horizontal_gate: AxisRange,
    speed: f32,
    left_hand_ratio: bool,
}

impl<C: OscillatorControl> ParameterMapper<C> {
    pub fn new(control: C, config: &MapperConfig) -> Result<Self> {
        validate_fraction(config.interpolation_speed)?;
        if config.bins == 0 {
            return Err(SynthError::InvalidTable("mapper needs at least one bin".into()));
        }

        let pitches = PartitionTable::linear(
            config.vertical_partition,
            build_pitch_table(config.base_frequency, &config.scale_steps, config.bins)?,
        )?;
        let indices = PartitionTable::linear(
            config.horizontal_partition,
            build_linear_table(config.index_range.0, config.index_range.1, config.bins)?,
        )?;
        let ratios = PartitionTable::linear(
            config.vertical_partition,
            build_linear_table(config.ratio_range.0, config.ratio_range.1, config.bins)?,
        )?;

        tracing::debug!(
            bins = config.bins,
            lowest = pitches.targets()[0],
            highest = pitches.targets()[pitches.len() - 1],
            speed = config.interpolation_speed,
            "parameter mapper ready"
        );

        Ok(Self {
            control,
            pitches,
            indices,
            ratios,
            vertical_gate: config.vertical_gate,
            horizontal_gate: config.horizontal_gate,
            speed: config.interpolation_speed,
            left_hand_ratio: config.left_hand_ratio,
        })
    }

    pub fn pitches(&self) -> &PartitionTable {
        &self.pitches
    }

    pub fn indices(&self) -> &PartitionTable {
        &self.indices
    }

    pub fn ratios(&self) -> &PartitionTable {
        &self.ratios
    }

    pub fn interpolation_speed(&self) -> f32 {
        self.speed
    }

    pub fn set_interpolation_speed(&mut self, speed: f32) -> Result<()> {
        validate_fraction(speed)?;
        self.speed = speed;
        Ok(())
    }

    pub fn control(&self) -> &C {
        &self.control
    }

    pub fn control_mut(&mut self) -> &mut C {
        &mut self.control
    }

    pub fn into_control(self) -> C {
        self.control
    }

    /// Handle one frame from the control device.
    ///
    /// Right hand height picks a pitch, the carrier glides toward it and the
    /// modulator is asked to follow. Right hand x picks a modulation index.
    /// With `left_hand_ratio` on, left hand height picks a modulation ratio.
    /// Hands outside their gates are ignored.
    ///
    /// The update is sent all or nothing: if the control surface cannot take
    /// every change, nothing is sent and the error is returned.
    pub fn on_control_update(&mut self, frame: &ControlFrame) -> Result<UpdateOutcome> {
        let pitch = frame
            .right_hands()
            .find_map(|hand| self.pitches.lookup(hand.y(), &self.vertical_gate));
        let index = frame
            .right_hands()
            .find_map(|hand| self.indices.lookup(hand.x(), &self.horizontal_gate));
        let ratio = if self.left_hand_ratio {
            frame
                .left_hands()
                .find_map(|hand| self.ratios.lookup(hand.y(), &self.vertical_gate))
        } else {
            None
        };

        // carrier + track, index, ratio
        let messages = 2 * usize::from(pitch.is_some())
            + usize::from(index.is_some())
            + usize::from(ratio.is_some());
        self.control.reserve(messages)?;

        if let Some((_, frequency)) = pitch {
            self.control.lerp_carrier_frequency_to(frequency, self.speed)?;
            self.control.track_modulator(self.speed)?;
        }
        if let Some((_, index)) = index {
            self.control.lerp_modulation_index_to(index, self.speed)?;
        }
        if let Some((_, ratio)) = ratio {
            self.control.lerp_modulation_ratio_to(ratio, self.speed)?;
        }

        Ok(UpdateOutcome {
            pitch_bin: pitch.map(|(bin, _)| bin),
            index_bin: index.map(|(bin, _)| bin),
            ratio_bin: ratio.map(|(bin, _)| bin),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        io::control::Hand,
        synth::{oscillator::PmOscillator, params::PmParams},
    };

    fn mapper(config: MapperConfig) -> ParameterMapper<PmOscillator> {
        let osc = PmOscillator::new(44_100.0, PmParams::default()).unwrap();
        ParameterMapper::new(osc, &config).unwrap()
    }

    #[test]
    fn empty_frame_changes_nothing() {
        let mut m = mapper(MapperConfig::default());
        let before = m.control().snapshot();
        let outcome = m.on_control_update(&ControlFrame::empty()).unwrap();
        assert!(outcome.is_idle());
        assert_eq!(m.control().snapshot(), before);
    }

    #[test]
    fn left_hand_alone_is_ignored_by_default() {
        let mut m = mapper(MapperConfig::default());
        let frame = ControlFrame::empty().with_hand(Hand::left(0.0, 200.0));
        assert!(m.on_control_update(&frame).unwrap().is_idle());
    }

    #[test]
    fn right_hand_glides_toward_bin_pitch() {
        let mut m = mapper(MapperConfig::default().with_interpolation_speed(1.0));
        // bin 7 starts at 50 + 7 * 21.875 = 203.125
        let frame = ControlFrame::empty().with_hand(Hand::right(0.0, 210.0));
        let outcome = m.on_control_update(&frame).unwrap();
        assert_eq!(outcome.pitch_bin, Some(7));

        let osc = m.control();
        assert!((osc.carrier_frequency() - 880.0).abs() < 1e-2);
        // modulator follows at the current ratio (0.5)
        assert!((osc.modulation_frequency() - 440.0).abs() < 1e-2);
    }

    #[test]
    fn partial_speed_moves_part_way() {
        let mut m = mapper(MapperConfig::default());
        let frame = ControlFrame::empty().with_hand(Hand::right(-300.0, 50.0));
        let outcome = m.on_control_update(&frame).unwrap();
        assert_eq!(outcome.pitch_bin, Some(0));
        assert_eq!(outcome.index_bin, Some(0));

        // pitch bin 0 is the base (440), so the carrier stays put
        assert_eq!(m.control().carrier_frequency(), 440.0);
        // index 0.5 -> 0.5, also put
        assert_eq!(m.control().modulation_index(), 0.5);

        let frame = ControlFrame::empty().with_hand(Hand::right(300.0, 210.0));
        m.on_control_update(&frame).unwrap();
        // 440 + (880 - 440) * 0.1
        assert!((m.control().carrier_frequency() - 484.0).abs() < 1e-3);
        // index bin 15 = 0.5 + 15 * 4.5/16 = 4.71875; 0.5 + 4.21875 * 0.1
        assert!((m.control().modulation_index() - 0.921_875).abs() < 1e-5);
    }

    #[test]
    fn repeated_updates_converge() {
        let mut m = mapper(MapperConfig::default());
        let frame = ControlFrame::empty().with_hand(Hand::right(0.0, 210.0));
        let mut last_distance = f32::MAX;
        for _ in 0..200 {
            m.on_control_update(&frame).unwrap();
            let distance = (880.0 - m.control().carrier_frequency()).abs();
            assert!(distance <= last_distance);
            last_distance = distance;
        }
        assert!(last_distance < 1e-2);
        assert!((m.control().modulation_frequency() - 440.0).abs() < 0.5);
    }

    #[test]
    fn out_of_gate_hand_holds_parameters() {
        let mut m = mapper(MapperConfig::default());
        let before = m.control().snapshot();
        // above the vertical gate, outside the horizontal gate
        let frame = ControlFrame::empty().with_hand(Hand::right(301.0, 500.0));
        assert!(m.on_control_update(&frame).unwrap().is_idle());
        assert_eq!(m.control().snapshot(), before);
    }

    #[test]
    fn below_partition_but_inside_gate_is_no_match() {
        let mut m = mapper(MapperConfig::default());
        let frame = ControlFrame::empty().with_hand(Hand::right(0.0, 20.0));
        let outcome = m.on_control_update(&frame).unwrap();
        assert_eq!(outcome.pitch_bin, None);
        assert!(outcome.index_bin.is_some());
    }

    #[test]
    fn high_hand_clamps_to_top_pitch() {
        let mut m = mapper(MapperConfig::default().with_interpolation_speed(1.0));
        let frame = ControlFrame::empty().with_hand(Hand::right(0.0, 450.0));
        let outcome = m.on_control_update(&frame).unwrap();
        assert_eq!(outcome.pitch_bin, Some(15));
        let top = *m.pitches().targets().last().unwrap();
        assert!((m.control().carrier_frequency() - top).abs() < 1e-3);
    }

    #[test]
    fn second_right_hand_used_when_first_is_out_of_range() {
        let mut m = mapper(MapperConfig::default());
        let frame = ControlFrame::empty()
            .with_hand(Hand::right(0.0, 900.0))
            .with_hand(Hand::right(0.0, 100.0));
        let outcome = m.on_control_update(&frame).unwrap();
        assert_eq!(outcome.pitch_bin, Some(2));
    }

    #[test]
    fn left_hand_ratio_when_enabled() {
        let mut m = mapper(
            MapperConfig::default()
                .with_left_hand_ratio(true)
                .with_interpolation_speed(1.0),
        );
        let frame = ControlFrame::empty().with_hand(Hand::left(0.0, 50.0));
        let outcome = m.on_control_update(&frame).unwrap();
        assert_eq!(outcome.ratio_bin, Some(0));
        assert_eq!(outcome.pitch_bin, None);
        assert!((m.control().modulation_ratio() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_config() {
        let osc = PmOscillator::new(44_100.0, PmParams::default()).unwrap();
        assert!(ParameterMapper::new(osc.clone(), &MapperConfig::default().with_bins(0)).is_err());
        assert!(ParameterMapper::new(
            osc.clone(),
            &MapperConfig::default().with_interpolation_speed(2.0)
        )
        .is_err());
        let negative_base = MapperConfig::default().with_base_frequency(-1.0);
        assert!(ParameterMapper::new(osc, &negative_base).is_err());
    }

    #[test]
    fn left_hand_ratio_alone_retunes_modulator() {
        let mut m = mapper(
            MapperConfig::default()
                .with_left_hand_ratio(true)
                .with_interpolation_speed(1.0),
        );
        // top ratio bin: 0.1 + 15 * 1.9/16 = 1.88125
        let frame = ControlFrame::empty().with_hand(Hand::left(0.0, 399.0));
        m.on_control_update(&frame).unwrap();
        let osc = m.control();
        assert!((osc.modulation_frequency() - 440.0 * 1.881_25).abs() < 1e-2);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn full_queue_sends_nothing() {
        use crate::synth::engine::pm_channel;

        let osc = PmOscillator::new(44_100.0, PmParams::default()).unwrap();
        // room for two messages; a right hand in range needs three
        let (handle, mut engine) = pm_channel(osc, 2);
        let mut m = ParameterMapper::new(handle, &MapperConfig::default()).unwrap();

        let frame = ControlFrame::empty().with_hand(Hand::right(0.0, 210.0));
        assert_eq!(m.on_control_update(&frame), Err(SynthError::QueueFull));
        assert_eq!(m.control().slots(), 2);

        // an index-only update still fits
        let frame = ControlFrame::empty().with_hand(Hand::right(0.0, 20.0));
        let outcome = m.on_control_update(&frame).unwrap();
        assert_eq!(outcome.pitch_bin, None);
        assert_eq!(outcome.index_bin, Some(8));

        let mut block = [0.0f32; 16];
        engine.render_block(&mut block);
        assert_eq!(engine.snapshot().carrier_frequency, 440.0);
    }

    #[test]
    fn works_through_a_borrowed_oscillator() {
        let mut osc = PmOscillator::new(44_100.0, PmParams::default()).unwrap();
        {
            let mut m = ParameterMapper::new(
                &mut osc,
                &MapperConfig::default().with_interpolation_speed(1.0),
            )
            .unwrap();
            let frame = ControlFrame::empty().with_hand(Hand::right(0.0, 210.0));
            m.on_control_update(&frame).unwrap();
        }
        assert!((osc.carrier_frequency() - 880.0).abs() < 1e-2);
    }
}

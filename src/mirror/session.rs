use crate::errors::{MirrorError, Result};
use crate::mirror::TransformHost;
use crate::mirror::engine::{AppliedTransform, MirrorEngine};
use crate::mirror::pair::{AxisMask, BypassMask, TransformPair};
use crate::preset::{MirrorPreset, PairData, PresetLoadReport, SkippedPair};
use crate::scene::ObjectHandle;
use crate::settings::MirrorSettings;

/// A pair whose tick failed, with the reason.
#[derive(Debug)]
pub struct PairFailure {
    pub index: usize,
    pub error: MirrorError,
}

/// Outcome of one [`MirrorSession::tick`] pass.
#[derive(Debug, Default)]
pub struct TickReport {
    /// `(pair index, written transform)` in pair order.
    pub applied: Vec<(usize, AppliedTransform)>,
    pub failures: Vec<PairFailure>,
}

impl TickReport {
    /// Nothing was written and nothing failed.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.applied.is_empty() && self.failures.is_empty()
    }
}

/// The list of pairs plus the on/off state of mirroring.
///
/// The host drives it: [`start`](Self::start) once, [`tick`](Self::tick)
/// once per frame, [`stop`](Self::stop) to end. Stopping rolls every complete
/// pair back to its captured baseline.
///
/// No object may belong to two pairs. Every entry point that assigns
/// objects checks this, so the engine can treat pairs independently.
pub struct MirrorSession {
    pairs: Vec<TransformPair>,
    active: bool,
    settings: MirrorSettings,
}

impl Default for MirrorSession {
    fn default() -> Self {
        Self::new(MirrorSettings::default())
    }
}

impl MirrorSession {
    #[must_use]
    pub fn new(settings: MirrorSettings) -> Self {
        Self {
            pairs: Vec::new(),
            active: false,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &MirrorSettings {
        &self.settings
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn pairs(&self) -> &[TransformPair] {
        &self.pairs
    }

    #[must_use]
    pub fn pair(&self, index: usize) -> Option<&TransformPair> {
        self.pairs.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    // ========================================================================
    // Session lifecycle
    // ========================================================================

    /// Captures a baseline for every complete pair and turns mirroring on.
    pub fn start<H: TransformHost + ?Sized>(&mut self, host: &H) {
        if self.active {
            log::warn!("Mirroring is already running.");
            return;
        }
        let captured = self.pairs.iter_mut().map(|p| p.capture(host)).filter(|&c| c).count();
        self.active = true;
        log::info!("Mirroring started ({captured} of {} pairs captured).", self.pairs.len());
    }

    /// Turns mirroring off and restores every complete pair.
    pub fn stop<H: TransformHost + ?Sized>(&mut self, host: &mut H) {
        if !self.active {
            return;
        }
        self.active = false;
        for pair in &self.pairs {
            self.restore_complete(pair, host);
        }
        log::info!("Mirroring stopped and transforms restored to original.");
    }

    /// One propagation pass over all pairs in insertion order.
    ///
    /// Does nothing while the session is inactive. A failing pair is logged,
    /// reported and skipped; it never affects the other pairs.
    pub fn tick<H: TransformHost + ?Sized>(&mut self, host: &mut H) -> TickReport {
        let mut report = TickReport::default();
        if !self.active {
            return report;
        }

        let label = self.settings.labels.mirror.as_str();
        for (index, pair) in self.pairs.iter_mut().enumerate() {
            match MirrorEngine::tick_with_label(pair, host, label) {
                Ok(Some(applied)) => report.applied.push((index, applied)),
                Ok(None) => {}
                Err(error) => {
                    log::error!("Mirroring pair {} failed: {error}", index + 1);
                    report.failures.push(PairFailure { index, error });
                }
            }
        }
        report
    }

    // ========================================================================
    // Pair management
    // ========================================================================

    /// Appends an unassigned pair using the default mirror flags.
    pub fn add_empty_pair(&mut self) -> usize {
        self.pairs.push(TransformPair::new(self.settings.default_axis_mask));
        self.pairs.len() - 1
    }

    /// Appends a pair for two existing, unpaired objects and captures it.
    pub fn add_pair<H: TransformHost + ?Sized>(
        &mut self,
        source: ObjectHandle,
        target: ObjectHandle,
        host: &H,
    ) -> Result<usize> {
        if let Err(error) = self.check_assignment(Some(source), Some(target), None, host) {
            log::warn!("Cannot add pair: {error}");
            return Err(error);
        }
        if !host.contains(source) || !host.contains(target) {
            return Err(MirrorError::MissingReference);
        }

        let mut pair = TransformPair::with_objects(source, target, self.settings.default_axis_mask);
        pair.capture(host);
        self.pairs.push(pair);

        log::info!(
            "Added pair: {} ↔ {}",
            display_name(host, source),
            display_name(host, target)
        );
        Ok(self.pairs.len() - 1)
    }

    /// Adds a pair from an editor selection: exactly two objects, the first
    /// becomes the source.
    pub fn add_selected_pair<H: TransformHost + ?Sized>(
        &mut self,
        selection: &[ObjectHandle],
        host: &H,
    ) -> Result<usize> {
        let &[source, target] = selection else {
            log::warn!("Please select exactly two objects to add as a pair.");
            return Err(MirrorError::InvalidSelection { count: selection.len() });
        };
        self.add_pair(source, target, host)
    }

    /// Whether [`add_selected_pair`](Self::add_selected_pair) would accept `selection`.
    #[must_use]
    pub fn can_add_selection(&self, selection: &[ObjectHandle]) -> bool {
        match *selection {
            [a, b] => a != b && self.owner_of(a, None).is_none() && self.owner_of(b, None).is_none(),
            _ => false,
        }
    }

    /// Sets the objects of an existing pair. Changing either object drops the
    /// pair's baseline; while the session is active a complete pair is
    /// captured again right away.
    pub fn assign<H: TransformHost + ?Sized>(
        &mut self,
        index: usize,
        source: Option<ObjectHandle>,
        target: Option<ObjectHandle>,
        host: &H,
    ) -> Result<()> {
        self.check_index(index)?;
        if let Err(error) = self.check_assignment(source, target, Some(index), host) {
            log::warn!("Cannot assign pair {}: {error}", index + 1);
            return Err(error);
        }

        let active = self.active;
        let pair = &mut self.pairs[index];
        pair.set_objects(source, target);
        if active && !pair.is_captured() {
            pair.capture(host);
        }
        Ok(())
    }

    pub fn set_axis_mask(&mut self, index: usize, mask: AxisMask) -> Result<()> {
        self.check_index(index)?;
        self.pairs[index].axis_mask = mask;
        Ok(())
    }

    pub fn set_bypass_mask(&mut self, index: usize, mask: BypassMask) -> Result<()> {
        self.check_index(index)?;
        self.pairs[index].bypass_mask = mask;
        Ok(())
    }

    /// Removes a pair, restoring it first if mirroring is running.
    pub fn remove_pair<H: TransformHost + ?Sized>(
        &mut self,
        index: usize,
        host: &mut H,
    ) -> Result<TransformPair> {
        self.check_index(index)?;
        let pair = self.pairs.remove(index);
        if self.active {
            self.restore_complete(&pair, host);
        }
        Ok(pair)
    }

    /// Writes one pair's baselines back to its objects. Incomplete pairs are left alone.
    pub fn restore_pair<H: TransformHost + ?Sized>(&self, index: usize, host: &mut H) -> Result<()> {
        self.check_index(index)?;
        self.restore_complete(&self.pairs[index], host);
        Ok(())
    }

    /// Exchanges source and target of one pair.
    pub fn swap_pair<H: TransformHost + ?Sized>(&mut self, index: usize, host: &H) -> Result<()> {
        self.check_index(index)?;
        let pair = &mut self.pairs[index];
        if let Err(error) = pair.swap(host) {
            log::warn!("Cannot swap pair {}: {error}", index + 1);
            return Err(error);
        }
        if let (Some(source), Some(target)) = (pair.source(), pair.target()) {
            log::info!(
                "Swapped pair: {} ↔ {}",
                display_name(host, source),
                display_name(host, target)
            );
        }
        Ok(())
    }

    /// Restores (if active) and drops every pair.
    pub fn clear<H: TransformHost + ?Sized>(&mut self, host: &mut H) {
        if self.active {
            for pair in &self.pairs {
                self.restore_complete(pair, host);
            }
        }
        self.pairs.clear();
    }

    // ========================================================================
    // Presets
    // ========================================================================

    /// Snapshot of the pair list for persistence. Unset or destroyed
    /// references are stored as empty names.
    #[must_use]
    pub fn to_preset<H: TransformHost + ?Sized>(&self, name: &str, host: &H) -> MirrorPreset {
        let name_of = |object: Option<ObjectHandle>| {
            object
                .and_then(|o| host.object_name(o))
                .unwrap_or_default()
                .to_owned()
        };

        MirrorPreset {
            name: name.to_owned(),
            pairs: self
                .pairs
                .iter()
                .map(|pair| PairData {
                    source_name: name_of(pair.source()),
                    target_name: name_of(pair.target()),
                    axis_mask: pair.axis_mask,
                    bypass_mask: pair.bypass_mask,
                    initial_source: *pair.initial_source(),
                    initial_target: *pair.initial_target(),
                })
                .collect(),
        }
    }

    /// Replaces the pair list with the preset's pairs, resolved by name.
    ///
    /// A pair whose objects cannot be found, or that would reuse an object
    /// already loaded, is skipped entirely and reported. The current pairs
    /// are restored first if mirroring is running; the session stays active.
    pub fn load_preset<H: TransformHost + ?Sized>(
        &mut self,
        preset: &MirrorPreset,
        host: &mut H,
    ) -> PresetLoadReport {
        self.clear(host);

        let mut report = PresetLoadReport::default();
        for (index, data) in preset.pairs.iter().enumerate() {
            match self.resolve_pair_data(data, &*host) {
                Ok(pair) => {
                    self.pairs.push(pair);
                    report.loaded += 1;
                }
                Err(error) => {
                    log::warn!(
                        "Skipping preset pair '{}' -> '{}': {error}",
                        data.source_name,
                        data.target_name
                    );
                    report.skipped.push(SkippedPair { index, error });
                }
            }
        }

        log::info!(
            "Loaded preset '{}': {} pairs, {} skipped.",
            preset.name,
            report.loaded,
            report.skipped.len()
        );
        report
    }

    fn resolve_pair_data<H: TransformHost + ?Sized>(&self, data: &PairData, host: &H) -> Result<TransformPair> {
        let source = host
            .find_object(&data.source_name)
            .ok_or_else(|| MirrorError::ObjectNotFound(data.source_name.clone()))?;
        let target = host
            .find_object(&data.target_name)
            .ok_or_else(|| MirrorError::ObjectNotFound(data.target_name.clone()))?;
        self.check_assignment(Some(source), Some(target), None, host)?;

        let mut pair = TransformPair::from_baseline(source, target, data.initial_source, data.initial_target, host);
        pair.axis_mask = data.axis_mask;
        pair.bypass_mask = data.bypass_mask;
        Ok(pair)
    }

    /// Restore path shared by stop, clear and removal: a pair missing either
    /// object is inert and writes nothing.
    fn restore_complete<H: TransformHost + ?Sized>(&self, pair: &TransformPair, host: &mut H) {
        if pair.is_complete(&*host) {
            pair.restore_with_labels(host, &self.settings.labels);
        }
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.pairs.len() {
            Ok(())
        } else {
            Err(MirrorError::PairIndexOutOfBounds {
                index,
                len: self.pairs.len(),
            })
        }
    }

    /// Index of the pair (other than `skip`) that already uses `object`.
    fn owner_of(&self, object: ObjectHandle, skip: Option<usize>) -> Option<usize> {
        self.pairs
            .iter()
            .enumerate()
            .find(|&(i, pair)| Some(i) != skip && pair.involves(object))
            .map(|(i, _)| i)
    }

    fn check_assignment<H: TransformHost + ?Sized>(
        &self,
        source: Option<ObjectHandle>,
        target: Option<ObjectHandle>,
        skip: Option<usize>,
        host: &H,
    ) -> Result<()> {
        if source.is_some() && source == target {
            return Err(MirrorError::SameObject);
        }
        for object in source.into_iter().chain(target) {
            if self.owner_of(object, skip).is_some() {
                return Err(MirrorError::DuplicateMembership {
                    name: display_name(host, object),
                });
            }
        }
        Ok(())
    }
}

fn display_name<H: TransformHost + ?Sized>(host: &H, object: ObjectHandle) -> String {
    host.object_name(object)
        .map_or_else(|| format!("{object:?}"), str::to_owned)
}

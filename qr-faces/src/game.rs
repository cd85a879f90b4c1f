use crate::actions::UserAction;
use crate::capture::{CaptureSwitch, FrameSource};
use crate::config::GameConfig;
use crate::constants::{CAMERA_ERROR, REMOVE_PROMPT, RESET_PROMPT};
use crate::error::Result;
use crate::face::derive_face;
use crate::snapshot::GameSnapshot;
use crate::store::{CollectionStore, StorageBackend};
use crate::throttle::Throttle;
use crate::types::{Collection, Face, FaceRules};
use rand::RngCore;
use std::time::Instant;

// Session state for one player: the saved collection, the face currently in front of the
// camera, and the capture switch. Every collection mutation is written straight back to the
// store.

/// Gate for destructive actions. Closures `FnMut(&str) -> bool` qualify.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub struct FaceCollector<B, R> {
    store: CollectionStore<B>,
    rng: R,
    rules: FaceRules,
    collection: Collection,
    found: Option<Face>,
    display: Throttle<Option<Face>>,
    capture: CaptureSwitch,
    errors: Vec<String>,
}

impl<B: StorageBackend, R: RngCore> FaceCollector<B, R> {
    /// Loads the collection once; later mutations overwrite the stored copy in full.
    pub fn open(store: CollectionStore<B>, rng: R, config: &GameConfig) -> Self {
        let collection = store.load();
        Self {
            store,
            rng,
            rules: config.rules(),
            collection,
            found: None,
            display: Throttle::new(None, config.throttle(), Instant::now()),
            capture: CaptureSwitch::new(),
            errors: Vec::new(),
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn found(&self) -> Option<&Face> {
        self.found.as_ref()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn rules(&self) -> &FaceRules {
        &self.rules
    }

    pub fn capture_on(&self) -> bool {
        self.capture.is_on()
    }

    pub fn capture_switch(&self) -> CaptureSwitch {
        self.capture.clone()
    }

    /// Derives the face for a payload and makes it the found face.
    pub fn scan(&mut self, payload: &str) -> &Face {
        let face = derive_face(payload, &self.rules, &mut self.rng);
        self.display.update(Some(face.clone()), Instant::now());
        self.found.insert(face)
    }

    pub fn clear_found(&mut self) {
        if self.found.take().is_some() {
            self.display.update(None, Instant::now());
        }
    }

    /// The found face as a UI should show it: changes at most once per throttle interval.
    pub fn displayed_face(&mut self, now: Instant) -> Option<&Face> {
        self.display.poll(now).as_ref()
    }

    pub fn add_found(&mut self) -> Result<Option<Face>> {
        let face = match &self.found {
            Some(face) => face.clone(),
            None => return Ok(None),
        };
        let mut next = self.collection.clone();
        next.push(face.clone());
        self.commit(next)?;
        log::info!("collected {} ({} total)", face, self.collection.len());
        Ok(Some(face))
    }

    /// Removes the entry at `index` if the user confirms. Out of range is a no-op.
    pub fn remove(&mut self, index: usize, confirm: &mut impl Confirm) -> Result<Option<Face>> {
        if self.collection.get(index).is_none() {
            return Ok(None);
        }
        if !confirm.confirm(REMOVE_PROMPT) {
            return Ok(None);
        }
        let mut next = self.collection.clone();
        let removed = next.remove_at(index);
        self.commit(next)?;
        if let Some(face) = &removed {
            log::info!("removed {} ({} left)", face, self.collection.len());
        }
        Ok(removed)
    }

    /// Empties the collection if it has anything in it and the user confirms.
    pub fn reset(&mut self, confirm: &mut impl Confirm) -> Result<bool> {
        if self.collection.is_empty() || !confirm.confirm(RESET_PROMPT) {
            return Ok(false);
        }
        self.commit(Collection::new())?;
        log::info!("collection reset");
        Ok(true)
    }

    /// Saves `next` and only then makes it the in-memory collection, so a failed write
    /// leaves both copies as they were.
    fn commit(&mut self, next: Collection) -> Result<()> {
        self.store.save(&next)?;
        self.collection = next;
        Ok(())
    }

    /// Opens the source and turns capture on. On failure the user sees one camera message
    /// and capture stays off. Through `apply` the failure is only reported in the snapshot.
    pub fn start_capture(&mut self, source: &mut impl FrameSource) -> Result<()> {
        if self.capture.is_on() {
            return Ok(());
        }
        match source.open() {
            Ok(()) => {
                self.errors.clear();
                self.capture.set(true);
                log::info!("capture started");
                Ok(())
            }
            Err(err) => {
                log::error!("camera unavailable: {}", err);
                self.errors = vec![CAMERA_ERROR.to_string()];
                Err(err)
            }
        }
    }

    pub fn stop_capture(&mut self, source: &mut impl FrameSource) {
        let was_on = self.capture.is_on();
        self.capture.set(false);
        source.close();
        self.clear_found();
        if was_on {
            log::info!("capture stopped");
        }
    }

    pub fn toggle_capture(&mut self, source: &mut impl FrameSource) -> Result<bool> {
        if self.capture.is_on() {
            self.stop_capture(source);
        } else {
            self.start_capture(source)?;
        }
        Ok(self.capture.is_on())
    }

    pub fn apply(
        &mut self,
        action: UserAction,
        confirm: &mut impl Confirm,
        source: &mut impl FrameSource,
    ) -> Result<GameSnapshot> {
        log::debug!("applying {:?}", action);
        match action {
            UserAction::Scan { payload } => {
                self.scan(&payload);
            }
            UserAction::ClearFound => self.clear_found(),
            UserAction::AddFound => {
                self.add_found()?;
            }
            UserAction::Remove { index } => {
                self.remove(index, confirm)?;
            }
            UserAction::Reset => {
                self.reset(confirm)?;
            }
            UserAction::StartCapture => {
                if let Err(err) = self.start_capture(source) {
                    log::debug!("start capture failed: {}", err);
                }
            }
            UserAction::StopCapture => self.stop_capture(source),
            UserAction::ToggleCapture => {
                if let Err(err) = self.toggle_capture(source) {
                    log::debug!("toggle capture failed: {}", err);
                }
            }
        }
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::compose(
            &self.collection,
            self.found.as_ref(),
            self.capture.is_on(),
            &self.errors,
        )
    }
}

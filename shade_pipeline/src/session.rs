//! Analysis session: one user's pipeline state.
//!
//! The session owns the lazily loaded classifier, the catalog, the last
//! committed analysis and the page cursor. Submissions may race (a user
//! recaptures while a previous photo is still being scored); the session
//! guarantees that exactly one result is visible afterwards, the one from
//! the latest submission.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use image::DynamicImage;
use ort_classifier::{preprocess, Classifier, InferenceError, ModelLoadError};
use shade_common::catalog::Product;
use shade_common::paginate::{self, PAGE_SIZE};
use shade_common::palette::{self, ConfigurationError, SkinTonePalette};
use shade_common::recommend::{self, ScoredProduct};

use crate::error::PipelineError;

type LoaderFn<C> = Box<dyn Fn() -> Result<C, ModelLoadError> + Send + Sync>;

/// Lazily loaded classifier shared by all submissions.
///
/// The mutex makes loading single-flight: a submission arriving while the
/// model is still loading blocks here and then reuses the freshly loaded
/// classifier instead of kicking off a second load. A failed load leaves
/// the slot empty, so the next submission retries.
struct ModelSlot<C> {
    loader: LoaderFn<C>,
    slot: Mutex<Option<C>>,
}

impl<C: Classifier> ModelSlot<C> {
    fn new(loader: LoaderFn<C>) -> Self {
        Self {
            loader,
            slot: Mutex::new(None),
        }
    }

    /// Runs `f` on the classifier, loading it first if needed.
    fn with_classifier<T>(
        &self,
        f: impl FnOnce(&mut C) -> Result<T, InferenceError>,
    ) -> Result<T, PipelineError> {
        let mut slot = self.slot.lock().unwrap();
        if slot.is_none() {
            log::info!("Loading classifier on first use");
            *slot = Some((self.loader)()?);
        }
        // Filled right above, or the load error already returned.
        let classifier = slot.as_mut().unwrap();
        Ok(f(classifier)?)
    }

    fn is_loaded(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }
}

/// Outcome of one [`AnalysisSession::analyze`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStatus {
    /// The result is now the session's visible result.
    Committed,
    /// A newer submission finished first; this result was discarded.
    Superseded,
}

/// One committed analysis.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub class_id: usize,
    pub palette: &'static SkinTonePalette,
    /// Full ranked list; pagination happens on top of this.
    pub products: Vec<ScoredProduct>,
}

/// Owned snapshot of one result page, for handing to presentation.
#[derive(Debug, Clone)]
pub struct PageView {
    pub number: usize,
    pub total_pages: usize,
    pub visible_numbers: Vec<usize>,
    pub items: Vec<ScoredProduct>,
}

struct SessionState {
    committed_generation: u64,
    result: Option<AnalysisResult>,
    current_page: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            committed_generation: 0,
            result: None,
            current_page: 1,
        }
    }
}

/// Pipeline state for one user session.
pub struct AnalysisSession<C> {
    model: ModelSlot<C>,
    catalog: Vec<Product>,
    generation: AtomicU64,
    state: Mutex<SessionState>,
}

impl<C: Classifier> AnalysisSession<C> {
    /// Creates a session over `catalog`. The classifier is not loaded until
    /// the first submission (or an explicit [`warm_up`](Self::warm_up)).
    pub fn new(
        catalog: Vec<Product>,
        loader: impl Fn() -> Result<C, ModelLoadError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            model: ModelSlot::new(Box::new(loader)),
            catalog,
            generation: AtomicU64::new(0),
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Loads the classifier now and cross-checks it against the palette
    /// registry, so artifact problems surface at startup instead of on the
    /// first user submission.
    pub fn warm_up(&self) -> Result<(), PipelineError> {
        let model_classes = self.model.with_classifier(|c| Ok(c.class_count()))?;
        let registry_classes = palette::class_count();
        if model_classes > registry_classes {
            return Err(ConfigurationError::ClassCountMismatch {
                model: model_classes,
                registry: registry_classes,
            }
            .into());
        }
        Ok(())
    }

    /// Whether the classifier is loaded.
    pub fn is_ready(&self) -> bool {
        self.model.is_loaded()
    }

    /// Runs the full pipeline on one frame and commits the result unless a
    /// newer submission already did.
    ///
    /// Every submission draws a generation number at entry. After scoring,
    /// the result commits only if its generation is newer than the last
    /// committed one, so when calls race the latest submission wins
    /// regardless of completion order. Committing resets the page cursor
    /// to 1. A failed analysis commits nothing: the previous result and
    /// cursor stay visible.
    pub fn analyze(&self, frame: &DynamicImage) -> Result<AnalysisStatus, PipelineError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Analysis generation {generation} starting");

        let tensor = preprocess::to_input_tensor(frame);
        let class_id = self.model.with_classifier(|c| c.classify(&tensor))?;
        let palette = palette::palette_for(class_id)?;
        let products = recommend::recommend(class_id, &self.catalog)?;
        log::info!(
            "Generation {generation}: class {class_id} ({}), {} products matched",
            palette.title,
            products.len()
        );

        Ok(self.commit(
            generation,
            AnalysisResult {
                class_id,
                palette,
                products,
            },
        ))
    }

    fn commit(&self, generation: u64, result: AnalysisResult) -> AnalysisStatus {
        let mut state = self.state.lock().unwrap();
        if generation <= state.committed_generation {
            log::debug!(
                "Generation {generation} superseded by {}",
                state.committed_generation
            );
            return AnalysisStatus::Superseded;
        }
        state.committed_generation = generation;
        state.result = Some(result);
        state.current_page = 1;
        AnalysisStatus::Committed
    }

    /// Last committed analysis, cloned out.
    // TODO hand out Arc<AnalysisResult> instead of cloning the ranked list.
    pub fn result(&self) -> Option<AnalysisResult> {
        self.state.lock().unwrap().result.clone()
    }

    /// Snapshot of the current page, or `None` before the first committed
    /// analysis.
    pub fn page_view(&self) -> Option<PageView> {
        let state = self.state.lock().unwrap();
        let result = state.result.as_ref()?;
        let page = paginate::page(&result.products, PAGE_SIZE, state.current_page);
        Some(PageView {
            number: page.number,
            total_pages: page.total_pages,
            visible_numbers: paginate::visible_page_numbers(page.number, page.total_pages),
            items: page.items.to_vec(),
        })
    }

    /// Moves to the next page; no-op on the last page or before any result.
    pub fn next_page(&self) {
        let mut state = self.state.lock().unwrap();
        let total = state
            .result
            .as_ref()
            .map_or(0, |r| paginate::total_pages(r.products.len(), PAGE_SIZE));
        if state.current_page < total {
            state.current_page += 1;
        }
    }

    /// Moves to the previous page; no-op on page 1.
    pub fn prev_page(&self) {
        let mut state = self.state.lock().unwrap();
        if state.current_page > 1 {
            state.current_page -= 1;
        }
    }

    /// Jumps to `number` without clamping. Out-of-range pages render empty
    /// rather than failing.
    pub fn go_to_page(&self, number: usize) {
        self.state.lock().unwrap().current_page = number;
    }

    /// Current 1-based page number.
    pub fn current_page(&self) -> usize {
        self.state.lock().unwrap().current_page
    }
}

//! Session lifecycle tests driven by stub classifiers.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use image::DynamicImage;
use ort_classifier::{Classifier, InferenceError, InputTensor, ModelLoadError};
use shade_common::catalog::{Product, Shade};
use shade_pipeline::session::{AnalysisSession, AnalysisStatus};
use shade_pipeline::PipelineError;

struct StubClassifier {
    class_id: usize,
    fail: Arc<AtomicBool>,
}

impl StubClassifier {
    fn steady(class_id: usize) -> Self {
        Self {
            class_id,
            fail: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Classifier for StubClassifier {
    fn classify(&mut self, _input: &InputTensor) -> Result<usize, InferenceError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(InferenceError::EmptyOutput);
        }
        Ok(self.class_id)
    }

    fn class_count(&self) -> usize {
        3
    }
}

fn shaded_product(id: u64) -> Product {
    Product {
        id,
        name: format!("Product {id}"),
        brand: Some("testbrand".to_string()),
        price: Some("9.99".to_string()),
        price_sign: None,
        product_link: None,
        image_link: None,
        shades: vec![Shade {
            // Sits exactly on a Warm Medium target, so class 1 matches it.
            hex: "#D29C7B".to_string(),
            name: Some("Tan".to_string()),
        }],
    }
}

fn matching_catalog(len: usize) -> Vec<Product> {
    (1..=len as u64).map(shaded_product).collect()
}

fn frame() -> DynamicImage {
    DynamicImage::new_rgb8(8, 8)
}

#[test]
fn test_model_loads_once_across_concurrent_submissions() {
    let loads = Arc::new(AtomicUsize::new(0));
    let loader_loads = Arc::clone(&loads);
    let session = Arc::new(AnalysisSession::new(matching_catalog(5), move || {
        loader_loads.fetch_add(1, Ordering::SeqCst);
        Ok(StubClassifier::steady(1))
    }));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let session = Arc::clone(&session);
        handles.push(thread::spawn(move || session.analyze(&frame()).unwrap()));
    }
    let statuses: Vec<AnalysisStatus> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    // One load serves every submission, and the latest one committed.
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert!(statuses.contains(&AnalysisStatus::Committed));
    assert!(session.is_ready());
    assert_eq!(session.result().unwrap().products.len(), 5);
}

#[test]
fn test_failed_load_leaves_slot_empty_for_retry() {
    let attempts = Arc::new(AtomicUsize::new(0));
    let loader_attempts = Arc::clone(&attempts);
    let session = AnalysisSession::new(matching_catalog(3), move || {
        if loader_attempts.fetch_add(1, Ordering::SeqCst) == 0 {
            Err(ModelLoadError::MissingField("a usable InputLayer input shape"))
        } else {
            Ok(StubClassifier::steady(1))
        }
    });

    let err = session.analyze(&frame()).unwrap_err();
    assert!(matches!(err, PipelineError::ModelLoad(_)));
    assert!(!session.is_ready());
    assert!(session.result().is_none());

    // The slot stayed empty, so the next submission retries the load.
    assert_eq!(session.analyze(&frame()).unwrap(), AnalysisStatus::Committed);
    assert!(session.is_ready());
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_failed_analysis_leaves_previous_state_untouched() {
    let fail = Arc::new(AtomicBool::new(false));
    let loader_fail = Arc::clone(&fail);
    let session = AnalysisSession::new(matching_catalog(9), move || {
        Ok(StubClassifier {
            class_id: 1,
            fail: Arc::clone(&loader_fail),
        })
    });

    assert_eq!(session.analyze(&frame()).unwrap(), AnalysisStatus::Committed);
    session.go_to_page(2);

    fail.store(true, Ordering::SeqCst);
    assert!(matches!(
        session.analyze(&frame()),
        Err(PipelineError::Inference(_))
    ));

    // Previous result and cursor are still visible.
    let result = session.result().unwrap();
    assert_eq!(result.class_id, 1);
    assert_eq!(result.products.len(), 9);
    assert_eq!(session.current_page(), 2);
}

#[test]
fn test_unmapped_class_id_is_a_configuration_error() {
    let session = AnalysisSession::new(matching_catalog(2), || Ok(StubClassifier::steady(9)));

    let err = session.analyze(&frame()).unwrap_err();
    assert!(matches!(err, PipelineError::Configuration(_)));
    assert!(session.result().is_none());
}

#[test]
fn test_warm_up_cross_checks_the_class_count() {
    struct WideClassifier;
    impl Classifier for WideClassifier {
        fn classify(&mut self, _input: &InputTensor) -> Result<usize, InferenceError> {
            Ok(0)
        }
        fn class_count(&self) -> usize {
            7
        }
    }

    let session = AnalysisSession::new(Vec::new(), || Ok(WideClassifier));
    let err = session.warm_up().unwrap_err();
    assert!(matches!(err, PipelineError::Configuration(_)));

    let session = AnalysisSession::new(Vec::new(), || Ok(StubClassifier::steady(0)));
    session.warm_up().unwrap();
    assert!(session.is_ready());
}

#[test]
fn test_page_navigation_over_a_committed_result() {
    let session = AnalysisSession::new(matching_catalog(13), || Ok(StubClassifier::steady(1)));
    session.analyze(&frame()).unwrap();

    let view = session.page_view().unwrap();
    assert_eq!(view.number, 1);
    assert_eq!(view.total_pages, 4);
    assert_eq!(view.items.len(), 4);
    assert_eq!(view.visible_numbers, vec![1, 2, 3, 4]);

    session.next_page();
    session.next_page();
    session.next_page();
    assert_eq!(session.current_page(), 4);
    assert_eq!(session.page_view().unwrap().items.len(), 1);

    // Already on the last page: no-op.
    session.next_page();
    assert_eq!(session.current_page(), 4);

    session.prev_page();
    assert_eq!(session.current_page(), 3);

    // Unclamped jump renders an empty page.
    session.go_to_page(9);
    let view = session.page_view().unwrap();
    assert_eq!(view.number, 9);
    assert!(view.items.is_empty());
    // The button window anchors on the last real page.
    assert_eq!(view.visible_numbers, vec![1, 2, 3, 4]);

    // A fresh committed result snaps back to page 1.
    session.analyze(&frame()).unwrap();
    assert_eq!(session.current_page(), 1);
}

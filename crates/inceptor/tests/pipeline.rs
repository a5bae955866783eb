use inceptor::core::prelude::*;
use inceptor::{list_images, Pipeline, PipelineConfig};
use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

const LABELS: [&str; 3] = ["bright left", "bright right", "flat"];

/// Scores each slot by the sign of its first red value.
struct SignInferer {
    batch_size: usize,
    calls: Arc<AtomicUsize>,
    in_shapes: Vec<(String, Vec<usize>)>,
    out_shapes: Vec<(String, Vec<usize>)>,
}

impl SignInferer {
    fn new(config: &PipelineConfig, calls: Arc<AtomicUsize>) -> Self {
        Self {
            batch_size: config.capacity,
            calls,
            in_shapes: vec![("input".to_owned(), config.element_shape().to_vec())],
            out_shapes: vec![("output".to_owned(), vec![LABELS.len()])],
        }
    }
}

impl Inferer for SignInferer {
    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn input_shapes(&self) -> &[(String, Vec<usize>)] {
        &self.in_shapes
    }

    fn output_shapes(&self) -> &[(String, Vec<usize>)] {
        &self.out_shapes
    }

    fn infer_raw(&mut self, inputs: Vec<BatchTensor>) -> anyhow::Result<Vec<RawOutput>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let tensor = &inputs[0];
        let data = (0..tensor.batch_size())
            .flat_map(|slot| {
                let red = tensor.get(slot, 0, 0, 0).unwrap_or_default();
                if red > 0.0 {
                    [0.9, 0.05, 0.05]
                } else if red < 0.0 {
                    [0.1, 0.8, 0.1]
                } else {
                    [0.2, 0.2, 0.6]
                }
            })
            .collect();

        Ok(vec![RawOutput {
            shape: vec![tensor.batch_size(), LABELS.len()],
            data,
        }])
    }
}

fn config(capacity: usize) -> PipelineConfig {
    PipelineConfig {
        capacity,
        width: 2,
        height: 1,
        ..PipelineConfig::default()
    }
}

fn pipeline(config: PipelineConfig) -> (Pipeline, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let inferer = SignInferer::new(&config, calls.clone());
    let labels = LabelTable::from(LABELS.iter().map(|l| l.to_string()).collect::<Vec<_>>());

    (
        Pipeline::new(config, Box::new(inferer), labels).unwrap(),
        calls,
    )
}

fn write_png(path: &Path, left: u8, right: u8) -> PathBuf {
    image::RgbImage::from_fn(2, 1, |x, _| {
        let v = if x == 0 { left } else { right };
        image::Rgb([v, v, v])
    })
    .save(path)
    .unwrap();

    path.to_owned()
}

#[test]
fn test_classifies_in_listing_order() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("c.png"), 90, 90);
    write_png(&dir.path().join("a.png"), 255, 0);
    write_png(&dir.path().join("b.png"), 0, 255);

    let (mut pipeline, calls) = pipeline(config(5));
    let images = list_images(dir.path()).unwrap();
    let results = pipeline.classify(&images).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let found: Vec<_> = results
        .iter()
        .map(|r| {
            (
                r.path.file_name().unwrap().to_str().unwrap().to_owned(),
                r.best.label.clone(),
            )
        })
        .collect();

    assert_eq!(
        found,
        vec![
            ("a.png".to_owned(), "bright left".to_owned()),
            ("b.png".to_owned(), "bright right".to_owned()),
            ("c.png".to_owned(), "flat".to_owned()),
        ]
    );

    assert_eq!(
        results[0].best.to_string(),
        "BEST MATCH: (90% likely) bright left"
    );
}

#[test]
fn test_prepare_centers_each_image_and_zero_fills() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_png(&dir.path().join("one.png"), 255, 0);

    let (pipeline, _) = pipeline(config(3));
    let tensor = pipeline.prepare(&[image]).unwrap();

    assert_eq!(tensor.shape(), [3, 1, 2, 3]);

    // Mean 127.5 rounds to 128.
    let left = tensor.get(0, 0, 0, 0).unwrap();
    let right = tensor.get(0, 0, 1, 0).unwrap();
    assert!((left - 127.0 / 255.0).abs() < 1e-6);
    assert!((right + 128.0 / 255.0).abs() < 1e-6);

    assert!(tensor.slot(1).iter().chain(tensor.slot(2)).all(|v| *v == 0.0));
}

#[test]
fn test_too_many_images_fail_before_decoding() {
    let (mut pipeline, calls) = pipeline(config(2));
    let paths: Vec<PathBuf> = ["missing-1.png", "missing-2.png", "missing-3.png"]
        .iter()
        .map(PathBuf::from)
        .collect();

    let err = pipeline.classify(&paths).unwrap_err();

    assert!(matches!(err, InceptorError::BatchOverflow { capacity: 2 }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_undecodable_image_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_png(&dir.path().join("a.png"), 255, 0);
    let bad = dir.path().join("b.jpg");
    std::fs::write(&bad, b"definitely not a jpeg").unwrap();

    let (mut pipeline, calls) = pipeline(config(5));
    let err = pipeline.classify(&[good, bad.clone()]).unwrap_err();

    assert!(matches!(err, InceptorError::Decode { path, .. } if path == bad));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_earliest_listed_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let images: Vec<PathBuf> = ["a.jpg", "b.png", "c.jpg", "d.jpg"]
        .iter()
        .map(|name| dir.path().join(name))
        .collect();

    std::fs::write(&images[0], b"truncated").unwrap();
    write_png(&images[1], 255, 0);
    std::fs::write(&images[2], b"also truncated").unwrap();
    std::fs::write(&images[3], b"still truncated").unwrap();

    let (pipeline, _) = pipeline(config(5));

    for _ in 0..8 {
        let err = pipeline.prepare(&images).unwrap_err();
        assert!(matches!(err, InceptorError::Decode { path, .. } if path == images[0]));
    }
}

#[test]
fn test_zero_scale_is_rejected() {
    let calls = Arc::new(AtomicUsize::new(0));
    let config = PipelineConfig {
        scale: 0.0,
        ..config(1)
    };
    let inferer = SignInferer::new(&config, calls);

    let result = Pipeline::new(config, Box::new(inferer), LabelTable::default());
    assert!(matches!(result, Err(InceptorError::DivideByZero)));
}

#[test]
fn test_list_images_sorts_and_skips_directories() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("zebra.png"), 1, 2);
    write_png(&dir.path().join("moth.png"), 1, 2);
    std::fs::create_dir(dir.path().join("albums")).unwrap();

    let images = list_images(dir.path()).unwrap();

    assert_eq!(
        images,
        vec![dir.path().join("moth.png"), dir.path().join("zebra.png")]
    );
}

#[test]
fn test_list_images_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    assert!(matches!(
        list_images(&missing),
        Err(InceptorError::Io { path, .. }) if path == missing
    ));
}

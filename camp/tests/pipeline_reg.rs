//! End-to-end pipeline regression test
//!
//! Loads a configuration, then segments and recognizes the bar chart
//! fixture through the facade crate.
//!
//! Run with:
//! ```
//! cargo test -p camp --test pipeline_reg
//! ```

use camp::PipelineConfig;
use camp::io::write_image;
use camp::recog::{
    FigureRecognitor, NoOcr, Pipeline, RecognizerRegistry, Segmentizer, TextRecognitor,
};
use camp::region::{ConnectivityType, SegmentId};
use camp_test::{RegParams, load_test_image, regout_dir};

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    let config = PipelineConfig::from_json(
        r#"{"segmentation": {"adjacency": "eightway"}, "text": {"letter_delta": 2}}"#,
    )
    .unwrap();
    assert_eq!(config.segmentation.adjacency, ConnectivityType::EightWay);

    let pix = load_test_image("bars.ppm").expect("load bars.ppm");
    let mut pipeline = Pipeline::new()
        .with_stage(Segmentizer::new(config.segmentation))
        .with_stage(TextRecognitor::new(NoOcr, config.text.clone()).unwrap())
        .with_stage(FigureRecognitor::new(RecognizerRegistry::builtin()));
    assert_eq!(
        pipeline.names(),
        vec!["Segmentizer", "TextRecognitor", "FigureRecognitor"]
    );
    let store = pipeline.run(&pix).unwrap();

    let seg = store.segmentation("pipeline_reg").unwrap();
    rp.compare_values(4.0, seg.len() as f64, 0.0);
    // Diagonal contact adds no edges: every bar already touches its neighbours
    rp.compare_values(5.0, seg.edges() as f64, 0.0);

    let figures = &store.figures("pipeline_reg").unwrap().figures;
    let ids: Vec<SegmentId> = figures.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![SegmentId(1), SegmentId(2)]);

    // Label dump covers the whole image
    let dump = seg.labels().render(7).unwrap();
    rp.compare_values(pix.width() as f64, dump.width() as f64, 0.0);
    rp.compare_values(pix.height() as f64, dump.height() as f64, 0.0);

    // A second run with the same seed reproduces the dump pixel for pixel
    let rerun = Pipeline::new()
        .with_stage(Segmentizer::new(config.segmentation))
        .run(&pix)
        .unwrap();
    let again = rerun
        .segmentation("pipeline_reg")
        .unwrap()
        .labels()
        .render(7)
        .unwrap();
    rp.compare_pix(&dump, &again);

    if rp.display() {
        let path = format!("{}/pipeline_labels.png", regout_dir());
        write_image(&dump, &path).expect("write label dump");
    }

    assert!(rp.cleanup(), "pipeline regression test failed");
}

//! Stage pipeline
//!
//! A pipeline runs boxed [`Stage`]s in order over one image, each stage
//! reading the outputs of earlier stages from the shared [`StageStore`] and
//! writing its own.

use crate::error::RecogResult;
use crate::store::{SEGMENTIZER, StageStore};
use camp_core::Pix;
use camp_region::{SegmentationOptions, segmentize};
use tracing::{debug, info};

/// One step of the recognition pipeline.
pub trait Stage {
    /// Name used in logs and error context.
    fn name(&self) -> &'static str;

    /// Run the stage over `image`, reading and filling `store`.
    fn process(&mut self, image: &Pix, store: &mut StageStore) -> RecogResult<()>;
}

/// Ordered list of stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage (builder form).
    pub fn with_stage<S: Stage + 'static>(mut self, stage: S) -> Self {
        self.push(stage);
        self
    }

    pub fn push<S: Stage + 'static>(&mut self, stage: S) {
        self.stages.push(Box::new(stage));
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in execution order.
    pub fn names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Run every stage over `image` and return the filled store.
    ///
    /// Stops at the first failing stage.
    pub fn run(&mut self, image: &Pix) -> RecogResult<StageStore> {
        let mut store = StageStore::new();
        for stage in &mut self.stages {
            info!(stage = stage.name(), "running stage");
            stage.process(image, &mut store)?;
            debug!(stage = stage.name(), "stage finished");
        }
        Ok(store)
    }
}

/// Stage splitting the image into segments with their adjacency graph.
#[derive(Debug, Clone, Default)]
pub struct Segmentizer {
    options: SegmentationOptions,
}

impl Segmentizer {
    pub fn new(options: SegmentationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SegmentationOptions {
        &self.options
    }
}

impl Stage for Segmentizer {
    fn name(&self) -> &'static str {
        SEGMENTIZER
    }

    fn process(&mut self, image: &Pix, store: &mut StageStore) -> RecogResult<()> {
        let seg = segmentize(image, &self.options)?;
        store.set_segmentation(seg);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecogError;
    use camp_core::Rgb;

    struct Failing;

    impl Stage for Failing {
        fn name(&self) -> &'static str {
            "Failing"
        }

        fn process(&mut self, _image: &Pix, store: &mut StageStore) -> RecogResult<()> {
            store.text(self.name())?;
            Ok(())
        }
    }

    #[test]
    fn test_segmentizer_fills_slot() {
        let pix = Pix::new_filled(3, 3, Rgb::WHITE).unwrap();
        let mut pipeline = Pipeline::new().with_stage(Segmentizer::default());
        assert_eq!(pipeline.names(), vec![SEGMENTIZER]);

        let store = pipeline.run(&pix).unwrap();
        assert_eq!(store.segmentation("test").unwrap().len(), 1);
    }

    #[test]
    fn test_failing_stage_stops_pipeline() {
        let pix = Pix::new(2, 2).unwrap();
        let mut pipeline = Pipeline::new()
            .with_stage(Segmentizer::default())
            .with_stage(Failing);
        assert_eq!(pipeline.len(), 2);
        assert!(matches!(
            pipeline.run(&pix),
            Err(RecogError::MissingStageOutput {
                stage: "Failing",
                ..
            })
        ));
    }
}

use inceptor_core::{
    batch::{CHANNELS, DEFAULT_CAPACITY},
    inferer::Endpoints,
    normalize::DEFAULT_SCALE,
};
use inceptor_provision::ModelSource;

/// Side length the reference graph was trained on.
pub const DEFAULT_RESOLUTION: u32 = 224;

/// Everything needed to turn a directory of photos into one inference call.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Number of tensor slots; also the most images a run accepts.
    pub capacity: usize,

    /// Every image is resized to exactly `width × height`.
    pub width: u32,
    pub height: u32,

    /// Divisor applied after per-image centering.
    pub scale: f32,

    /// Graph endpoints the tensor is bound to and scores are read from.
    pub endpoints: Endpoints,

    /// Where the graph and labels come from when not already present.
    pub source: ModelSource,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            width: DEFAULT_RESOLUTION,
            height: DEFAULT_RESOLUTION,
            scale: DEFAULT_SCALE,
            endpoints: Endpoints::default(),
            source: ModelSource::default(),
        }
    }
}

impl PipelineConfig {
    /// Per-image tensor shape: `[height, width, 3]`.
    pub fn element_shape(&self) -> [usize; 3] {
        [self.height as usize, self.width as usize, CHANNELS]
    }
}

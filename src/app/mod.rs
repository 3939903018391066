// Application layer - Use case interactors

pub mod batch_interactor;
pub mod container;
pub mod size_validator;
pub mod transcode_pipeline;

// Re-export interactors
pub use batch_interactor::BatchInteractor;
pub use size_validator::{SizeValidator, SizeVerdict};
pub use transcode_pipeline::{PaletteArtifact, TranscodePipeline};

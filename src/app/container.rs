use std::sync::Arc;

use crate::adapters::toml_config::AppConfig;
use crate::adapters::{FFmpegAdapter, LocalFsAdapter};
use crate::app::{BatchInteractor, SizeValidator, TranscodePipeline};
use crate::domain::model::ConversionRequest;
use crate::domain::rules::ProfileResolver;
use crate::error::Vid2GifResult;
use crate::ports::{FsPort, TranscodePort};

pub trait AppContainer: Send + Sync {
    fn batch_interactor(&self) -> Arc<BatchInteractor>;
    fn profile_resolver(&self) -> Arc<ProfileResolver>;
}

pub struct DefaultAppContainer {
    batch_interactor: Arc<BatchInteractor>,
    profile_resolver: Arc<ProfileResolver>,
    request_template: ConversionRequest,
}

impl DefaultAppContainer {
    /// Wire the real adapters from a validated configuration
    pub fn new(config: &AppConfig) -> Vid2GifResult<Self> {
        let transcoder: Arc<dyn TranscodePort> =
            Arc::new(FFmpegAdapter::new(&config.conversion.ffmpeg_path));
        let fs_port: Arc<dyn FsPort> = Arc::new(LocalFsAdapter::new());
        Self::with_ports(config, transcoder, fs_port)
    }

    /// Wire the interactors around caller-supplied ports
    pub fn with_ports(
        config: &AppConfig,
        transcoder: Arc<dyn TranscodePort>,
        fs_port: Arc<dyn FsPort>,
    ) -> Vid2GifResult<Self> {
        let conversion = &config.conversion;
        let profile_resolver = Arc::new(ProfileResolver::new(config.profile_table()?));

        let request_template = ConversionRequest::template(
            conversion.width,
            profile_resolver.resolve(conversion.mode),
            conversion.max_size_mb,
            conversion.overwrite,
        )?;

        let pipeline = TranscodePipeline::new(
            transcoder,
            Arc::clone(&fs_port),
            conversion.work_dir(),
        );
        let validator = SizeValidator::new(Arc::clone(&fs_port));
        let batch_interactor = Arc::new(BatchInteractor::new(
            pipeline,
            validator,
            fs_port,
            &conversion.output_dir,
        ));

        Ok(Self {
            batch_interactor,
            profile_resolver,
            request_template,
        })
    }

    /// Batch-wide request built from the configuration
    pub fn request_template(&self) -> &ConversionRequest {
        &self.request_template
    }
}

impl AppContainer for DefaultAppContainer {
    fn batch_interactor(&self) -> Arc<BatchInteractor> {
        Arc::clone(&self.batch_interactor)
    }

    fn profile_resolver(&self) -> Arc<ProfileResolver> {
        Arc::clone(&self.profile_resolver)
    }
}

/*!
The end-to-end run: decode → resize → normalize → batch → infer → label.

Images are prepared independently (in parallel with the `threaded` feature)
but always land in the batch in the order they were listed. Exactly one
tensor is assembled and exactly one inference runs per [`Pipeline::classify`].
*/

use crate::{config::PipelineConfig, graph};
use anyhow::Context;
use inceptor_core::{
    error::{InceptorError, Result},
    prelude::*,
};
use inceptor_provision::ModelStore;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[cfg(feature = "threaded")]
use rayon::prelude::*;

/// The best label for one source image.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub path: PathBuf,
    pub best: BestMatch,
}

/// List the regular files in `dir`, sorted by file name.
///
/// # Errors
///
/// [`InceptorError::Io`] if the directory can't be read.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let io_error = |source| InceptorError::Io {
        path: dir.to_owned(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.is_file() {
            paths.push(path);
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

fn prepare_one(
    path: &Path,
    normalizer: Normalizer,
    width: u32,
    height: u32,
) -> Result<PixelGrid> {
    let grid = load_grid(path, width, height)?;
    normalizer.normalize(&grid)
}

/// A bound graph, its labels, and the preprocessing that feeds it.
pub struct Pipeline {
    config: PipelineConfig,
    normalizer: Normalizer,
    inferer: Box<dyn Inferer>,
    labels: LabelTable,
}

impl Pipeline {
    /// Assemble a pipeline from already-loaded parts.
    ///
    /// # Errors
    ///
    /// [`InceptorError::DivideByZero`] if the configured scale is zero.
    pub fn new(
        config: PipelineConfig,
        inferer: Box<dyn Inferer>,
        labels: LabelTable,
    ) -> Result<Self> {
        let normalizer = Normalizer::new(config.scale)?;

        Ok(Self {
            config,
            normalizer,
            inferer,
            labels,
        })
    }

    /// Provision the model in `store`, then load its graph and labels.
    ///
    /// With `offline` set the store is only checked, never fetched into.
    pub fn load(config: PipelineConfig, store: &ModelStore, offline: bool) -> anyhow::Result<Self> {
        let files = if offline {
            store.ensure_offline(&config.source)?
        } else {
            store.ensure(&config.source)?
        };

        let labels = LabelTable::load(&files.labels)?;
        let inferer = graph::load_inferer(&files.graph, &config)?;

        Self::new(config, Box::new(inferer), labels).context("configuring pipeline")
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// Decode, normalize and pack `paths` into one batch tensor.
    ///
    /// # Errors
    ///
    /// * [`InceptorError::BatchOverflow`] if there are more paths than slots;
    ///   checked before anything is decoded.
    /// * The error of the earliest listed image that failed to prepare.
    pub fn prepare(&self, paths: &[PathBuf]) -> Result<BatchTensor> {
        let PipelineConfig {
            capacity,
            width,
            height,
            ..
        } = self.config;

        if paths.len() > capacity {
            return Err(InceptorError::BatchOverflow { capacity });
        }

        let normalizer = self.normalizer;

        // Collected per image so the reported failure is the earliest listed.
        #[cfg(feature = "threaded")]
        let prepared = paths
            .par_iter()
            .map(|path| prepare_one(path, normalizer, width, height))
            .collect::<Vec<_>>();

        #[cfg(not(feature = "threaded"))]
        let prepared = paths
            .iter()
            .map(|path| prepare_one(path, normalizer, width, height))
            .collect::<Vec<_>>();

        let grids = prepared.into_iter().collect::<Result<Vec<_>>>()?;

        log::info!("prepared {} images", grids.len());

        let mut batch = BatchAssembler::new(capacity, height as usize, width as usize);
        for grid in grids {
            batch.append(grid)?;
        }

        batch.assemble()
    }

    /// Classify `paths` with a single inference run.
    ///
    /// Results are returned in the same order as `paths`.
    pub fn classify(&mut self, paths: &[PathBuf]) -> Result<Vec<Classification>> {
        let tensor = self.prepare(paths)?;

        let endpoints = &self.config.endpoints;
        let scores = invoker::run(
            self.inferer.as_mut(),
            tensor,
            &endpoints.input,
            &endpoints.output,
        )?;

        paths
            .iter()
            .enumerate()
            .map(|(idx, path)| {
                let row = scores.row(idx).ok_or(InceptorError::IndexOutOfRange {
                    index: idx,
                    len: scores.rows(),
                })?;

                Ok(Classification {
                    path: path.clone(),
                    best: best_label(row, &self.labels)?,
                })
            })
            .collect()
    }
}

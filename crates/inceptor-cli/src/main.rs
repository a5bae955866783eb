/*!
Command line tool for inceptor.
*/

use anyhow::{bail, Context, Result};
use clap::Parser;
use inceptor::{
    core::{batch::DEFAULT_CAPACITY, inferer::Endpoints, normalize::DEFAULT_SCALE},
    list_images,
    provision::{ModelSource, ModelStore, INCEPTION5H_URL},
    Pipeline, PipelineConfig, DEFAULT_RESOLUTION,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Classify every photo in a directory with a pre-trained image graph.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the graph and label table. Fetched into on first use.
    #[clap(default_value = "/data/models")]
    model_dir: PathBuf,

    /// Directory of photos to classify.
    #[clap(long, env = "INCEPTOR_IMAGES", default_value = "/data/images")]
    images: PathBuf,

    /// Archive to fetch when the graph or labels are missing.
    #[clap(long, default_value = INCEPTION5H_URL)]
    graph_url: String,

    /// Graph file name inside the model directory. `.pb` or `.onnx`.
    #[clap(long, default_value = "tensorflow_inception_graph.pb")]
    graph_file: String,

    /// Label table file name inside the model directory.
    ///
    /// Needs at least one line per graph score; pad it if the graph emits more
    /// classes than the file lists.
    #[clap(long, default_value = "imagenet_comp_graph_label_strings.txt")]
    labels_file: String,

    /// Number of tensor slots, and the most photos a single run accepts.
    #[clap(short, long, default_value_t = DEFAULT_CAPACITY)]
    batch_size: usize,

    /// Photos are resized to `size × size`.
    #[clap(long, default_value_t = DEFAULT_RESOLUTION)]
    size: u32,

    /// Divisor applied after centering each photo on its mean.
    #[clap(long, default_value_t = DEFAULT_SCALE)]
    scale: f32,

    /// Graph node the batch is bound to.
    #[clap(long, default_value = "input")]
    input: String,

    /// Graph node the scores are read from.
    #[clap(long, default_value = "output")]
    output: String,

    /// Never download; fail if the model isn't already present.
    #[clap(long)]
    offline: bool,

    /// Print the best match of every photo instead of just the first.
    #[clap(long)]
    all: bool,
}

impl Args {
    fn pipeline_config(&self) -> PipelineConfig {
        let defaults = ModelSource::default();

        PipelineConfig {
            capacity: self.batch_size,
            width: self.size,
            height: self.size,
            scale: self.scale,
            endpoints: Endpoints {
                input: self.input.clone(),
                output: self.output.clone(),
            },
            source: ModelSource {
                url: self.graph_url.clone(),
                graph_file: self.graph_file.clone(),
                labels_file: self.labels_file.clone(),
                ..defaults
            },
        }
    }
}

fn run(args: Args) -> Result<()> {
    let store = ModelStore::new(&args.model_dir);
    let mut pipeline = Pipeline::load(args.pipeline_config(), &store, args.offline)
        .with_context(|| format!("loading model from {:?}", args.model_dir))?;

    let images = list_images(&args.images)?;
    if images.is_empty() {
        bail!("no images found in {:?}", args.images);
    }

    log::info!("classifying {} images", images.len());
    let results = pipeline.classify(&images)?;

    if args.all {
        for result in &results {
            let name = result.path.file_name().unwrap_or_default().to_string_lossy();
            println!("{}: {}", name, result.best);
        }
    } else if let Some(first) = results.first() {
        println!("{}", first.best);
    }

    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    run(Args::parse())
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::{CommandFactory, Parser};

    #[test]
    fn flags_fold_into_config() {
        let args = Args::try_parse_from([
            "inceptor",
            "/tmp/models",
            "--graph-file",
            "resnet.onnx",
            "--batch-size",
            "2",
            "--size",
            "299",
            "--input",
            "images",
            "--output",
            "probs",
        ])
        .unwrap();

        let config = args.pipeline_config();
        assert_eq!(args.model_dir, std::path::Path::new("/tmp/models"));
        assert_eq!(config.capacity, 2);
        assert_eq!(config.element_shape(), [299, 299, 3]);
        assert_eq!(config.scale, 255.0);
        assert_eq!(config.endpoints.input, "images");
        assert_eq!(config.endpoints.output, "probs");
        assert_eq!(config.source.graph_file, "resnet.onnx");
        assert_eq!(config.source.archive_name, "inception5h.zip");
    }

    #[test]
    fn labels_help_mentions_padding() {
        let command = Args::command();
        let help = command
            .get_arguments()
            .find(|arg| arg.get_id() == "labels_file")
            .and_then(|arg| arg.get_long_help())
            .unwrap()
            .to_string();

        assert!(help.contains("at least one line per graph score"));
    }
}
